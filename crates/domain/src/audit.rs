use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Username recorded when the caller's token could not be read.
pub const INVALID_USERNAME: &str = "Invalid Username";

/// Coarse outcome of an audited request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditResponseStatus {
    /// The request completed with a 2xx/3xx status.
    Success,
    /// The request was rejected or failed.
    Failed,
}

impl AuditResponseStatus {
    /// Classifies an HTTP status code.
    #[must_use]
    pub fn from_status_code(status_code: u16) -> Self {
        if (200..400).contains(&status_code) {
            Self::Success
        } else {
            Self::Failed
        }
    }
}

/// One audit entry per intercepted request.
///
/// The skeleton is created at request start; outcome fields are filled when the
/// request completes, after which ownership passes to the audit sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    /// Prefixed activity label.
    pub activity_type: String,
    /// Request path.
    pub endpoint: String,
    /// Request method.
    pub http_method: String,
    /// Final HTTP status code.
    pub status_code: u16,
    /// Outcome derived from `status_code`.
    pub response_status: AuditResponseStatus,
    /// Free-text outcome message.
    pub activity_description: String,
    /// Username read from the token, or [`INVALID_USERNAME`].
    pub username: String,
    /// User id read from the token, empty when unavailable.
    pub user_id: String,
    /// When the request started.
    pub timestamp: DateTime<Utc>,
    /// Free-text remarks.
    pub remarks: String,
}

impl AuditRecord {
    /// Creates the skeleton recorded at request start.
    #[must_use]
    pub fn begin(
        activity_type: impl Into<String>,
        endpoint: impl Into<String>,
        http_method: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            activity_type: activity_type.into(),
            endpoint: endpoint.into(),
            http_method: http_method.into(),
            status_code: 0,
            response_status: AuditResponseStatus::Failed,
            activity_description: String::new(),
            username: INVALID_USERNAME.to_owned(),
            user_id: String::new(),
            timestamp,
            remarks: String::new(),
        }
    }

    /// Records the final status and message.
    pub fn set_outcome(&mut self, status_code: u16, message: impl Into<String>) {
        self.status_code = status_code;
        self.response_status = AuditResponseStatus::from_status_code(status_code);
        self.activity_description = message.into();
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{AuditRecord, AuditResponseStatus, INVALID_USERNAME};

    #[test]
    fn skeleton_defaults_to_invalid_username() {
        let record = AuditRecord::begin("Create Organization", "/api/orgs", "POST", Utc::now());
        assert_eq!(record.username, INVALID_USERNAME);
        assert!(record.user_id.is_empty());
    }

    #[test]
    fn outcome_classifies_status_codes() {
        let mut record = AuditRecord::begin("", "/api/orgs", "GET", Utc::now());

        record.set_outcome(200, "ok");
        assert_eq!(record.response_status, AuditResponseStatus::Success);

        record.set_outcome(401, "JWT token is expired");
        assert_eq!(record.response_status, AuditResponseStatus::Failed);

        record.set_outcome(500, "boom");
        assert_eq!(record.response_status, AuditResponseStatus::Failed);
    }

    #[test]
    fn serializes_with_camel_case_and_upper_status() {
        let mut record = AuditRecord::begin("LOGIN", "/login", "POST", Utc::now());
        record.set_outcome(200, "ok");

        let json = serde_json::to_value(&record).unwrap_or_default();
        assert_eq!(json["httpMethod"], "POST");
        assert_eq!(json["responseStatus"], "SUCCESS");
        assert_eq!(json["activityDescription"], "ok");
    }
}
