use serde::{Deserialize, Serialize};

/// Why a validator rejected a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// The request itself is malformed (blank id, bad header).
    BadRequest,
    /// The caller may not access this particular instance.
    AccessDenied,
}

/// Outcome of a request validator, consumed immediately by the calling handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The request may proceed.
    Valid,
    /// The request must be rejected with the given message.
    Rejected {
        /// Rejection category, mapped to an HTTP status at the boundary.
        kind: RejectionKind,
        /// User-safe message.
        message: String,
    },
}

impl ValidationResult {
    /// Builds a bad-request rejection.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Rejected {
            kind: RejectionKind::BadRequest,
            message: message.into(),
        }
    }

    /// Builds an access-denied rejection.
    #[must_use]
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::Rejected {
            kind: RejectionKind::AccessDenied,
            message: message.into(),
        }
    }

    /// Returns whether the request may proceed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the rejection message, empty for valid results.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Valid => "",
            Self::Rejected { message, .. } => message.as_str(),
        }
    }
}
