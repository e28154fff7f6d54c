use std::sync::Arc;

use chrono::Utc;
use orgreg_domain::AuditRecord;
use tracing::debug;

use crate::{AuditSink, TokenCodec, bearer_token};

/// Builds one audit record per request and hands it to the sink.
#[derive(Clone)]
pub struct AuditRecorder {
    sink: Arc<dyn AuditSink>,
    token_codec: Arc<dyn TokenCodec>,
    activity_type_prefix: String,
}

impl AuditRecorder {
    /// Creates a recorder.
    #[must_use]
    pub fn new(
        sink: Arc<dyn AuditSink>,
        token_codec: Arc<dyn TokenCodec>,
        activity_type_prefix: impl Into<String>,
    ) -> Self {
        Self {
            sink,
            token_codec,
            activity_type_prefix: activity_type_prefix.into(),
        }
    }

    /// Creates the skeleton record at request start.
    #[must_use]
    pub fn begin(&self, activity_type: &str, endpoint: &str, http_method: &str) -> AuditRecord {
        AuditRecord::begin(
            format!("{}{activity_type}", self.activity_type_prefix),
            endpoint,
            http_method,
            Utc::now(),
        )
    }

    /// Re-labels a skeleton once the handler has named the activity.
    pub fn relabel(&self, record: &mut AuditRecord, activity_type: &str) {
        record.activity_type = format!("{}{activity_type}", self.activity_type_prefix);
    }

    /// Completes the record and hands it off for delivery.
    ///
    /// Identity enrichment is best effort: an unreadable token leaves the
    /// default identity fields in place and the record is still delivered.
    pub async fn complete(
        &self,
        mut record: AuditRecord,
        status_code: u16,
        message: &str,
        authorization_header: Option<&str>,
    ) {
        record.set_outcome(status_code, message);
        self.enrich_identity(&mut record, authorization_header);
        self.sink.submit(record).await;
    }

    fn enrich_identity(&self, record: &mut AuditRecord, authorization_header: Option<&str>) {
        let Some(token) = authorization_header.and_then(bearer_token) else {
            return;
        };

        match self.token_codec.read_claims(token) {
            Ok(claims) => {
                if let Some(username) = claims.username() {
                    record.username = username.to_owned();
                }
                if let Some(user_id) = claims.user_id().or(claims.subject()) {
                    record.user_id = user_id.to_owned();
                }
            }
            Err(error) => {
                debug!(error = %error, "audit identity enrichment skipped");
            }
        }
    }
}
