use async_trait::async_trait;
use orgreg_core::AppResult;
use orgreg_domain::AuditRecord;

/// Port for the external message queue receiving audit messages.
#[async_trait]
pub trait AuditQueue: Send + Sync {
    /// Sends one text message. Delivery is at-most-once; no retry is attempted.
    async fn send_message(&self, body: String) -> AppResult<()>;
}

/// Port accepting completed audit records for delivery.
///
/// Submission never fails from the caller's perspective: implementations log
/// and swallow every delivery problem.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Hands a completed record off for delivery.
    async fn submit(&self, record: AuditRecord);
}
