//! Console audit queue for development. Logs audit messages to tracing output.

use async_trait::async_trait;
use orgreg_application::AuditQueue;
use orgreg_core::AppResult;
use tracing::info;

/// Development audit queue that logs messages instead of publishing them.
#[derive(Clone)]
pub struct ConsoleAuditQueue;

impl ConsoleAuditQueue {
    /// Creates a new console audit queue.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleAuditQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditQueue for ConsoleAuditQueue {
    async fn send_message(&self, body: String) -> AppResult<()> {
        info!(
            bytes = body.len(),
            "--- AUDIT (console) ---\n{}\n--- END AUDIT ---",
            body
        );

        Ok(())
    }
}
