//! Audit message serialization and best-effort delivery.
//!
//! Every message handed to the queue fits the configured byte ceiling. Oversized
//! records lose the tail of their free-text fields (remarks first, then the
//! activity description), each cut marked with [`TRUNCATION_MARKER`].

use std::sync::Arc;

use async_trait::async_trait;
use orgreg_domain::AuditRecord;
use tracing::{debug, error, warn};

use crate::{AuditQueue, AuditSink};

/// Largest payload the audit queue accepts (256 KiB).
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 256 * 1024;

/// Appended to a free-text field whose tail was cut.
pub const TRUNCATION_MARKER: &str = "...";

/// Serializes audit records and delivers them to the queue.
#[derive(Clone)]
pub struct AuditPublisher {
    queue: Arc<dyn AuditQueue>,
    max_message_bytes: usize,
}

impl AuditPublisher {
    /// Creates a publisher enforcing [`DEFAULT_MAX_MESSAGE_BYTES`].
    #[must_use]
    pub fn new(queue: Arc<dyn AuditQueue>) -> Self {
        Self {
            queue,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }

    /// Overrides the payload ceiling.
    #[must_use]
    pub fn with_max_message_bytes(mut self, max_message_bytes: usize) -> Self {
        self.max_message_bytes = max_message_bytes;
        self
    }

    /// Returns the payload ceiling in bytes.
    #[must_use]
    pub fn max_message_bytes(&self) -> usize {
        self.max_message_bytes
    }

    /// Delivers one record. Never fails: problems are logged and dropped.
    pub async fn publish(&self, record: AuditRecord) {
        let Some(message) = self.prepare_message(record) else {
            return;
        };

        if let Err(error) = self.queue.send_message(message).await {
            warn!(error = %error, "failed to publish audit message");
        }
    }

    /// Serializes a record into a message within the payload ceiling.
    ///
    /// Returns `None` when the record cannot be serialized or its structured
    /// fields alone exceed the ceiling.
    #[must_use]
    pub fn prepare_message(&self, mut record: AuditRecord) -> Option<String> {
        let mut message = serialize(&record)?;

        for field in [FreeTextField::Remarks, FreeTextField::ActivityDescription] {
            if message.len() <= self.max_message_bytes {
                return Some(message);
            }

            let overflow = message.len() - self.max_message_bytes;
            if truncate_with_marker(field.value_mut(&mut record), overflow) {
                debug!(
                    field = field.as_str(),
                    overflow_bytes = overflow,
                    "truncated oversized audit field"
                );
                message = serialize(&record)?;
            }
        }

        if message.len() <= self.max_message_bytes {
            return Some(message);
        }

        error!(
            message_bytes = message.len(),
            max_message_bytes = self.max_message_bytes,
            endpoint = %record.endpoint,
            "audit message exceeds the payload ceiling after truncation, dropping it"
        );
        None
    }
}

#[async_trait]
impl AuditSink for AuditPublisher {
    async fn submit(&self, record: AuditRecord) {
        self.publish(record).await;
    }
}

#[derive(Debug, Clone, Copy)]
enum FreeTextField {
    Remarks,
    ActivityDescription,
}

impl FreeTextField {
    fn value_mut(self, record: &mut AuditRecord) -> &mut String {
        match self {
            Self::Remarks => &mut record.remarks,
            Self::ActivityDescription => &mut record.activity_description,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Remarks => "remarks",
            Self::ActivityDescription => "activity_description",
        }
    }
}

fn serialize(record: &AuditRecord) -> Option<String> {
    match serde_json::to_string(record) {
        Ok(message) => Some(message),
        Err(error) => {
            error!(error = %error, "failed to serialize audit record");
            None
        }
    }
}

/// Cuts enough bytes from `value` to shed `overflow` serialized bytes, then
/// appends the marker. Each removed raw byte serializes to at least one byte,
/// so shedding `overflow + marker` raw bytes is always sufficient when the
/// field is long enough.
fn truncate_with_marker(value: &mut String, overflow: usize) -> bool {
    if value.len() <= TRUNCATION_MARKER.len() {
        return false;
    }

    let mut keep = value
        .len()
        .saturating_sub(overflow.saturating_add(TRUNCATION_MARKER.len()));
    while !value.is_char_boundary(keep) {
        keep -= 1;
    }

    value.truncate(keep);
    value.push_str(TRUNCATION_MARKER);
    true
}

#[cfg(test)]
mod tests;
