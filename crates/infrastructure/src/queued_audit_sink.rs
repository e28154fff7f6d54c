//! Bounded hand-off between request handling and audit delivery.
//!
//! Requests never wait on the external queue. A full buffer blocks the
//! submitter for at most the enqueue timeout, after which the record is dropped
//! with a warning.

use std::time::Duration;

use async_trait::async_trait;
use orgreg_application::{AuditPublisher, AuditSink};
use orgreg_domain::AuditRecord;
use tokio::sync::mpsc::{self, error::SendTimeoutError, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Audit sink buffering records for a single background delivery worker.
#[derive(Clone)]
pub struct QueuedAuditSink {
    sender: mpsc::Sender<AuditRecord>,
    enqueue_timeout: Duration,
}

/// Handle on the delivery worker spawned by [`QueuedAuditSink::spawn`].
pub struct AuditDeliveryWorker {
    handle: JoinHandle<()>,
}

impl QueuedAuditSink {
    /// Spawns the delivery worker and returns the sink feeding it.
    ///
    /// The worker stops once every sink clone has been dropped and the buffer
    /// is empty.
    #[must_use]
    pub fn spawn(
        publisher: AuditPublisher,
        capacity: usize,
        enqueue_timeout: Duration,
    ) -> (Self, AuditDeliveryWorker) {
        let (sender, mut receiver) = mpsc::channel::<AuditRecord>(capacity.max(1));

        let handle = tokio::spawn(async move {
            while let Some(record) = receiver.recv().await {
                publisher.publish(record).await;
            }
            info!("audit delivery worker stopped");
        });

        (
            Self {
                sender,
                enqueue_timeout,
            },
            AuditDeliveryWorker { handle },
        )
    }
}

impl AuditDeliveryWorker {
    /// Waits for buffered records to be delivered, up to `grace`.
    ///
    /// Call after dropping every [`QueuedAuditSink`] clone.
    pub async fn drain(self, grace: Duration) {
        match tokio::time::timeout(grace, self.handle).await {
            Ok(Ok(())) => {}
            Ok(Err(error)) => warn!(error = %error, "audit delivery worker failed"),
            Err(_) => warn!(
                grace_ms = u64::try_from(grace.as_millis()).unwrap_or(u64::MAX),
                "audit delivery worker did not drain before shutdown"
            ),
        }
    }
}

#[async_trait]
impl AuditSink for QueuedAuditSink {
    async fn submit(&self, record: AuditRecord) {
        let record = match self.sender.try_send(record) {
            Ok(()) => return,
            Err(TrySendError::Full(record)) => record,
            Err(TrySendError::Closed(record)) => {
                warn!(endpoint = %record.endpoint, "audit delivery stopped, dropping record");
                return;
            }
        };

        match self.sender.send_timeout(record, self.enqueue_timeout).await {
            Ok(()) => {}
            Err(SendTimeoutError::Timeout(record)) => warn!(
                endpoint = %record.endpoint,
                status_code = record.status_code,
                "audit buffer full, dropping record"
            ),
            Err(SendTimeoutError::Closed(record)) => {
                warn!(endpoint = %record.endpoint, "audit delivery stopped, dropping record");
            }
        }
    }
}
