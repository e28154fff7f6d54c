use std::sync::Arc;

use orgreg_application::{AuditPublisher, AuditQueue};
use orgreg_infrastructure::{
    AuditDeliveryWorker, ConsoleAuditQueue, QueuedAuditSink, SqsAuditQueue,
};
use tracing::info;

use crate::api_config::{AuditConfig, AuditSinkConfig};

pub(super) async fn build_audit_sink(config: &AuditConfig) -> (QueuedAuditSink, AuditDeliveryWorker) {
    let queue: Arc<dyn AuditQueue> = match &config.sink {
        AuditSinkConfig::Sqs { queue_url, region } => {
            info!(region = %region, "publishing audit records to SQS");
            Arc::new(SqsAuditQueue::from_region(region.clone(), queue_url.clone()).await)
        }
        AuditSinkConfig::Console => {
            info!("publishing audit records to the console");
            Arc::new(ConsoleAuditQueue::new())
        }
    };

    let publisher = AuditPublisher::new(queue).with_max_message_bytes(config.max_message_bytes);

    QueuedAuditSink::spawn(publisher, config.queue_capacity, config.enqueue_timeout)
}
