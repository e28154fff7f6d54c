use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sqs::error::DisplayErrorContext;
use orgreg_application::AuditQueue;
use orgreg_core::{AppError, AppResult};
use tracing::debug;

/// SQS-backed audit queue.
#[derive(Clone)]
pub struct SqsAuditQueue {
    client: aws_sdk_sqs::Client,
    queue_url: String,
}

impl SqsAuditQueue {
    /// Creates a queue publisher from an existing SQS client.
    #[must_use]
    pub fn new(client: aws_sdk_sqs::Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }

    /// Creates a queue publisher using the default AWS credential chain.
    pub async fn from_region(region: impl Into<String>, queue_url: impl Into<String>) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.into()))
            .load()
            .await;

        Self::new(aws_sdk_sqs::Client::new(&config), queue_url)
    }
}

#[async_trait]
impl AuditQueue for SqsAuditQueue {
    async fn send_message(&self, body: String) -> AppResult<()> {
        let output = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|error| {
                AppError::Unavailable(format!(
                    "failed to send audit message: {}",
                    DisplayErrorContext(&error)
                ))
            })?;

        debug!(
            message_id = output.message_id().unwrap_or_default(),
            "audit message published"
        );

        Ok(())
    }
}
