//! [`MessageQueue`] implementation over Amazon SQS.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sqs::Client;
use aws_sdk_sqs::error::DisplayErrorContext;

use super::SqsConfig;
use crate::queue::{MessageQueue, RawMessage, ReceiveOptions};
use crate::{
    Error, Result, TRACING_TARGET_CLIENT, TRACING_TARGET_DELETE, TRACING_TARGET_RECEIVE,
};

/// Amazon SQS queue bound to a single queue URL.
#[derive(Debug, Clone)]
pub struct SqsQueue {
    client: Client,
    queue_url: String,
}

impl SqsQueue {
    /// Builds a client from configuration using the default AWS provider chain.
    ///
    /// No request is issued here; credential problems surface on the first
    /// receive.
    pub async fn connect(config: &SqsConfig) -> Result<Self> {
        config.validate()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region().to_string()));
        if let Some(endpoint) = config.endpoint() {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        tracing::info!(
            target: TRACING_TARGET_CLIENT,
            queue_url = %config.queue_url(),
            region = %config.region(),
            endpoint = ?config.endpoint(),
            "Created SQS client"
        );

        Ok(Self::from_client(Client::new(&sdk_config), config.queue_url()))
    }

    /// Wraps an existing SDK client.
    pub fn from_client(client: Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }

    /// Returns the queue URL.
    #[inline]
    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }
}

#[async_trait]
impl MessageQueue for SqsQueue {
    async fn receive(&self, options: &ReceiveOptions) -> Result<Vec<RawMessage>> {
        let output = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(to_i32(options.max_messages()))
            .wait_time_seconds(to_i32(options.receive_wait_secs))
            .visibility_timeout(to_i32(options.receive_visibility_secs))
            .send()
            .await
            .map_err(|e| {
                Error::receive_with_source(
                    &self.queue_url,
                    DisplayErrorContext(&e).to_string(),
                    e,
                )
            })?;

        let messages: Vec<RawMessage> = output
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(RawMessage::from)
            .collect();

        tracing::debug!(
            target: TRACING_TARGET_RECEIVE,
            queue_url = %self.queue_url,
            count = messages.len(),
            "Received batch"
        );

        Ok(messages)
    }

    async fn delete(&self, message: &RawMessage) -> Result<()> {
        let Some(receipt_handle) = message.receipt_handle() else {
            return Err(Error::MissingReceiptHandle {
                message_id: message.id().to_string(),
            });
        };

        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|e| {
                Error::delete_with_source(message.id(), DisplayErrorContext(&e).to_string(), e)
            })?;

        tracing::debug!(
            target: TRACING_TARGET_DELETE,
            message_id = %message.id(),
            "Deleted message"
        );

        Ok(())
    }
}

/// Converts a validated option value to the SDK's integer type.
fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_i32_saturates() {
        assert_eq!(to_i32(20), 20);
        assert_eq!(to_i32(u32::MAX), i32::MAX);
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_config() {
        let err = SqsQueue::connect(&SqsConfig::new("not-a-url"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[tokio::test]
    async fn test_delete_without_receipt_handle() {
        let config = SqsConfig::new("http://localhost:4566/000000000000/events")
            .with_endpoint("http://localhost:4566");
        let queue = SqsQueue::connect(&config).await.unwrap();

        let message = RawMessage::from(
            aws_sdk_sqs::types::Message::builder()
                .message_id("m-1")
                .build(),
        );
        let err = queue.delete(&message).await.unwrap_err();
        assert!(matches!(err, Error::MissingReceiptHandle { .. }));
    }
}
