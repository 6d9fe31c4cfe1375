//! The receive/delete seam and the types that cross it.

mod message;
mod receive;

use async_trait::async_trait;
pub use message::RawMessage;
pub use receive::ReceiveOptions;

use crate::Result;

/// A queue that hands out deliveries and accepts deletions.
///
/// Delivery is at-least-once: a message that is not deleted before its
/// visibility timeout elapses is delivered again.
#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Receive a batch of up to `options.max_messages()` deliveries.
    ///
    /// Waits up to `options.wait_time()` for messages to arrive and may
    /// return an empty batch.
    async fn receive(&self, options: &ReceiveOptions) -> Result<Vec<RawMessage>>;

    /// Delete one delivery using its receipt handle.
    async fn delete(&self, message: &RawMessage) -> Result<()>;
}
