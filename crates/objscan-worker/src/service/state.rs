//! Worker application state.

use std::sync::Arc;

use objscan_object::fetch::{ObjectFetcher, S3Fetcher};
use objscan_queue::{MessageQueue, SqsQueue};

use super::WorkerConfig;
use crate::Result;
use crate::sink::LogSink;

/// Services the consumer loop runs against.
///
/// Can be created either directly with [`WorkerState::new`] or from
/// configuration with [`WorkerState::from_config`].
#[derive(Clone)]
pub struct WorkerState {
    /// Queue the notifications arrive on.
    pub queue: Arc<dyn MessageQueue>,
    /// Object retrieval.
    pub fetcher: Arc<dyn ObjectFetcher>,
    /// Destination of operator-facing log lines.
    pub sink: Arc<dyn LogSink>,
}

impl WorkerState {
    /// Creates a new worker state from existing service instances.
    pub fn new(
        queue: Arc<dyn MessageQueue>,
        fetcher: Arc<dyn ObjectFetcher>,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            queue,
            fetcher,
            sink,
        }
    }

    /// Creates a new worker state from configuration.
    ///
    /// Builds the queue client and an object fetcher whose bucket clients
    /// share the queue's region.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub async fn from_config(config: &WorkerConfig, sink: Arc<dyn LogSink>) -> Result<Self> {
        config.validate()?;

        let queue = SqsQueue::connect(&config.sqs).await?;
        let fetcher = S3Fetcher::new(config.s3_template());

        Ok(Self::new(Arc::new(queue), Arc::new(fetcher), sink))
    }
}
