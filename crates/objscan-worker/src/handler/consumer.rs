//! The consumption loop.
//!
//! Two states and no terminal state:
//!
//! ```text
//! Polling ──receive ok──▶ process batch ──▶ Polling
//!    │
//!    └──receive error──▶ ErrorBackoff ──sleep──▶ Polling
//! ```
//!
//! Messages are handled strictly one at a time in delivery order, and a batch
//! is fully processed and deleted before the next receive is issued.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use objscan_queue::{MessageQueue, RawMessage, ReceiveOptions};

use super::MessageProcessor;
use crate::TRACING_TARGET_CONSUMER;
use crate::inspect::ObjectInspector;
use crate::service::{WorkerConfig, WorkerState};
use crate::sink::LogSink;

/// Operational state of the consumption loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Issue the next receive call.
    Polling,
    /// Sleep for the fixed backoff after a failed receive.
    ErrorBackoff,
}

/// Counters for one handled batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Messages in the batch.
    pub received: usize,
    /// Messages whose processing failed.
    pub failed: usize,
    /// Messages successfully deleted.
    pub deleted: usize,
    /// Messages whose delete failed and that will be redelivered.
    pub delete_failed: usize,
}

/// Long-running consumer draining one queue.
pub struct QueueConsumer {
    queue: Arc<dyn MessageQueue>,
    processor: MessageProcessor,
    sink: Arc<dyn LogSink>,
    options: ReceiveOptions,
    error_backoff: Duration,
}

impl QueueConsumer {
    /// Creates a consumer from worker state and configuration.
    pub fn new(state: WorkerState, config: &WorkerConfig) -> Self {
        let inspector =
            ObjectInspector::new(state.fetcher).with_max_line_length(config.max_line_length);
        let processor = MessageProcessor::new(inspector, state.sink.clone());

        Self {
            queue: state.queue,
            processor,
            sink: state.sink,
            options: config.receive.clone(),
            error_backoff: config.error_backoff(),
        }
    }

    /// Runs the loop until the process is terminated.
    pub async fn run(&self) -> Infallible {
        tracing::info!(
            target: TRACING_TARGET_CONSUMER,
            max_messages = self.options.max_messages(),
            wait_secs = self.options.wait_time().as_secs(),
            visibility_secs = self.options.visibility_timeout().as_secs(),
            backoff_secs = self.error_backoff.as_secs(),
            "Starting consumer"
        );

        let mut state = LoopState::Polling;
        loop {
            state = self.step(state).await;
        }
    }

    /// Performs one state transition.
    pub async fn step(&self, state: LoopState) -> LoopState {
        match state {
            LoopState::Polling => self.poll().await,
            LoopState::ErrorBackoff => {
                tracing::debug!(
                    target: TRACING_TARGET_CONSUMER,
                    backoff_secs = self.error_backoff.as_secs(),
                    "Backing off after receive failure"
                );
                tokio::time::sleep(self.error_backoff).await;
                LoopState::Polling
            }
        }
    }

    /// Receives one batch and handles it.
    async fn poll(&self) -> LoopState {
        match self.queue.receive(&self.options).await {
            Ok(batch) => {
                let summary = self.handle_batch(&batch).await;
                if summary.received > 0 {
                    tracing::info!(
                        target: TRACING_TARGET_CONSUMER,
                        received = summary.received,
                        failed = summary.failed,
                        deleted = summary.deleted,
                        delete_failed = summary.delete_failed,
                        "Handled batch"
                    );
                }
                LoopState::Polling
            }
            Err(err) => {
                tracing::error!(
                    target: TRACING_TARGET_CONSUMER,
                    error = %err,
                    "Failed to receive messages"
                );
                self.sink
                    .log_line(&format!("Failed to receive messages: {err}"));
                LoopState::ErrorBackoff
            }
        }
    }

    /// Handles every message of a batch in delivery order.
    pub async fn handle_batch(&self, batch: &[RawMessage]) -> BatchSummary {
        let mut summary = BatchSummary {
            received: batch.len(),
            ..Default::default()
        };

        for message in batch {
            let (processed, deleted) = self.handle_message(message).await;
            if !processed {
                summary.failed += 1;
            }
            if deleted {
                summary.deleted += 1;
            } else {
                summary.delete_failed += 1;
            }
        }

        summary
    }

    /// Processes one message, then deletes it.
    ///
    /// The delete is attempted exactly once whether or not processing
    /// succeeded (fail-open): a message that cannot be processed is dropped
    /// instead of being redelivered forever. Only a failed delete leaves the
    /// message in the queue, to reappear after its visibility timeout.
    ///
    /// Returns whether processing succeeded and whether the delete succeeded.
    async fn handle_message(&self, message: &RawMessage) -> (bool, bool) {
        let result = self.processor.process(message.body()).await;

        self.sink
            .log_line(&format!("Received message: {}", message.body()));

        let processed = match result {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET_CONSUMER,
                    message_id = %message.id(),
                    error = %err,
                    "Failed to process message, deleting anyway"
                );
                self.sink
                    .log_line(&format!("Error processing message: {err}"));
                false
            }
        };

        let deleted = match self.queue.delete(message).await {
            Ok(()) => {
                self.sink
                    .log_line(&format!("Message deleted: {}", message.id()));
                true
            }
            Err(err) => {
                tracing::error!(
                    target: TRACING_TARGET_CONSUMER,
                    message_id = %message.id(),
                    error = %err,
                    "Failed to delete message"
                );
                self.sink
                    .log_line(&format!("Failed to delete message: {err}"));
                false
            }
        };

        (processed, deleted)
    }
}
