//! Scripted in-memory queue for driving consumers in tests.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::queue::{MessageQueue, RawMessage, ReceiveOptions};
use crate::{Error, Result};

/// In-memory [`MessageQueue`] that replays scripted receive outcomes.
///
/// Once the script is exhausted, every receive waits the full long-poll
/// duration and returns an empty batch, like an idle queue.
#[derive(Debug, Default)]
pub struct MockQueue {
    state: Mutex<MockState>,
}

#[derive(Debug, Default)]
struct MockState {
    script: VecDeque<Result<Vec<RawMessage>>>,
    failing_deletes: HashSet<String>,
    receive_calls: Vec<Instant>,
    deleted: Vec<String>,
    delete_attempts: Vec<String>,
}

impl MockQueue {
    /// Creates an idle queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful receive returning `batch`.
    #[must_use]
    pub fn with_batch(self, batch: Vec<RawMessage>) -> Self {
        self.lock().script.push_back(Ok(batch));
        self
    }

    /// Queues a failing receive.
    #[must_use]
    pub fn with_receive_error(self, reason: &str) -> Self {
        self.lock()
            .script
            .push_back(Err(Error::receive("mock://queue", reason)));
        self
    }

    /// Makes every delete of the message with `message_id` fail.
    #[must_use]
    pub fn with_failing_delete(self, message_id: &str) -> Self {
        self.lock().failing_deletes.insert(message_id.to_string());
        self
    }

    /// Instants at which receive was called.
    pub fn receive_calls(&self) -> Vec<Instant> {
        self.lock().receive_calls.clone()
    }

    /// Message ids whose delete succeeded, in call order.
    pub fn deleted(&self) -> Vec<String> {
        self.lock().deleted.clone()
    }

    /// Message ids for which delete was attempted, in call order.
    pub fn delete_attempts(&self) -> Vec<String> {
        self.lock().delete_attempts.clone()
    }

    /// Number of scripted receive outcomes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lock().script.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl MessageQueue for MockQueue {
    async fn receive(&self, options: &ReceiveOptions) -> Result<Vec<RawMessage>> {
        let next = {
            let mut state = self.lock();
            state.receive_calls.push(Instant::now());
            state.script.pop_front()
        };

        match next {
            Some(outcome) => outcome,
            None => {
                tokio::time::sleep(options.wait_time()).await;
                Ok(Vec::new())
            }
        }
    }

    async fn delete(&self, message: &RawMessage) -> Result<()> {
        let mut state = self.lock();
        state.delete_attempts.push(message.id().to_string());

        if message.receipt_handle().is_none() {
            return Err(Error::MissingReceiptHandle {
                message_id: message.id().to_string(),
            });
        }

        if state.failing_deletes.contains(message.id()) {
            return Err(Error::delete(message.id(), "access denied"));
        }

        state.deleted.push(message.id().to_string());
        Ok(())
    }
}
