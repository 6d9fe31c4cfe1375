//! Message handling.
//!
//! - [`MessageProcessor`]: decode, inspect and report one message body
//! - [`QueueConsumer`]: the receive, process, delete loop

mod consumer;
mod processor;

pub use consumer::{BatchSummary, LoopState, QueueConsumer};
pub use processor::MessageProcessor;
