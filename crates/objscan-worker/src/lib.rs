#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for the consumption loop.
pub const TRACING_TARGET_CONSUMER: &str = "objscan_worker::consumer";

/// Tracing target for per-message processing.
pub const TRACING_TARGET_PROCESSOR: &str = "objscan_worker::processor";

/// Tracing target for notification decoding.
pub const TRACING_TARGET_DECODE: &str = "objscan_worker::decode";

/// Tracing target for log sink failures.
pub const TRACING_TARGET_SINK: &str = "objscan_worker::sink";

mod error;
pub mod handler;
pub mod inspect;
pub mod notification;
pub mod service;
pub mod sink;

pub use error::{Result, WorkerError};
pub use handler::{BatchSummary, LoopState, MessageProcessor, QueueConsumer};
pub use inspect::{Classification, Inspection, ObjectInspector};
pub use notification::{DecodeError, Notification};
pub use service::{WorkerConfig, WorkerState};
pub use sink::{DualLogSink, LogSink, MemoryLogSink};
