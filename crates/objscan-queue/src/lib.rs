#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for queue client construction and configuration.
///
/// Use this target for logging client initialization and configuration errors.
pub const TRACING_TARGET_CLIENT: &str = "objscan_queue::client";

/// Tracing target for receive calls.
pub const TRACING_TARGET_RECEIVE: &str = "objscan_queue::receive";

/// Tracing target for delete calls.
pub const TRACING_TARGET_DELETE: &str = "objscan_queue::delete";

mod client;
mod error;
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;
pub mod queue;

pub use client::{SqsConfig, SqsQueue};
pub use error::{Error, Result};
pub use queue::{MessageQueue, RawMessage, ReceiveOptions};
