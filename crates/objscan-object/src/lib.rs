#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for object-store client operations.
pub const TRACING_TARGET_CLIENT: &str = "objscan_object::client";

/// Tracing target for bucket client resolution in the fetcher.
pub const TRACING_TARGET_FETCH: &str = "objscan_object::fetch";

pub mod client;
mod error;
/// Object retrieval seam used by the inspector.
pub mod fetch;
/// Provider trait and object storage provider factories.
pub mod providers;

#[doc(hidden)]
pub mod prelude;

pub use error::{Error, Result};
