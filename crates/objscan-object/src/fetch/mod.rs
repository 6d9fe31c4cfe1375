//! Object retrieval by bucket and key.

mod s3_fetcher;

use async_trait::async_trait;
use bytes::Bytes;
pub use s3_fetcher::{DEFAULT_MAX_CACHED_BUCKETS, S3Fetcher};

use crate::Result;

/// Retrieves the complete content of a stored object.
///
/// Implementations return the full byte content; partial reads are never
/// issued. Any failure (transport, authentication, missing object) is a
/// fetch [`Error`](crate::Error).
#[async_trait]
pub trait ObjectFetcher: Send + Sync {
    /// Fetch the object stored under `key` in `bucket`.
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Bytes>;
}
