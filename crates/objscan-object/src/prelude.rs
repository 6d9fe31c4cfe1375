//! Convenience re-exports.

pub use crate::client::{GetOutput, ObjectStoreClient};
pub use crate::fetch::{ObjectFetcher, S3Fetcher};
pub use crate::providers::{Client, S3Credentials, S3Provider};
pub use crate::{Error, Result};
