//! Provider trait for building store clients from credentials.

use serde::de::DeserializeOwned;

use crate::Error;

/// Factory for creating a client connected to a single bucket.
///
/// Building a client is local: no request is issued until the first
/// operation, so failures here are configuration failures.
pub trait Client: Sized + Send + Sync + 'static {
    /// Strongly-typed credentials for this provider.
    type Credentials: DeserializeOwned + Clone + Send;

    /// Unique identifier (e.g. "s3").
    const ID: &str;

    /// Create a client instance for the bucket named in `creds`.
    fn connect(creds: &Self::Credentials) -> Result<Self, Error>;
}
