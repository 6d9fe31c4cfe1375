//! Worker error types.

use std::borrow::Cow;

use crate::notification::DecodeError;

/// Result type alias for worker operations.
pub type Result<T, E = WorkerError> = std::result::Result<T, E>;

/// Worker error type.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    /// The notification payload could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The referenced object could not be retrieved.
    #[error("failed to fetch {bucket}/{key}: {source}")]
    Fetch {
        bucket: String,
        key: String,
        #[source]
        source: objscan_object::Error,
    },

    /// A queue operation failed.
    #[error(transparent)]
    Queue(#[from] objscan_queue::Error),

    /// The worker configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The log sink could not be opened.
    #[error("log sink error: {message}")]
    Sink {
        message: Cow<'static, str>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl WorkerError {
    /// Creates a fetch error for the object at `bucket`/`key`.
    pub fn fetch(
        bucket: impl Into<String>,
        key: impl Into<String>,
        source: objscan_object::Error,
    ) -> Self {
        Self::Fetch {
            bucket: bucket.into(),
            key: key.into(),
            source,
        }
    }

    /// Creates a configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Creates a sink error with a message and source.
    pub fn sink_with_source(
        message: impl Into<Cow<'static, str>>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Sink {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
