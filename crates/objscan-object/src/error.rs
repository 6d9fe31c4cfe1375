//! Fetch error for object-store operations.

use std::fmt;

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for object-store operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error raised when an object cannot be retrieved from the store.
///
/// Carries a message, an optional source, a retryable flag and whether the
/// store reported the object as missing.
pub struct Error {
    message: String,
    source: Option<BoxedError>,
    retryable: bool,
    not_found: bool,
}

impl Error {
    /// Create a runtime error formatted as `[{label}] {msg}`.
    pub fn runtime(msg: impl fmt::Display, label: &str, retryable: bool) -> Self {
        Self {
            message: format!("[{label}] {msg}"),
            source: None,
            retryable,
            not_found: false,
        }
    }

    /// Create a connection error formatted as `[{label}] {msg}`.
    ///
    /// Raised when a client for a bucket cannot be built.
    pub fn connection(msg: impl fmt::Display, label: &str, retryable: bool) -> Self {
        Self {
            message: format!("[{label}] connection failed: {msg}"),
            source: None,
            retryable,
            not_found: false,
        }
    }

    /// Attach a source error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Mark the error as a missing object.
    pub(crate) fn into_not_found(mut self) -> Self {
        self.not_found = true;
        self
    }

    /// Whether the caller should retry this operation.
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// Whether the store reported that the object does not exist.
    pub fn is_not_found(&self) -> bool {
        self.not_found
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("message", &self.message)
            .field("retryable", &self.retryable)
            .field("not_found", &self.not_found)
            .field("source", &self.source)
            .finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_error_is_labelled() {
        let err = Error::runtime("boom", "object-store", true);
        assert_eq!(err.to_string(), "[object-store] boom");
        assert!(err.is_retryable());
        assert!(!err.is_not_found());
    }

    #[test]
    fn connection_error_keeps_source() {
        let io = std::io::Error::other("no route");
        let err = Error::connection("bad endpoint", "s3", false).with_source(io);
        assert_eq!(err.to_string(), "[s3] connection failed: bad endpoint");
        assert!(std::error::Error::source(&err).is_some());
    }
}
