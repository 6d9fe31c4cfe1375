//! Error types for queue operations.

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for all queue operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for queue operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Receive call failed.
    #[error("receive from '{queue}' failed: {reason}")]
    Receive {
        queue: String,
        reason: String,
        #[source]
        source: Option<BoxedError>,
    },

    /// Delete call failed; the message reappears after its visibility timeout.
    #[error("delete of message '{message_id}' failed: {reason}")]
    Delete {
        message_id: String,
        reason: String,
        #[source]
        source: Option<BoxedError>,
    },

    /// The delivery carries no receipt handle, so it cannot be deleted.
    #[error("message '{message_id}' has no receipt handle")]
    MissingReceiptHandle { message_id: String },

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl Error {
    /// Create a receive error.
    pub fn receive(queue: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Receive {
            queue: queue.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Create a receive error wrapping its cause.
    pub fn receive_with_source(
        queue: impl Into<String>,
        reason: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Receive {
            queue: queue.into(),
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a delete error.
    pub fn delete(message_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Delete {
            message_id: message_id.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Create a delete error wrapping its cause.
    pub fn delete_with_source(
        message_id: impl Into<String>,
        reason: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Delete {
            message_id: message_id.into(),
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Whether this error came from a receive call.
    pub fn is_receive(&self) -> bool {
        matches!(self, Self::Receive { .. })
    }

    /// Whether this error came from deleting a message.
    pub fn is_delete(&self) -> bool {
        matches!(
            self,
            Self::Delete { .. } | Self::MissingReceiptHandle { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receive_error_display() {
        let err = Error::receive("https://queue", "connection reset");
        assert_eq!(
            err.to_string(),
            "receive from 'https://queue' failed: connection reset"
        );
        assert!(err.is_receive());
        assert!(!err.is_delete());
    }

    #[test]
    fn delete_errors_are_classified() {
        assert!(Error::delete("m-1", "throttled").is_delete());
        let missing = Error::MissingReceiptHandle {
            message_id: "m-2".to_string(),
        };
        assert!(missing.is_delete());
        assert_eq!(missing.to_string(), "message 'm-2' has no receipt handle");
    }

    #[test]
    fn source_is_exposed() {
        let io = std::io::Error::other("timeout");
        let err = Error::delete_with_source("m-1", "timeout", io);
        assert!(std::error::Error::source(&err).is_some());
    }
}
