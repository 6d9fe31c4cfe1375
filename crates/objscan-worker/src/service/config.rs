//! Worker configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use objscan_object::providers::S3Credentials;
use objscan_queue::{ReceiveOptions, SqsConfig};
use serde::{Deserialize, Serialize};

use crate::inspect::DEFAULT_MAX_LINE_LENGTH;
use crate::{Result, WorkerError};

/// Default pause after a failed receive.
pub const DEFAULT_ERROR_BACKOFF_SECS: u64 = 5;

/// Complete worker configuration.
///
/// Combines connection configuration for the queue and object store with
/// loop behavior settings. This is the main configuration type passed to
/// [`WorkerState::from_config`].
///
/// [`WorkerState::from_config`]: super::WorkerState::from_config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct WorkerConfig {
    /// Queue connection configuration.
    #[cfg_attr(feature = "config", command(flatten))]
    pub sqs: SqsConfig,

    /// Object store credential template.
    #[cfg_attr(feature = "config", command(flatten))]
    #[serde(default)]
    pub s3: S3Credentials,

    /// Receive call parameters.
    #[cfg_attr(feature = "config", command(flatten))]
    #[serde(default)]
    pub receive: ReceiveOptions,

    /// Seconds to wait after a failed receive before polling again.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "error-backoff-secs",
            env = "ERROR_BACKOFF_SECS",
            default_value_t = DEFAULT_ERROR_BACKOFF_SECS
        )
    )]
    #[serde(default = "default_error_backoff_secs")]
    pub error_backoff_secs: u64,

    /// Longest line, in bytes, an object may contain and still be textual.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "max-line-length",
            env = "MAX_LINE_LENGTH",
            default_value_t = DEFAULT_MAX_LINE_LENGTH
        )
    )]
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
}

fn default_error_backoff_secs() -> u64 {
    DEFAULT_ERROR_BACKOFF_SECS
}

fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LENGTH
}

impl WorkerConfig {
    /// Creates a configuration with default behavior settings.
    ///
    /// The object store template inherits the queue's region.
    pub fn new(sqs: SqsConfig) -> Self {
        let s3 = S3Credentials::new(sqs.region());
        Self {
            sqs,
            s3,
            receive: ReceiveOptions::default(),
            error_backoff_secs: DEFAULT_ERROR_BACKOFF_SECS,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }

    /// Sets the receive parameters.
    #[must_use]
    pub fn with_receive(mut self, receive: ReceiveOptions) -> Self {
        self.receive = receive;
        self
    }

    /// Sets the backoff after a failed receive.
    #[must_use]
    pub fn with_error_backoff_secs(mut self, secs: u64) -> Self {
        self.error_backoff_secs = secs;
        self
    }

    /// Sets the maximum line length.
    #[must_use]
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// Pause after a failed receive.
    #[inline]
    pub fn error_backoff(&self) -> Duration {
        Duration::from_secs(self.error_backoff_secs)
    }

    /// Object store template with the region shared from the queue config.
    pub fn s3_template(&self) -> S3Credentials {
        S3Credentials {
            region: self.sqs.region().to_string(),
            ..self.s3.clone()
        }
    }

    /// Validates the whole configuration.
    pub fn validate(&self) -> Result<()> {
        self.sqs.validate()?;
        self.receive.validate()?;

        if self.error_backoff_secs == 0 {
            return Err(WorkerError::invalid_config(
                "error backoff must be at least one second",
            ));
        }

        if self.max_line_length == 0 {
            return Err(WorkerError::invalid_config(
                "maximum line length must be positive",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUEUE_URL: &str = "https://sqs.us-east-1.amazonaws.com/123456789012/uploads";

    #[test]
    fn defaults() {
        let config = WorkerConfig::new(SqsConfig::new(QUEUE_URL));
        assert_eq!(config.error_backoff(), Duration::from_secs(5));
        assert_eq!(config.max_line_length, 64 * 1024);
        assert_eq!(config.receive, ReceiveOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn template_follows_queue_region() {
        let mut config = WorkerConfig::new(SqsConfig::new(QUEUE_URL).with_region("eu-west-1"));
        config.s3.region = "us-east-1".to_string();
        config.s3.endpoint = Some("http://localhost:9000".to_string());

        let template = config.s3_template();
        assert_eq!(template.region, "eu-west-1");
        assert_eq!(template.endpoint.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn rejects_zero_backoff() {
        let config = WorkerConfig::new(SqsConfig::new(QUEUE_URL)).with_error_backoff_secs(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("backoff"));
    }

    #[test]
    fn rejects_invalid_receive_options() {
        let config = WorkerConfig::new(SqsConfig::new(QUEUE_URL))
            .with_receive(ReceiveOptions::default().with_max_messages(11));
        assert!(matches!(
            config.validate(),
            Err(WorkerError::Queue(objscan_queue::Error::InvalidConfig { .. }))
        ));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: WorkerConfig =
            serde_json::from_str(&format!(r#"{{"sqs":{{"sqs_queue_url":"{QUEUE_URL}"}}}}"#))
                .unwrap();
        assert_eq!(config.sqs.region(), "us-east-1");
        assert_eq!(config.error_backoff_secs, 5);
        assert_eq!(config.s3_template().region, "us-east-1");
    }
}
