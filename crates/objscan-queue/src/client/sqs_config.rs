//! SQS connection configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// Default values
const DEFAULT_REGION: &str = "us-east-1";

/// Configuration for the SQS queue client.
///
/// Credentials are not part of the configuration; they come from the default
/// AWS provider chain (environment, profile, web identity, instance metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct SqsConfig {
    /// URL of the queue to drain
    #[cfg_attr(feature = "config", arg(long = "sqs-queue-url", env = "SQS_QUEUE_URL"))]
    pub sqs_queue_url: String,

    /// AWS region for the queue and object store clients
    #[cfg_attr(
        feature = "config",
        arg(long = "aws-region", env = "AWS_REGION", default_value = DEFAULT_REGION)
    )]
    #[serde(default = "default_region")]
    pub aws_region: String,

    /// Endpoint override (e.g. LocalStack or ElasticMQ)
    #[cfg_attr(feature = "config", arg(long = "sqs-endpoint", env = "SQS_ENDPOINT"))]
    #[serde(default)]
    pub sqs_endpoint: Option<String>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl SqsConfig {
    /// Create a new configuration for `queue_url` in the default region.
    pub fn new(queue_url: impl Into<String>) -> Self {
        Self {
            sqs_queue_url: queue_url.into(),
            aws_region: default_region(),
            sqs_endpoint: None,
        }
    }

    /// Returns the queue URL.
    #[inline]
    pub fn queue_url(&self) -> &str {
        &self.sqs_queue_url
    }

    /// Returns the region.
    #[inline]
    pub fn region(&self) -> &str {
        &self.aws_region
    }

    /// Returns the endpoint override, if set.
    #[inline]
    pub fn endpoint(&self) -> Option<&str> {
        self.sqs_endpoint.as_deref()
    }

    /// Set the region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.aws_region = region.into();
        self
    }

    /// Set the endpoint override.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.sqs_endpoint = Some(endpoint.into());
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let url = self.sqs_queue_url.trim();
        if url.is_empty() {
            return Err(Error::invalid_config("queue URL must not be empty"));
        }

        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(Error::invalid_config(format!(
                "queue URL '{url}' must start with http:// or https://"
            )));
        }

        if self.aws_region.trim().is_empty() {
            return Err(Error::invalid_config("region must not be empty"));
        }

        if let Some(endpoint) = self.endpoint()
            && !endpoint.starts_with("https://")
            && !endpoint.starts_with("http://")
        {
            return Err(Error::invalid_config(format!(
                "endpoint '{endpoint}' must start with http:// or https://"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUEUE_URL: &str = "https://sqs.us-east-1.amazonaws.com/123456789012/bucket-events";

    #[test]
    fn test_config_builder() {
        let config = SqsConfig::new(QUEUE_URL)
            .with_region("eu-central-1")
            .with_endpoint("http://localhost:4566");

        assert_eq!(config.queue_url(), QUEUE_URL);
        assert_eq!(config.region(), "eu-central-1");
        assert_eq!(config.endpoint(), Some("http://localhost:4566"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_region() {
        let config = SqsConfig::new(QUEUE_URL);
        assert_eq!(config.region(), "us-east-1");
        assert!(config.endpoint().is_none());
    }

    #[test]
    fn test_validation() {
        assert!(SqsConfig::new("").validate().is_err());
        assert!(SqsConfig::new("sqs://queue").validate().is_err());
        assert!(SqsConfig::new(QUEUE_URL).with_region(" ").validate().is_err());
        assert!(
            SqsConfig::new(QUEUE_URL)
                .with_endpoint("localhost:4566")
                .validate()
                .is_err()
        );
    }
}
