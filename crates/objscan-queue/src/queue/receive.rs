//! Parameters of a single receive call.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// Default values
const DEFAULT_MAX_MESSAGES: u32 = 10;
const DEFAULT_WAIT_SECS: u32 = 20;
const DEFAULT_VISIBILITY_SECS: u32 = 30;

// Service limits
const MAX_BATCH: u32 = 10;
const MAX_WAIT_SECS: u32 = 20;
const MAX_VISIBILITY_SECS: u32 = 12 * 60 * 60;

/// Batch size, long-poll wait and visibility timeout for receive calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ReceiveOptions {
    /// Maximum messages returned by one receive call (1-10)
    #[cfg_attr(
        feature = "config",
        arg(
            long = "receive-max-messages",
            env = "RECEIVE_MAX_MESSAGES",
            default_value_t = DEFAULT_MAX_MESSAGES
        )
    )]
    #[serde(default = "default_max_messages")]
    pub receive_max_messages: u32,

    /// Long-poll wait in seconds (0-20)
    #[cfg_attr(
        feature = "config",
        arg(
            long = "receive-wait-secs",
            env = "RECEIVE_WAIT_SECS",
            default_value_t = DEFAULT_WAIT_SECS
        )
    )]
    #[serde(default = "default_wait_secs")]
    pub receive_wait_secs: u32,

    /// Seconds a delivered message stays hidden from other consumers
    #[cfg_attr(
        feature = "config",
        arg(
            long = "receive-visibility-secs",
            env = "RECEIVE_VISIBILITY_SECS",
            default_value_t = DEFAULT_VISIBILITY_SECS
        )
    )]
    #[serde(default = "default_visibility_secs")]
    pub receive_visibility_secs: u32,
}

const fn default_max_messages() -> u32 {
    DEFAULT_MAX_MESSAGES
}

const fn default_wait_secs() -> u32 {
    DEFAULT_WAIT_SECS
}

const fn default_visibility_secs() -> u32 {
    DEFAULT_VISIBILITY_SECS
}

impl Default for ReceiveOptions {
    fn default() -> Self {
        Self {
            receive_max_messages: DEFAULT_MAX_MESSAGES,
            receive_wait_secs: DEFAULT_WAIT_SECS,
            receive_visibility_secs: DEFAULT_VISIBILITY_SECS,
        }
    }
}

impl ReceiveOptions {
    /// Maximum number of messages per batch.
    #[inline]
    pub fn max_messages(&self) -> u32 {
        self.receive_max_messages
    }

    /// Long-poll wait.
    #[inline]
    pub fn wait_time(&self) -> Duration {
        Duration::from_secs(u64::from(self.receive_wait_secs))
    }

    /// Visibility timeout applied to each delivered message.
    #[inline]
    pub fn visibility_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.receive_visibility_secs))
    }

    /// Set the batch size.
    #[must_use]
    pub fn with_max_messages(mut self, max_messages: u32) -> Self {
        self.receive_max_messages = max_messages;
        self
    }

    /// Set the long-poll wait in seconds.
    #[must_use]
    pub fn with_wait_secs(mut self, secs: u32) -> Self {
        self.receive_wait_secs = secs;
        self
    }

    /// Set the visibility timeout in seconds.
    #[must_use]
    pub fn with_visibility_secs(mut self, secs: u32) -> Self {
        self.receive_visibility_secs = secs;
        self
    }

    /// Validates the options against the queue service limits.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_BATCH).contains(&self.receive_max_messages) {
            return Err(Error::invalid_config(format!(
                "receive batch size {} must be between 1 and {MAX_BATCH}",
                self.receive_max_messages
            )));
        }

        if self.receive_wait_secs > MAX_WAIT_SECS {
            return Err(Error::invalid_config(format!(
                "long-poll wait {}s exceeds {MAX_WAIT_SECS}s",
                self.receive_wait_secs
            )));
        }

        if self.receive_visibility_secs > MAX_VISIBILITY_SECS {
            return Err(Error::invalid_config(format!(
                "visibility timeout {}s exceeds {MAX_VISIBILITY_SECS}s",
                self.receive_visibility_secs
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_receive_window() {
        let options = ReceiveOptions::default();
        assert_eq!(options.max_messages(), 10);
        assert_eq!(options.wait_time(), Duration::from_secs(20));
        assert_eq!(options.visibility_timeout(), Duration::from_secs(30));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn validation_rejects_out_of_range() {
        assert!(ReceiveOptions::default().with_max_messages(0).validate().is_err());
        assert!(ReceiveOptions::default().with_max_messages(11).validate().is_err());
        assert!(ReceiveOptions::default().with_wait_secs(21).validate().is_err());
        assert!(
            ReceiveOptions::default()
                .with_visibility_secs(MAX_VISIBILITY_SECS + 1)
                .validate()
                .is_err()
        );
        assert!(ReceiveOptions::default().with_wait_secs(0).validate().is_ok());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let options: ReceiveOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ReceiveOptions::default());
    }
}
