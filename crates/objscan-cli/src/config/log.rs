//! Report log and diagnostics output configuration.

use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Default report log file, relative to the working directory.
const DEFAULT_LOG_FILE: &str = "s3_events.log";

/// Output format of `tracing` diagnostics on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Report log and diagnostics configuration.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct LogConfig {
    /// File the report log is appended to
    #[arg(long = "log-file", env = "LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Diagnostics output format
    #[arg(long = "log-format", env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    #[serde(default)]
    pub log_format: LogFormat,
}

impl LogConfig {
    /// Validates the output configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.log_file.as_os_str().is_empty() {
            bail!("report log file path must not be empty");
        }
        Ok(())
    }

    /// Logs the output configuration.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            log_file = %self.log_file.display(),
            log_format = ?self.log_format,
            "Log configuration"
        );
    }
}
