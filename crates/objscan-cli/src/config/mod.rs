//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── worker: WorkerConfig
//! │   ├── sqs: SqsConfig          # Queue URL, region, endpoint
//! │   ├── s3: S3Credentials       # Object store endpoint
//! │   ├── receive: ReceiveOptions # Batch size, long-poll, visibility
//! │   └── backoff, line limit
//! └── log: LogConfig              # Report log file, diagnostics format
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod log;

use std::process;

use anyhow::Context;
use clap::Parser;
pub use log::{LogConfig, LogFormat};
use objscan_worker::WorkerConfig;
use serde::{Deserialize, Serialize};

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "objscan")]
#[command(about = "Reports the first line of every textual object uploaded to S3")]
#[command(version)]
pub struct Cli {
    /// Queue, object store and loop configuration.
    #[clap(flatten)]
    pub worker: WorkerConfig,

    /// Report log and diagnostics output.
    #[clap(flatten)]
    pub log: LogConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments, so its values act
    /// as environment defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.worker
            .validate()
            .context("invalid worker configuration")?;
        self.log.validate().context("invalid log configuration")?;
        Ok(())
    }

    /// Logs configuration (no credentials are part of it).
    pub fn log(&self) {
        Self::log_build_info();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            queue_url = %self.worker.sqs.queue_url(),
            region = %self.worker.sqs.region(),
            sqs_endpoint = ?self.worker.sqs.endpoint(),
            s3_endpoint = ?self.worker.s3.endpoint,
            "Connection configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            max_messages = self.worker.receive.max_messages(),
            wait_secs = self.worker.receive.wait_time().as_secs(),
            visibility_secs = self.worker.receive.visibility_timeout().as_secs(),
            error_backoff_secs = self.worker.error_backoff_secs,
            max_line_length = self.worker.max_line_length,
            "Consumer configuration"
        );

        self.log.log();
    }

    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    const QUEUE_URL: &str = "https://sqs.us-east-1.amazonaws.com/123456789012/uploads";

    #[test]
    fn parses_minimal_arguments() {
        let cli = Cli::try_parse_from(["objscan", "--sqs-queue-url", QUEUE_URL]).unwrap();

        assert_eq!(cli.worker.sqs.queue_url(), QUEUE_URL);
        assert_eq!(cli.worker.receive.max_messages(), 10);
        assert_eq!(cli.worker.receive.wait_time().as_secs(), 20);
        assert_eq!(cli.worker.receive.visibility_timeout().as_secs(), 30);
        assert_eq!(cli.worker.error_backoff_secs, 5);
        assert_eq!(cli.log.log_file, Path::new("s3_events.log"));
        assert_eq!(cli.log.log_format, LogFormat::Text);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::try_parse_from([
            "objscan",
            "--sqs-queue-url",
            QUEUE_URL,
            "--aws-region",
            "eu-central-1",
            "--s3-endpoint",
            "http://localhost:9000",
            "--receive-max-messages",
            "5",
            "--error-backoff-secs",
            "2",
            "--log-file",
            "/tmp/objscan.log",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.worker.sqs.region(), "eu-central-1");
        assert_eq!(cli.worker.s3_template().region, "eu-central-1");
        assert_eq!(
            cli.worker.s3.endpoint.as_deref(),
            Some("http://localhost:9000")
        );
        assert_eq!(cli.worker.receive.max_messages(), 5);
        assert_eq!(cli.worker.error_backoff_secs, 2);
        assert_eq!(cli.log.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_out_of_range_batch() {
        let cli = Cli::try_parse_from([
            "objscan",
            "--sqs-queue-url",
            QUEUE_URL,
            "--receive-max-messages",
            "25",
        ])
        .unwrap();

        let err = cli.validate().unwrap_err();
        assert!(format!("{err:#}").contains("invalid worker configuration"));
    }

    #[test]
    fn rejects_non_http_queue_url() {
        let cli = Cli::try_parse_from(["objscan", "--sqs-queue-url", "uploads"]).unwrap();
        assert!(cli.validate().is_err());
    }
}
