//! Tracing initialization and configuration.
//!
//! Diagnostics always go to stderr; stdout carries the report log.

use std::io;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Initializes human-readable structured logging.
///
/// The log level can be configured via the `RUST_LOG` environment variable.
/// If not set, defaults to `info` level.
///
/// ```bash
/// RUST_LOG=debug objscan
/// RUST_LOG=objscan_worker=trace,aws_config=warn objscan
/// ```
pub(super) fn init_text_tracing() -> anyhow::Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(create_env_filter()?)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    Ok(())
}

/// Initializes newline-delimited JSON logging.
pub(super) fn init_json_tracing() -> anyhow::Result<()> {
    let fmt_layer = fmt::layer()
        .json()
        .with_writer(io::stderr)
        .with_target(true)
        .with_current_span(true);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(create_env_filter()?)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    Ok(())
}

/// Creates an environment filter for tracing.
fn create_env_filter() -> anyhow::Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {e}"))
}
