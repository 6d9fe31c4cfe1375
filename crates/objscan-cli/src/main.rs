#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod runtime;
mod telemetry;

use std::process;
use std::sync::Arc;

use anyhow::Context;
use objscan_worker::{DualLogSink, LogSink, QueueConsumer, WorkerState};

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "objscan_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "objscan_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "objscan_cli::config";

/// First line written to the report log once the consumer is ready.
const BANNER: &str = "Listening for messages from SQS queue...";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing(cli.log.log_format)?;
    cli.log();
    cli.validate()?;

    let sink = Arc::new(
        DualLogSink::open(&cli.log.log_file).context("failed to open report log")?,
    );

    let state = WorkerState::from_config(&cli.worker, sink.clone())
        .await
        .context("failed to create worker state")?;
    let consumer = QueueConsumer::new(state, &cli.worker);

    sink.log_line(BANNER);
    runtime::run_until_shutdown(&consumer).await;

    sink.close().context("failed to flush report log")?;
    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        log_file = %sink.path().display(),
        "Report log closed"
    );

    Ok(())
}
