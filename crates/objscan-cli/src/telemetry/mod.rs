//! Diagnostics output.

mod tracing;

use anyhow::Context;

use crate::config::LogFormat;

/// Initializes the tracing subscriber in the requested format.
///
/// # Errors
///
/// Returns an error if the tracing subscriber fails to initialize.
pub(crate) fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    match format {
        LogFormat::Text => tracing::init_text_tracing().context("Failed to initialize tracing"),
        LogFormat::Json => tracing::init_json_tracing().context("Failed to initialize tracing"),
    }
}
