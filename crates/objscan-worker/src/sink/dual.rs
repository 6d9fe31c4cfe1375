//! File plus console sink.

use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use jiff::Zoned;

use super::LogSink;
use crate::{Result, TRACING_TARGET_SINK, WorkerError};

/// Timestamp prefix of every line, e.g. `2024/05/01 13:45:07`.
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Sink writing identical, timestamped lines to an append-only file and to
/// the console.
///
/// Opened once at startup and closed on shutdown. No rotation.
pub struct DualLogSink {
    path: PathBuf,
    file: Mutex<LineWriter<File>>,
    console: Mutex<Box<dyn Write + Send>>,
}

impl DualLogSink {
    /// Opens (or creates) the log file at `path` in append mode and echoes to stdout.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_console(path, Box::new(io::stdout()))
    }

    /// Opens the log file at `path` and echoes to `console`.
    pub fn with_console(path: impl AsRef<Path>, console: Box<dyn Write + Send>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                WorkerError::sink_with_source(
                    format!("failed to open log file '{}'", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            path,
            file: Mutex::new(LineWriter::new(file)),
            console: Mutex::new(console),
        })
    }

    /// Path of the log file.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes both sinks.
    pub fn close(&self) -> io::Result<()> {
        if let Ok(mut file) = self.file.lock() {
            file.flush()?;
            file.get_ref().sync_all()?;
        }
        if let Ok(mut console) = self.console.lock() {
            console.flush()?;
        }
        Ok(())
    }

    fn stamp(line: &str) -> String {
        format!("{} {line}", Zoned::now().strftime(TIMESTAMP_FORMAT))
    }
}

impl LogSink for DualLogSink {
    fn log_line(&self, line: &str) {
        let stamped = Self::stamp(line);

        let written = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))
            .and_then(|mut file| writeln!(file, "{stamped}"));
        if let Err(error) = written {
            tracing::warn!(
                target: TRACING_TARGET_SINK,
                path = %self.path.display(),
                error = %error,
                "Failed to write to log file"
            );
        }

        let echoed = self
            .console
            .lock()
            .map_err(|_| io::Error::other("console lock poisoned"))
            .and_then(|mut console| {
                writeln!(console, "{stamped}")?;
                console.flush()
            });
        if let Err(error) = echoed {
            tracing::warn!(
                target: TRACING_TARGET_SINK,
                error = %error,
                "Failed to write to console"
            );
        }
    }
}
