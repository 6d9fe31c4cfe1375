//! Report log sinks.
//!
//! Report lines are plain text. They are passed explicitly to the components
//! that write them; there is no global logger.

mod dual;
mod memory;

pub use dual::DualLogSink;
pub use memory::MemoryLogSink;

/// Destination for report lines.
///
/// Writing never fails from the caller's point of view; implementations
/// surface their own write errors through `tracing`.
pub trait LogSink: Send + Sync {
    /// Appends one line.
    fn log_line(&self, line: &str);
}
