//! Worker configuration and connected state.

mod config;
mod state;

pub use config::{DEFAULT_ERROR_BACKOFF_SECS, WorkerConfig};
pub use state::WorkerState;
