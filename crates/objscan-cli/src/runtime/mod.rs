//! Consumer lifecycle.

mod shutdown;

use objscan_worker::QueueConsumer;
use shutdown::shutdown_signal;

use crate::TRACING_TARGET_SHUTDOWN;

/// Runs the consumer until SIGINT or SIGTERM.
///
/// The loop never returns on its own. On a signal its future is dropped at
/// the current await point, so an in-flight message may be left undeleted
/// and is redelivered after its visibility timeout.
pub async fn run_until_shutdown(consumer: &QueueConsumer) {
    tokio::select! {
        never = consumer.run() => match never {},
        () = shutdown_signal() => {
            tracing::info!(
                target: TRACING_TARGET_SHUTDOWN,
                "Consumer stopped"
            );
        }
    }
}
