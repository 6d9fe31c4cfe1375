//! Processing of a single message body.

use std::sync::Arc;

use crate::inspect::{Inspection, ObjectInspector};
use crate::notification::Notification;
use crate::sink::LogSink;
use crate::{Result, TRACING_TARGET_PROCESSOR};

/// Runs decode, inspect and report for one message body.
#[derive(Clone)]
pub struct MessageProcessor {
    inspector: ObjectInspector,
    sink: Arc<dyn LogSink>,
}

impl MessageProcessor {
    /// Creates a processor reporting to `sink`.
    pub fn new(inspector: ObjectInspector, sink: Arc<dyn LogSink>) -> Self {
        Self { inspector, sink }
    }

    /// Processes one message body.
    ///
    /// A decoded and fetched object produces exactly one report line: its
    /// first line when textual, a skip line otherwise. A decode or fetch
    /// failure produces one diagnostic line and is returned to the caller.
    #[tracing::instrument(skip_all, target = TRACING_TARGET_PROCESSOR)]
    pub async fn process(&self, body: &str) -> Result<Inspection> {
        let notification = match Notification::decode(body) {
            Ok(notification) => notification,
            Err(err) => {
                tracing::debug!(
                    target: TRACING_TARGET_PROCESSOR,
                    error = %err,
                    "Failed to decode notification"
                );
                self.sink
                    .log_line(&format!("Failed to extract S3 details: {err}"));
                return Err(err.into());
            }
        };

        let inspection = match self.inspector.inspect(notification).await {
            Ok(inspection) => inspection,
            Err(err) => {
                tracing::debug!(
                    target: TRACING_TARGET_PROCESSOR,
                    error = %err,
                    "Failed to inspect object"
                );
                self.sink.log_line(&format!("Failed to process file: {err}"));
                return Err(err);
            }
        };

        self.report(&inspection);
        Ok(inspection)
    }

    fn report(&self, inspection: &Inspection) {
        let notification = inspection.notification();
        tracing::info!(
            target: TRACING_TARGET_PROCESSOR,
            bucket = %notification.bucket(),
            key = %notification.key(),
            textual = inspection.is_textual(),
            "Inspected object"
        );

        let line = if inspection.is_textual() {
            format!("First line of textual file: {}", inspection.first_line())
        } else {
            format!("Non-textual file or file skipped: {notification}")
        };
        self.sink.log_line(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WorkerError;
    use crate::inspect::tests::memory_fetcher;
    use crate::sink::MemoryLogSink;

    const VALID: &str = r#"{"Records":[{"s3":{"bucket":{"name":"b1"},"object":{"key":"k1"}}}]}"#;

    async fn processor(objects: &[(&str, &[u8])]) -> (MessageProcessor, Arc<MemoryLogSink>) {
        let sink = Arc::new(MemoryLogSink::new());
        let inspector = ObjectInspector::new(memory_fetcher(objects).await);
        (MessageProcessor::new(inspector, sink.clone()), sink)
    }

    #[tokio::test]
    async fn reports_first_line_of_text() {
        let (processor, sink) = processor(&[("k1", b"hello\nworld".as_slice())]).await;

        let inspection = processor.process(VALID).await.unwrap();
        assert!(inspection.is_textual());
        assert_eq!(sink.lines(), vec!["First line of textual file: hello"]);
    }

    #[tokio::test]
    async fn reports_empty_first_line() {
        let (processor, sink) = processor(&[("k1", b"".as_slice())]).await;

        processor.process(VALID).await.unwrap();
        assert_eq!(sink.lines(), vec!["First line of textual file: "]);
    }

    #[tokio::test]
    async fn reports_skip_for_binary() {
        let (processor, sink) = processor(&[("k1", b"\x00\xff\x10".as_slice())]).await;

        let inspection = processor.process(VALID).await.unwrap();
        assert!(!inspection.is_textual());
        assert_eq!(sink.lines(), vec!["Non-textual file or file skipped: b1/k1"]);
    }

    #[tokio::test]
    async fn decode_failure_logs_once_and_returns_error() {
        let (processor, sink) = processor(&[]).await;

        let err = processor.process(r#"{"Records":[]}"#).await.unwrap_err();
        assert!(matches!(err, WorkerError::Decode(_)));
        assert_eq!(
            sink.lines(),
            vec!["Failed to extract S3 details: no records found in S3 event"]
        );
    }

    #[tokio::test]
    async fn fetch_failure_logs_once_and_returns_error() {
        let (processor, sink) = processor(&[]).await;

        let err = processor.process(VALID).await.unwrap_err();
        assert!(matches!(err, WorkerError::Fetch { .. }));

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Failed to process file: failed to fetch b1/k1"));
    }
}
