//! Object retrieval and content classification.
//!
//! Classification is a heuristic: content is textual when it decodes cleanly
//! line by line. It detects failures of line-oriented decoding, not binary
//! formats in general.

mod line_scanner;

use std::sync::Arc;

pub use line_scanner::{DEFAULT_MAX_LINE_LENGTH, LineScanner, ScanError};
use objscan_object::fetch::ObjectFetcher;

use crate::notification::Notification;
use crate::{Result, TRACING_TARGET_PROCESSOR, WorkerError};

/// Outcome of classifying object content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Content decoded cleanly; holds the first line (empty for empty content).
    Textual { first_line: String },
    /// Line decoding failed somewhere in the content.
    NonTextual,
}

impl Classification {
    /// Classifies `content` by scanning all of its lines.
    pub fn of(content: &[u8], max_line_length: usize) -> Self {
        let mut first_line = None;
        for line in LineScanner::new(content, max_line_length) {
            match line {
                Ok(text) => {
                    if first_line.is_none() {
                        first_line = Some(text.to_owned());
                    }
                }
                Err(error) => {
                    tracing::debug!(
                        target: TRACING_TARGET_PROCESSOR,
                        error = %error,
                        "Content failed line decoding"
                    );
                    return Self::NonTextual;
                }
            }
        }

        Self::Textual {
            first_line: first_line.unwrap_or_default(),
        }
    }
}

/// Classification of one notified object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    notification: Notification,
    classification: Classification,
}

impl Inspection {
    /// Pairs a classification with the notification it was derived from.
    pub fn new(notification: Notification, classification: Classification) -> Self {
        Self {
            notification,
            classification,
        }
    }

    /// Whether the object decoded cleanly as text.
    #[inline]
    pub fn is_textual(&self) -> bool {
        matches!(self.classification, Classification::Textual { .. })
    }

    /// First line of a textual object; empty for non-textual objects.
    #[inline]
    pub fn first_line(&self) -> &str {
        match &self.classification {
            Classification::Textual { first_line } => first_line,
            Classification::NonTextual => "",
        }
    }

    /// The notification this inspection was derived from.
    #[inline]
    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    /// The classification.
    #[inline]
    pub fn classification(&self) -> &Classification {
        &self.classification
    }
}

/// Fetches notified objects and classifies their content.
#[derive(Clone)]
pub struct ObjectInspector {
    fetcher: Arc<dyn ObjectFetcher>,
    max_line_length: usize,
}

impl ObjectInspector {
    /// Creates an inspector reading through `fetcher`.
    pub fn new(fetcher: Arc<dyn ObjectFetcher>) -> Self {
        Self {
            fetcher,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }

    /// Sets the longest line the scanner accepts.
    #[must_use]
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// Fetches the complete object and classifies it.
    ///
    /// Fails only when retrieval fails; classification itself cannot fail.
    #[tracing::instrument(
        skip(self, notification),
        fields(bucket = %notification.bucket(), key = %notification.key()),
        target = TRACING_TARGET_PROCESSOR
    )]
    pub async fn inspect(&self, notification: Notification) -> Result<Inspection> {
        let content = self
            .fetcher
            .fetch(notification.bucket(), notification.key())
            .await
            .map_err(|e| WorkerError::fetch(notification.bucket(), notification.key(), e))?;

        let classification = Classification::of(&content, self.max_line_length);

        tracing::debug!(
            target: TRACING_TARGET_PROCESSOR,
            size = content.len(),
            textual = matches!(classification, Classification::Textual { .. }),
            "Classified object"
        );

        Ok(Inspection::new(notification, classification))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use bytes::Bytes;
    use object_store::memory::InMemory;
    use objscan_object::client::ObjectStoreClient;
    use objscan_object::fetch::S3Fetcher;
    use objscan_object::providers::S3Credentials;

    use super::*;

    /// Fetcher serving `objects` from an in-memory bucket named `b1`.
    pub(crate) async fn memory_fetcher(objects: &[(&str, &[u8])]) -> Arc<S3Fetcher> {
        let client = ObjectStoreClient::new(InMemory::new());
        for (key, data) in objects {
            client.put(key, Bytes::copy_from_slice(data)).await.unwrap();
        }
        Arc::new(S3Fetcher::new(S3Credentials::new("us-east-1")).with_client("b1", client))
    }

    fn notification(key: &str) -> Notification {
        let payload = format!(
            r#"{{"Records":[{{"s3":{{"bucket":{{"name":"b1"}},"object":{{"key":"{key}"}}}}}}]}}"#
        );
        Notification::decode(&payload).unwrap()
    }

    #[test]
    fn classifies_text() {
        assert_eq!(
            Classification::of(b"hello\nworld", DEFAULT_MAX_LINE_LENGTH),
            Classification::Textual {
                first_line: "hello".to_string()
            }
        );
    }

    #[test]
    fn classifies_empty_as_textual() {
        assert_eq!(
            Classification::of(b"", DEFAULT_MAX_LINE_LENGTH),
            Classification::Textual {
                first_line: String::new()
            }
        );
    }

    #[test]
    fn classifies_binary() {
        let png = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";
        assert_eq!(
            Classification::of(png, DEFAULT_MAX_LINE_LENGTH),
            Classification::NonTextual
        );
    }

    #[test]
    fn late_decoding_failure_is_non_textual() {
        assert_eq!(
            Classification::of(b"looks fine\n\xc3\x28", DEFAULT_MAX_LINE_LENGTH),
            Classification::NonTextual
        );
    }

    #[test]
    fn overlong_line_is_non_textual() {
        assert_eq!(
            Classification::of(b"0123456789", 4),
            Classification::NonTextual
        );
    }

    #[test]
    fn non_textual_has_empty_first_line() {
        let inspection = Inspection::new(notification("k"), Classification::NonTextual);
        assert!(!inspection.is_textual());
        assert_eq!(inspection.first_line(), "");
    }

    #[tokio::test]
    async fn inspects_textual_object() {
        let fetcher = memory_fetcher(&[("k1", b"hello\nworld".as_slice())]).await;
        let inspector = ObjectInspector::new(fetcher);

        let inspection = inspector.inspect(notification("k1")).await.unwrap();
        assert!(inspection.is_textual());
        assert_eq!(inspection.first_line(), "hello");
        assert_eq!(inspection.notification().key(), "k1");
    }

    #[tokio::test]
    async fn inspects_binary_object() {
        let fetcher = memory_fetcher(&[("img", b"\xff\xd8\xff\xe0".as_slice())]).await;
        let inspector = ObjectInspector::new(fetcher);

        let inspection = inspector.inspect(notification("img")).await.unwrap();
        assert!(!inspection.is_textual());
        assert_eq!(inspection.first_line(), "");
    }

    #[tokio::test]
    async fn respects_configured_line_limit() {
        let fetcher = memory_fetcher(&[("wide", b"abcdefgh\n".as_slice())]).await;
        let inspector = ObjectInspector::new(fetcher).with_max_line_length(4);

        let inspection = inspector.inspect(notification("wide")).await.unwrap();
        assert!(!inspection.is_textual());
    }

    #[tokio::test]
    async fn missing_object_is_fetch_error() {
        let fetcher = memory_fetcher(&[]).await;
        let inspector = ObjectInspector::new(fetcher);

        let err = inspector.inspect(notification("gone")).await.unwrap_err();
        match err {
            WorkerError::Fetch { bucket, key, source } => {
                assert_eq!(bucket, "b1");
                assert_eq!(key, "gone");
                assert!(source.is_not_found());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
