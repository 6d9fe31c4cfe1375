//! Fetcher that resolves a client per bucket.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;

use super::ObjectFetcher;
use crate::client::ObjectStoreClient;
use crate::providers::{Client, S3Credentials, S3Provider};
use crate::{Result, TRACING_TARGET_FETCH};

/// Default number of bucket clients kept in the cache.
pub const DEFAULT_MAX_CACHED_BUCKETS: usize = 64;

/// [`ObjectFetcher`] for S3 notifications.
///
/// Each notification names its own bucket. Clients are built lazily from the
/// credentials template on first use and kept for the process lifetime.
///
/// Bucket names come from message bodies, so the cache is bounded: once
/// `max_cached_buckets` clients are held, clients for further buckets are
/// built per fetch and dropped afterwards.
pub struct S3Fetcher {
    template: S3Credentials,
    clients: Mutex<HashMap<String, ObjectStoreClient>>,
    max_cached_buckets: usize,
}

impl S3Fetcher {
    /// Creates a fetcher that builds bucket clients from `template`.
    pub fn new(template: S3Credentials) -> Self {
        Self {
            template,
            clients: Mutex::new(HashMap::new()),
            max_cached_buckets: DEFAULT_MAX_CACHED_BUCKETS,
        }
    }

    /// Sets how many bucket clients are cached.
    #[must_use]
    pub fn with_max_cached_buckets(mut self, max_cached_buckets: usize) -> Self {
        self.max_cached_buckets = max_cached_buckets;
        self
    }

    /// Registers a prebuilt client for `bucket`.
    #[must_use]
    pub fn with_client(mut self, bucket: impl Into<String>, client: ObjectStoreClient) -> Self {
        self.clients.get_mut().insert(bucket.into(), client);
        self
    }

    /// Returns the credentials template.
    #[inline]
    pub fn template(&self) -> &S3Credentials {
        &self.template
    }

    /// Returns the cached client for `bucket`, building it if needed.
    async fn client_for(&self, bucket: &str) -> Result<ObjectStoreClient> {
        let mut clients = self.clients.lock().await;
        if let Some(client) = clients.get(bucket) {
            return Ok(client.clone());
        }

        let client = S3Provider::connect(&self.template.for_bucket(bucket))?.into_inner();
        if clients.len() < self.max_cached_buckets {
            clients.insert(bucket.to_string(), client.clone());
        } else {
            tracing::warn!(
                target: TRACING_TARGET_FETCH,
                bucket,
                limit = self.max_cached_buckets,
                "Bucket client cache full, client not cached"
            );
        }

        tracing::debug!(
            target: TRACING_TARGET_FETCH,
            bucket,
            region = %self.template.region,
            cached = clients.len(),
            "Built client for bucket"
        );

        Ok(client)
    }
}

#[async_trait]
impl ObjectFetcher for S3Fetcher {
    #[tracing::instrument(name = "object.fetch", skip(self), target = TRACING_TARGET_FETCH)]
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Bytes> {
        let client = self.client_for(bucket).await?;
        let output = client.get(key).await?;
        Ok(output.data)
    }
}

#[cfg(test)]
mod tests {
    use object_store::memory::InMemory;

    use super::*;

    async fn seeded_client(key: &str, data: &'static str) -> ObjectStoreClient {
        let client = ObjectStoreClient::new(InMemory::new());
        client.put(key, Bytes::from(data)).await.unwrap();
        client
    }

    #[tokio::test]
    async fn fetch_from_registered_bucket() {
        let client = seeded_client("k1", "hello\nworld").await;
        let fetcher = S3Fetcher::new(S3Credentials::new("us-east-1")).with_client("b1", client);

        let data = fetcher.fetch("b1", "k1").await.unwrap();
        assert_eq!(data, Bytes::from("hello\nworld"));
    }

    #[tokio::test]
    async fn fetch_missing_key_is_not_found() {
        let client = seeded_client("k1", "x").await;
        let fetcher = S3Fetcher::new(S3Credentials::new("us-east-1")).with_client("b1", client);

        let err = fetcher.fetch("b1", "other").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn buckets_are_isolated() {
        let first = seeded_client("shared", "first").await;
        let second = seeded_client("shared", "second").await;
        let fetcher = S3Fetcher::new(S3Credentials::new("us-east-1"))
            .with_client("b1", first)
            .with_client("b2", second);

        assert_eq!(fetcher.fetch("b1", "shared").await.unwrap(), "first");
        assert_eq!(fetcher.fetch("b2", "shared").await.unwrap(), "second");
    }

    #[tokio::test]
    async fn trailing_slash_key_does_not_read_sibling() {
        let client = seeded_client("folder", "other object").await;
        let fetcher = S3Fetcher::new(S3Credentials::new("us-east-1")).with_client("b1", client);

        let err = fetcher.fetch("b1", "folder/").await.unwrap_err();
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("folder/"));
    }

    fn static_template() -> S3Credentials {
        S3Credentials {
            access_key_id: Some("key".to_string()),
            secret_access_key: Some("secret".to_string()),
            ..S3Credentials::new("us-east-1").with_endpoint("http://localhost:9000")
        }
    }

    #[tokio::test]
    async fn cache_is_bounded() {
        let fetcher = S3Fetcher::new(static_template()).with_max_cached_buckets(1);

        fetcher.client_for("first").await.unwrap();
        fetcher.client_for("second").await.unwrap();
        fetcher.client_for("third").await.unwrap();

        let clients = fetcher.clients.lock().await;
        assert_eq!(clients.len(), 1);
        assert!(clients.contains_key("first"));
    }

    #[tokio::test]
    async fn unknown_bucket_builds_and_caches_client() {
        let fetcher = S3Fetcher::new(static_template());

        fetcher.client_for("fresh").await.unwrap();
        fetcher.client_for("fresh").await.unwrap();
        assert_eq!(fetcher.clients.lock().await.len(), 1);
    }
}
