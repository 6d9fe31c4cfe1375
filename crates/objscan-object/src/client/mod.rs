//! Bucket-bound client over [`object_store::ObjectStore`].

use std::sync::Arc;

#[cfg(any(test, feature = "test-utils"))]
use bytes::Bytes;
use object_store::ObjectStore;
#[cfg(any(test, feature = "test-utils"))]
use object_store::PutPayload;
use object_store::path::Path;

use crate::{Error, TRACING_TARGET_CLIENT};

mod get_output;

pub use get_output::GetOutput;

/// Cloneable handle to one bucket of an [`ObjectStore`] backend.
///
/// Keys are used verbatim as store paths. A key that [`Path`] would rewrite
/// (leading or trailing `/`, empty segments, `.` or `..` segments, control
/// characters) is refused instead of silently naming another object.
#[derive(Clone, Debug)]
pub struct ObjectStoreClient(pub Arc<dyn ObjectStore>);

impl ObjectStoreClient {
    /// Wrap a concrete [`ObjectStore`] implementation.
    pub fn new(store: impl ObjectStore) -> Self {
        Self(Arc::new(store))
    }

    /// Reads the complete object stored at `key` into memory.
    ///
    /// No range reads are issued; the body is buffered before returning.
    #[tracing::instrument(name = "object.get", skip(self), target = TRACING_TARGET_CLIENT)]
    pub async fn get(&self, key: &str) -> Result<GetOutput, Error> {
        let response = self
            .0
            .get(&object_path(key)?)
            .await
            .map_err(from_object_store)?;
        let meta = response.meta.clone();
        let data = response.bytes().await.map_err(from_object_store)?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            key,
            size = data.len(),
            e_tag = ?meta.e_tag,
            "Read object"
        );

        Ok(GetOutput { data, meta })
    }

    /// Stores `data` at `key`, replacing any previous object.
    #[cfg(any(test, feature = "test-utils"))]
    pub async fn put(&self, key: &str, data: Bytes) -> Result<(), Error> {
        self.0
            .put(&object_path(key)?, PutPayload::from(data))
            .await
            .map(drop)
            .map_err(from_object_store)
    }
}

/// Converts a key into a store path that addresses exactly that key.
fn object_path(key: &str) -> Result<Path, Error> {
    match Path::parse(key) {
        Ok(path) if path.as_ref() == key => Ok(path),
        Ok(path) => Err(Error::runtime(
            format!("key '{key}' would be read as '{path}'"),
            "object-store",
            false,
        )),
        Err(e) => Err(Error::runtime(
            format!("key '{key}' is not addressable: {e}"),
            "object-store",
            false,
        )
        .with_source(e)),
    }
}

/// Maps a store failure onto the crate error, keeping the cause.
///
/// Missing objects and credential or path problems will not go away on
/// their own; everything else (timeouts, throttling, 5xx) might.
fn from_object_store(err: object_store::Error) -> Error {
    use object_store::Error as StoreError;

    let (retryable, not_found) = match &err {
        StoreError::NotFound { .. } => (false, true),
        StoreError::PermissionDenied { .. }
        | StoreError::Unauthenticated { .. }
        | StoreError::InvalidPath { .. } => (false, false),
        _ => (true, false),
    };

    let error = Error::runtime(&err, "object-store", retryable).with_source(err);
    if not_found {
        error.into_not_found()
    } else {
        error
    }
}

#[cfg(test)]
mod tests {
    use object_store::memory::InMemory;

    use super::*;

    fn memory() -> ObjectStoreClient {
        ObjectStoreClient::new(InMemory::new())
    }

    #[tokio::test]
    async fn put_and_get() {
        let client = memory();
        let data = Bytes::from("hello\nworld");
        client.put("notes/a.txt", data.clone()).await.unwrap();

        let result = client.get("notes/a.txt").await.unwrap();
        assert_eq!(result.data, data);
        assert_eq!(result.meta.size, 11);
        assert_eq!(result.meta.location, Path::from("notes/a.txt"));
    }

    #[tokio::test]
    async fn get_empty_object() {
        let client = memory();
        client.put("empty", Bytes::new()).await.unwrap();

        let result = client.get("empty").await.unwrap();
        assert!(result.data.is_empty());
    }

    #[tokio::test]
    async fn percent_in_key_is_kept() {
        let client = memory();
        client.put("50%off.txt", Bytes::from("sale")).await.unwrap();

        let result = client.get("50%off.txt").await.unwrap();
        assert_eq!(result.data, Bytes::from("sale"));
        assert_eq!(result.meta.location.as_ref(), "50%off.txt");
    }

    #[tokio::test]
    async fn rewritten_keys_are_refused() {
        let client = memory();
        client.put("folder", Bytes::from("other object")).await.unwrap();
        client.put("a/b", Bytes::from("other object")).await.unwrap();
        client.put("lead", Bytes::from("other object")).await.unwrap();

        for key in ["folder/", "a//b", "/lead", "x/../y", "./k"] {
            let err = client.get(key).await.unwrap_err();
            assert!(!err.is_retryable(), "{key}");
            assert!(!err.is_not_found(), "{key}");
            assert!(err.to_string().contains(key), "{key}: {err}");
        }
    }

    #[tokio::test]
    async fn get_not_found() {
        let client = memory();
        let err = client.get("missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!err.is_retryable());
    }
}
