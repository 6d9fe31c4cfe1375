//! Result type for [`ObjectStoreClient::get`](super::ObjectStoreClient::get).

use bytes::Bytes;
use object_store::ObjectMeta;

/// Result of a successful [`ObjectStoreClient::get`](super::ObjectStoreClient::get) call.
#[derive(Debug)]
pub struct GetOutput {
    /// Complete content of the retrieved object.
    pub data: Bytes,
    /// Object metadata (size, e_tag, last modified, location).
    pub meta: ObjectMeta,
}
