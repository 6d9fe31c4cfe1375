//! Decoding of object-change notifications.
//!
//! A payload is parsed once into a JSON object and then validated level by
//! level into a complete [`Notification`]. Any structural deviation is a
//! [`DecodeError`]; missing fields are never defaulted.

mod event;

use std::fmt;

use serde::{Deserialize, Serialize};

use self::event::{EventDocument, child, object, text};
use crate::TRACING_TARGET_DECODE;

/// Reasons a notification payload is rejected.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The payload is not a JSON object.
    #[error("failed to parse S3 event message: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The `Records` list is missing, not a list, or empty.
    #[error("no records found in S3 event")]
    NoRecords,

    /// The first record is not an object.
    #[error("invalid record structure")]
    InvalidRecord,

    /// The first record has no usable `s3` section.
    #[error("missing s3 information in record")]
    MissingS3,

    /// The `s3` section has no usable `bucket` section.
    #[error("missing bucket information in record")]
    MissingBucket,

    /// `s3.bucket.name` is missing, not a string, or empty.
    #[error("invalid bucket name")]
    InvalidBucketName,

    /// The `s3` section has no usable `object` section.
    #[error("missing object information in record")]
    MissingObject,

    /// `s3.object.key` is missing, not a string, or empty.
    #[error("invalid object key")]
    InvalidObjectKey,
}

/// Reference to a changed object: the bucket holding it and its key.
///
/// Both parts are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Notification {
    bucket: String,
    key: String,
}

impl Notification {
    /// Decodes a notification payload.
    ///
    /// Only the first record is used. Additional records in the same payload
    /// are ignored and reported through a `warn` event.
    pub fn decode(payload: &str) -> Result<Self, DecodeError> {
        let document = EventDocument::parse(payload).map_err(DecodeError::Malformed)?;
        Self::try_from(document)
    }

    /// Name of the bucket holding the object.
    #[inline]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Key of the object within its bucket.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

impl TryFrom<EventDocument> for Notification {
    type Error = DecodeError;

    fn try_from(document: EventDocument) -> Result<Self, Self::Error> {
        let records = document
            .records()
            .filter(|records| !records.is_empty())
            .ok_or(DecodeError::NoRecords)?;

        let total = records.len();
        let first = records.first().ok_or(DecodeError::NoRecords)?;

        let record = object(first).ok_or(DecodeError::InvalidRecord)?;
        let s3 = child(record, "s3").ok_or(DecodeError::MissingS3)?;

        let bucket = child(s3, "bucket").ok_or(DecodeError::MissingBucket)?;
        let bucket = text(bucket, "name")
            .ok_or(DecodeError::InvalidBucketName)?
            .to_string();

        let entity = child(s3, "object").ok_or(DecodeError::MissingObject)?;
        let key = text(entity, "key")
            .ok_or(DecodeError::InvalidObjectKey)?
            .to_string();

        if total > 1 {
            tracing::warn!(
                target: TRACING_TARGET_DECODE,
                bucket = %bucket,
                key = %key,
                ignored = total - 1,
                "Notification carries several records, only the first is processed"
            );
        }

        Ok(Self { bucket, key })
    }
}
