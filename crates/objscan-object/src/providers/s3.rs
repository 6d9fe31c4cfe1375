//! S3-compatible provider using [`object_store::aws::AmazonS3Builder`].
//!
//! Works with AWS S3, MinIO, LocalStack and any S3-compatible service.

#[cfg(feature = "config")]
use clap::Args;
use derive_more::Deref;
use object_store::aws::AmazonS3Builder;
use serde::{Deserialize, Serialize};

use super::Client;
use crate::Error;
use crate::client::ObjectStoreClient;

/// Default region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Typed credentials for the S3-compatible provider.
///
/// The bucket is filled in per notification; the remaining fields act as a
/// template shared by every bucket client. Fields left empty fall back to the
/// standard AWS environment (`AWS_ACCESS_KEY_ID`, web identity, instance
/// metadata).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[serde(rename_all = "camelCase")]
pub struct S3Credentials {
    /// S3 bucket name.
    #[cfg_attr(feature = "config", arg(skip))]
    #[serde(default)]
    pub bucket: String,

    /// AWS region (defaults to `us-east-1`).
    ///
    /// Shared with the queue client, so it is not a flag of its own.
    #[cfg_attr(feature = "config", arg(skip = default_region()))]
    #[serde(default = "default_region")]
    pub region: String,

    /// Endpoint URL (e.g. `http://localhost:9000` for MinIO).
    #[cfg_attr(feature = "config", arg(long = "s3-endpoint", env = "S3_ENDPOINT"))]
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Access key ID for static credentials.
    #[cfg_attr(feature = "config", arg(skip))]
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Secret access key for static credentials.
    #[cfg_attr(feature = "config", arg(skip))]
    #[serde(default)]
    pub secret_access_key: Option<String>,

    /// Session token for temporary credentials.
    #[cfg_attr(feature = "config", arg(skip))]
    #[serde(default)]
    pub session_token: Option<String>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl S3Credentials {
    /// Creates credentials for `region` resolved from the environment.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Default::default()
        }
    }

    /// Set the endpoint override.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Returns a copy of these credentials bound to `bucket`.
    #[must_use]
    pub fn for_bucket(&self, bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..self.clone()
        }
    }
}

/// S3-backed object storage client bound to one bucket.
#[derive(Debug, Clone, Deref)]
pub struct S3Provider(ObjectStoreClient);

impl S3Provider {
    /// Unwrap the underlying store client.
    pub fn into_inner(self) -> ObjectStoreClient {
        self.0
    }
}

impl Client for S3Provider {
    type Credentials = S3Credentials;

    const ID: &str = "s3";

    fn connect(creds: &Self::Credentials) -> Result<Self, Error> {
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(&creds.bucket)
            .with_region(&creds.region);

        if let Some(endpoint) = &creds.endpoint {
            builder = builder.with_endpoint(endpoint);
            if endpoint.starts_with("http://") {
                builder = builder.with_allow_http(true);
            }
        }

        if let Some(access_key) = &creds.access_key_id {
            builder = builder.with_access_key_id(access_key);
        }

        if let Some(secret_key) = &creds.secret_access_key {
            builder = builder.with_secret_access_key(secret_key);
        }

        if let Some(token) = &creds.session_token {
            builder = builder.with_token(token);
        }

        let store = builder
            .build()
            .map_err(|e| Error::connection(e.to_string(), Self::ID, false).with_source(e))?;

        Ok(Self(ObjectStoreClient::new(store)))
    }
}
