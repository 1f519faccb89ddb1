//! Object storage for uploaded resumes.
//!
//! `AppState` holds an `Arc<dyn ResumeStorage>`; production uses `S3ResumeStorage`
//! (AWS S3 or any S3-compatible endpoint such as MinIO).

use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("S3 upload failed: {0}")]
    Upload(String),
}

#[async_trait]
pub trait ResumeStorage: Send + Sync {
    /// Stores `body` under `key` and returns the URL it can be fetched from.
    async fn put(&self, key: &str, body: Bytes, content_type: &str)
        -> Result<String, StorageError>;
}

pub struct S3ResumeStorage {
    client: S3Client,
    bucket: String,
    public_base_url: String,
}

impl S3ResumeStorage {
    pub fn new(client: S3Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }
}

#[async_trait]
impl ResumeStorage for S3ResumeStorage {
    async fn put(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        Ok(self.public_url(key))
    }
}

/// Default public URL for objects in a bucket when no CDN base is configured.
pub fn default_public_base_url(bucket: &str, region: &str) -> String {
    format!("https://{bucket}.s3.{region}.amazonaws.com")
}
