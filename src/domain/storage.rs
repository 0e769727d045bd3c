//! Object storage contract for the media bucket.
//!
//! The production implementation is
//! [`crate::infrastructure::storage::S3Storage`], which talks to any
//! S3-compatible service (Cloudflare R2, MinIO, AWS S3).

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::entities::{Folder, StoredObject};

/// Errors raised by object storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("failed to presign request: {0}")]
    Presign(String),

    #[error("storage request failed: {0}")]
    Request(String),
}

/// Direct children of a prefix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrefixContents {
    pub folders: Vec<Folder>,
    pub objects: Vec<StoredObject>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Lists folders and objects directly under `prefix` (delimiter `/`).
    ///
    /// The folder marker object whose key equals `prefix` is not returned.
    async fn list_level(&self, prefix: &str) -> Result<PrefixContents, StorageError>;

    /// Lists every object whose key starts with `prefix`, at any depth.
    async fn list_recursive(&self, prefix: &str) -> Result<Vec<StoredObject>, StorageError>;

    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    /// Writes a zero-byte object; used for folder markers ending in `/`.
    async fn put_empty(&self, key: &str) -> Result<(), StorageError>;

    async fn copy(&self, from_key: &str, to_key: &str) -> Result<(), StorageError>;

    /// Deletes one object. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Presigned URL for a direct `PUT` upload with the given content type.
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError>;

    /// Presigned URL for a direct `GET` download.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StorageError>;

    /// Public URL an object is served from.
    fn public_url(&self, key: &str) -> String;

    /// Reverses [`ObjectStorage::public_url`]; `None` for foreign URLs.
    fn key_from_public_url(&self, url: &str) -> Option<String>;

    async fn health_check(&self) -> bool;
}
