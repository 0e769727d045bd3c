//! Presigned image uploads for categories and items.
//!
//! The browser uploads straight to the bucket with the URL returned by
//! [`ImageService::prepare_upload`], then confirms the key so the record can
//! point at the new public URL.

use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{Catalog, ImageOwner};
use crate::domain::storage::ObjectStorage;
use crate::error::AppError;
use crate::utils::storage_keys::{
    IMAGE_CONTENT_TYPES, extension_for_content_type, image_key, is_image_key_for,
};

/// Everything the browser needs to upload one object directly to the bucket.
#[derive(Debug, Clone, Serialize)]
pub struct PresignedUpload {
    pub upload_url: String,
    pub key: String,
    pub public_url: String,
    /// Seconds the upload URL stays valid.
    pub expires_in: u64,
}

pub struct ImageService {
    storage: Arc<dyn ObjectStorage>,
    presign_ttl: Duration,
}

impl ImageService {
    pub fn new(storage: Arc<dyn ObjectStorage>, presign_ttl: Duration) -> Self {
        Self {
            storage,
            presign_ttl,
        }
    }

    /// Presigns a `PUT` for the image of one record.
    ///
    /// The key is fixed by the record; only the extension follows the
    /// content type.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for content types other than
    /// JPEG, PNG, WebP, GIF and AVIF.
    pub async fn prepare_upload(
        &self,
        catalog: Catalog,
        owner: ImageOwner,
        id: i64,
        content_type: &str,
    ) -> Result<PresignedUpload, AppError> {
        let extension = extension_for_content_type(content_type).ok_or_else(|| {
            AppError::bad_request(
                "Unsupported image type",
                json!({
                    "content_type": content_type,
                    "allowed": IMAGE_CONTENT_TYPES.iter().map(|(ct, _)| *ct).collect::<Vec<_>>(),
                }),
            )
        })?;

        let key = image_key(catalog, owner, id, extension);
        let upload_url = self
            .storage
            .presign_put(&key, content_type, self.presign_ttl)
            .await?;

        Ok(PresignedUpload {
            upload_url,
            public_url: self.storage.public_url(&key),
            key,
            expires_in: self.presign_ttl.as_secs(),
        })
    }

    /// Checks a confirmed upload and returns its public URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `key` is not the image key of this
    /// record or nothing was uploaded there.
    pub async fn confirm_upload(
        &self,
        catalog: Catalog,
        owner: ImageOwner,
        id: i64,
        key: &str,
    ) -> Result<String, AppError> {
        if !is_image_key_for(catalog, owner, id, key) {
            return Err(AppError::bad_request(
                "Image key does not belong to this record",
                json!({
                    "key": key,
                    "expected_prefix": image_key(catalog, owner, id, ""),
                }),
            ));
        }

        if !self.storage.exists(key).await? {
            return Err(AppError::bad_request(
                "Image has not been uploaded",
                json!({ "key": key }),
            ));
        }

        Ok(self.storage.public_url(key))
    }

    /// Key of a previously stored image URL, if it points into the bucket.
    pub fn key_for_url(&self, url: &str) -> Option<String> {
        self.storage.key_from_public_url(url)
    }

    /// Deletes the object behind `url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the bucket rejects the delete.
    pub async fn remove(&self, url: &str) -> Result<(), AppError> {
        if let Some(key) = self.key_for_url(url) {
            self.storage.delete(&key).await?;
        }
        Ok(())
    }

    /// Like [`ImageService::remove`] but only logs failures.
    pub async fn remove_quietly(&self, url: &str) {
        if let Err(e) = self.remove(url).await {
            tracing::warn!("Failed to remove image {}: {}", url, e);
        }
    }
}
