//! S3-compatible implementation of [`ObjectStorage`].

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::Object;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::StorageConfig;
use crate::domain::entities::{Folder, StoredObject};
use crate::domain::storage::{ObjectStorage, PrefixContents, StorageError};
use crate::utils::storage_keys::last_segment;

/// Media bucket client.
///
/// Public URLs are built from `S3_PUBLIC_URL`, which normally points at a CDN
/// or custom domain in front of the bucket rather than the API endpoint.
pub struct S3Storage {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3Storage {
    pub fn new(client: Client, bucket: impl Into<String>, public_base_url: &str) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds a client with static credentials and path-style addressing.
    pub async fn from_config(config: &StorageConfig) -> Self {
        info!(
            "Configuring object storage: bucket '{}' at {}",
            config.bucket, config.endpoint
        );

        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "static",
        );

        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(config.endpoint.clone())
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(true)
            .build();

        Self::new(
            Client::from_conf(s3_config),
            config.bucket.clone(),
            &config.public_url,
        )
    }

    fn to_stored_object(&self, object: &Object) -> Option<StoredObject> {
        let key = object.key()?.to_string();

        Some(StoredObject {
            name: last_segment(&key).to_string(),
            size: object.size().unwrap_or_default(),
            last_modified: object.last_modified().and_then(|t| {
                DateTime::<Utc>::from_timestamp(t.secs(), t.subsec_nanos())
            }),
            etag: object.e_tag().map(|e| e.trim_matches('"').to_string()),
            url: self.public_url(&key),
            key,
        })
    }

    async fn list_page(
        &self,
        prefix: &str,
        delimiter: Option<&str>,
        continuation_token: Option<String>,
    ) -> Result<aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output, StorageError> {
        self.client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .set_delimiter(delimiter.map(str::to_string))
            .set_continuation_token(continuation_token)
            .send()
            .await
            .map_err(request_error)
    }
}

fn request_error<E: std::error::Error + 'static>(err: E) -> StorageError {
    StorageError::Request(DisplayErrorContext(&err).to_string())
}

fn presign_error<E: std::error::Error + 'static>(err: E) -> StorageError {
    StorageError::Presign(DisplayErrorContext(&err).to_string())
}

/// `x-amz-copy-source` value: bucket and key with each segment percent-encoded.
fn copy_source(bucket: &str, key: &str) -> Result<String, StorageError> {
    let mut url = Url::parse("http://copy-source/")
        .map_err(|e| StorageError::Request(format!("invalid copy source: {}", e)))?;

    url.path_segments_mut()
        .map_err(|_| StorageError::Request("invalid copy source".to_string()))?
        .pop_if_empty()
        .push(bucket)
        .extend(key.split('/'));

    Ok(url.path().trim_start_matches('/').to_string())
}

fn join_public_url(base: &str, key: &str) -> String {
    format!("{}/{}", base, key)
}

fn strip_public_url(base: &str, url: &str) -> Option<String> {
    url.strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|key| !key.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn list_level(&self, prefix: &str) -> Result<PrefixContents, StorageError> {
        let mut contents = PrefixContents::default();
        let mut token = None;

        loop {
            let page = self.list_page(prefix, Some("/"), token).await?;

            contents.folders.extend(
                page.common_prefixes()
                    .iter()
                    .filter_map(|p| p.prefix())
                    .map(Folder::from_prefix),
            );
            contents.objects.extend(
                page.contents()
                    .iter()
                    .filter(|o| o.key() != Some(prefix))
                    .filter_map(|o| self.to_stored_object(o)),
            );

            match page.next_continuation_token() {
                Some(next) if page.is_truncated().unwrap_or(false) => {
                    token = Some(next.to_string())
                }
                _ => break,
            }
        }

        debug!(
            "Listed '{}': {} folders, {} objects",
            prefix,
            contents.folders.len(),
            contents.objects.len()
        );

        Ok(contents)
    }

    async fn list_recursive(&self, prefix: &str) -> Result<Vec<StoredObject>, StorageError> {
        let mut objects = Vec::new();
        let mut token = None;

        loop {
            let page = self.list_page(prefix, None, token).await?;

            objects.extend(
                page.contents()
                    .iter()
                    .filter_map(|o| self.to_stored_object(o)),
            );

            match page.next_continuation_token() {
                Some(next) if page.is_truncated().unwrap_or(false) => {
                    token = Some(next.to_string())
                }
                _ => break,
            }
        }

        Ok(objects)
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        // A folder exists when anything at all lives under it.
        if key.ends_with('/') {
            let page = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(key)
                .max_keys(1)
                .send()
                .await
                .map_err(request_error)?;
            return Ok(!page.contents().is_empty());
        }

        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_error = err.into_service_error();
                if service_error.is_not_found() {
                    Ok(false)
                } else {
                    Err(request_error(service_error))
                }
            }
        }
    }

    async fn put_empty(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from_static(b""))
            .content_length(0)
            .send()
            .await
            .map_err(request_error)?;

        debug!("Created empty object {}", key);
        Ok(())
    }

    async fn copy(&self, from_key: &str, to_key: &str) -> Result<(), StorageError> {
        let source = copy_source(&self.bucket, from_key)?;

        match self
            .client
            .copy_object()
            .bucket(&self.bucket)
            .copy_source(source)
            .key(to_key)
            .send()
            .await
        {
            Ok(_) => {
                debug!("Copied {} -> {}", from_key, to_key);
                Ok(())
            }
            Err(err) => {
                let service_error = err.into_service_error();
                if service_error.code() == Some("NoSuchKey") {
                    Err(StorageError::NotFound(from_key.to_string()))
                } else {
                    Err(request_error(service_error))
                }
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(request_error)?;

        debug!("Deleted object {}", key);
        Ok(())
    }

    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(expires_in).map_err(presign_error)?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(presign_error)?;

        Ok(request.uri().to_string())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(expires_in).map_err(presign_error)?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(presign_error)?;

        Ok(request.uri().to_string())
    }

    fn public_url(&self, key: &str) -> String {
        join_public_url(&self.public_base_url, key)
    }

    fn key_from_public_url(&self, url: &str) -> Option<String> {
        strip_public_url(&self.public_base_url, url)
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
        {
            Ok(_) => true,
            Err(err) => {
                warn!(
                    "Storage health check failed: {}",
                    DisplayErrorContext(&err)
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_source_encodes_segments() {
        assert_eq!(
            copy_source("media", "public/products/12.webp").unwrap(),
            "media/public/products/12.webp"
        );
        assert_eq!(
            copy_source("media", "docs/price list.pdf").unwrap(),
            "media/docs/price%20list.pdf"
        );
        assert_eq!(
            copy_source("media", "docs/a?b#c.txt").unwrap(),
            "media/docs/a%3Fb%23c.txt"
        );
    }

    #[test]
    fn test_copy_source_keeps_folder_marker() {
        assert_eq!(copy_source("media", "docs/").unwrap(), "media/docs/");
    }

    #[test]
    fn test_public_url_round_trip() {
        let base = "https://media.example.com";
        let url = join_public_url(base, "public/products/products-items/7.png");
        assert_eq!(
            url,
            "https://media.example.com/public/products/products-items/7.png"
        );
        assert_eq!(
            strip_public_url(base, &url).as_deref(),
            Some("public/products/products-items/7.png")
        );
    }

    #[test]
    fn test_strip_public_url_rejects_foreign_urls() {
        let base = "https://media.example.com";
        assert_eq!(strip_public_url(base, "https://cdn.other.com/a.png"), None);
        assert_eq!(strip_public_url(base, "https://media.example.com/"), None);
        assert_eq!(
            strip_public_url(base, "https://media.example.com.evil.net/a.png"),
            None
        );
    }
}
