//! Browsing and managing the media bucket.
//!
//! Folders are key prefixes ending with `/`. An explicit folder is a
//! zero-byte marker object whose key is the prefix itself; S3 has no rename,
//! so renames are copy-then-delete for every object under the old key.

use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::bulk::{BulkDeleteReport, FailedKey};
use crate::application::services::image_service::PresignedUpload;
use crate::domain::entities::{Folder, Listing};
use crate::domain::storage::{ObjectStorage, StorageError};
use crate::error::AppError;
use crate::utils::storage_keys::{
    is_folder_key, parent_prefix, validate_key, validate_name, validate_prefix,
};

/// Result of a rename.
#[derive(Debug, Clone, Serialize)]
pub struct RenameResult {
    pub from: String,
    pub to: String,
    /// Number of objects copied to the new key.
    pub moved: usize,
}

/// Presigned download link.
#[derive(Debug, Clone, Serialize)]
pub struct PresignedDownload {
    pub url: String,
    pub key: String,
    pub expires_in: u64,
}

pub struct FileManagerService {
    storage: Arc<dyn ObjectStorage>,
    presign_ttl: Duration,
}

impl FileManagerService {
    pub fn new(storage: Arc<dyn ObjectStorage>, presign_ttl: Duration) -> Self {
        Self {
            storage,
            presign_ttl,
        }
    }

    /// Lists one level of the bucket, folders first, both sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `prefix` is neither empty nor a folder key.
    pub async fn list(&self, prefix: &str) -> Result<Listing, AppError> {
        validate_prefix(prefix)?;

        let mut contents = self.storage.list_level(prefix).await?;
        contents.folders.sort_by(|a, b| a.name.cmp(&b.name));
        contents.objects.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Listing {
            prefix: prefix.to_string(),
            parent: (!prefix.is_empty()).then(|| parent_prefix(prefix)),
            folders: contents.folders,
            objects: contents.objects,
        })
    }

    /// Creates an empty folder `name` inside `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if anything already exists under the new prefix.
    pub async fn create_folder(&self, parent: &str, name: &str) -> Result<Folder, AppError> {
        validate_prefix(parent)?;
        validate_name(name)?;

        let key = format!("{}{}/", parent, name);
        validate_key(&key)?;

        if self.storage.exists(&key).await? {
            return Err(AppError::conflict(
                "Folder already exists",
                json!({ "prefix": key }),
            ));
        }

        self.storage.put_empty(&key).await?;
        tracing::info!(prefix = %key, "Folder created");

        Ok(Folder::from_prefix(key))
    }

    /// Renames a file or folder in place.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing exists at `key`.
    /// Returns [`AppError::Conflict`] if the target name is taken.
    pub async fn rename(&self, key: &str, new_name: &str) -> Result<RenameResult, AppError> {
        validate_key(key)?;
        validate_name(new_name)?;

        let folder = is_folder_key(key);
        let target = if folder {
            format!("{}{}/", parent_prefix(key), new_name)
        } else {
            format!("{}{}", parent_prefix(key), new_name)
        };
        validate_key(&target)?;

        if target == key {
            return Err(AppError::bad_request(
                "New name matches the current name",
                json!({ "key": key }),
            ));
        }

        if self.storage.exists(&target).await? {
            return Err(AppError::conflict(
                "Target already exists",
                json!({ "from": key, "to": target }),
            ));
        }

        let moves: Vec<(String, String)> = if folder {
            self.storage
                .list_recursive(key)
                .await?
                .into_iter()
                .map(|object| {
                    let relative = &object.key[key.len()..];
                    let destination = format!("{}{}", target, relative);
                    (object.key, destination)
                })
                .collect()
        } else if self.storage.exists(key).await? {
            vec![(key.to_string(), target.clone())]
        } else {
            Vec::new()
        };

        if moves.is_empty() {
            return Err(AppError::not_found(
                "Nothing to rename",
                json!({ "key": key }),
            ));
        }

        for (moved, (from, to)) in moves.iter().enumerate() {
            if let Err(e) = self.move_object(from, to).await {
                tracing::error!(
                    from = %key,
                    to = %target,
                    moved,
                    total = moves.len(),
                    failed_key = %from,
                    error = %e,
                    "Rename stopped part way"
                );
                return Err(AppError::storage(
                    "Rename stopped part way",
                    json!({
                        "from": key,
                        "to": target,
                        "moved": moved,
                        "total": moves.len(),
                        "failed_key": from,
                    }),
                ));
            }
        }

        tracing::info!(from = %key, to = %target, moved = moves.len(), "Renamed");

        Ok(RenameResult {
            from: key.to_string(),
            to: target,
            moved: moves.len(),
        })
    }

    async fn move_object(&self, from: &str, to: &str) -> Result<(), StorageError> {
        self.storage.copy(from, to).await?;
        self.storage.delete(from).await
    }

    /// Deletes files and folders. Folder keys delete everything beneath them.
    pub async fn delete(&self, keys: &[String]) -> BulkDeleteReport<FailedKey> {
        let mut report = BulkDeleteReport::new(keys.len());

        for key in keys {
            match self.delete_key(key).await {
                Ok(()) => report.deleted += 1,
                Err(e) => report.failed.push(FailedKey::new(key.as_str(), &e)),
            }
        }

        tracing::info!(
            requested = report.requested,
            deleted = report.deleted,
            failed = report.failed.len(),
            "Bulk file delete finished"
        );
        report
    }

    /// Presigns an upload of `file_name` into `prefix`.
    pub async fn upload_url(
        &self,
        prefix: &str,
        file_name: &str,
        content_type: &str,
    ) -> Result<PresignedUpload, AppError> {
        validate_prefix(prefix)?;
        validate_name(file_name)?;

        let key = format!("{}{}", prefix, file_name);
        validate_key(&key)?;

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

    /// Presigns a download of an existing object.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the object does not exist.
    pub async fn download_url(&self, key: &str) -> Result<PresignedDownload, AppError> {
        validate_key(key)?;

        if is_folder_key(key) {
            return Err(AppError::bad_request(
                "Folders cannot be downloaded",
                json!({ "key": key }),
            ));
        }

        if !self.storage.exists(key).await? {
            return Err(AppError::not_found("File not found", json!({ "key": key })));
        }

        let url = self.storage.presign_get(key, self.presign_ttl).await?;

        Ok(PresignedDownload {
            url,
            key: key.to_string(),
            expires_in: self.presign_ttl.as_secs(),
        })
    }

    async fn delete_key(&self, key: &str) -> Result<(), AppError> {
        validate_key(key)?;

        if !is_folder_key(key) {
            self.storage.delete(key).await?;
            return Ok(());
        }

        let objects = self.storage.list_recursive(key).await?;
        for object in &objects {
            self.storage.delete(&object.key).await?;
        }
        // Implicit folders have no marker, deleting a missing key is a no-op.
        self.storage.delete(key).await?;

        tracing::debug!(prefix = %key, objects = objects.len(), "Folder deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::StoredObject;
    use crate::domain::storage::{MockObjectStorage, PrefixContents, StorageError};
    use mockall::Sequence;
    use mockall::predicate::eq;

    fn object(key: &str) -> StoredObject {
        StoredObject {
            key: key.to_string(),
            name: key.rsplit('/').next().unwrap_or(key).to_string(),
            size: 10,
            last_modified: None,
            etag: None,
            url: format!("https://media.example.com/{}", key),
        }
    }

    fn service(storage: MockObjectStorage) -> FileManagerService {
        FileManagerService::new(Arc::new(storage), Duration::from_secs(900))
    }

    #[tokio::test]
    async fn test_list_sorts_and_sets_parent() {
        let mut storage = MockObjectStorage::new();
        storage
            .expect_list_level()
            .with(eq("public/products/"))
            .returning(|_| {
                Ok(PrefixContents {
                    folders: vec![
                        Folder::from_prefix("public/products/b/"),
                        Folder::from_prefix("public/products/a/"),
                    ],
                    objects: vec![object("public/products/z.png"), object("public/products/c.png")],
                })
            });

        let listing = service(storage).list("public/products/").await.unwrap();

        assert_eq!(listing.parent.as_deref(), Some("public/"));
        assert_eq!(listing.folders[0].name, "a");
        assert_eq!(listing.objects[0].name, "c.png");
    }

    #[tokio::test]
    async fn test_list_root_has_no_parent() {
        let mut storage = MockObjectStorage::new();
        storage
            .expect_list_level()
            .returning(|_| Ok(PrefixContents::default()));

        let listing = service(storage).list("").await.unwrap();
        assert!(listing.parent.is_none());
    }

    #[tokio::test]
    async fn test_list_rejects_prefix_without_slash() {
        let mut storage = MockObjectStorage::new();
        storage.expect_list_level().never();

        assert!(service(storage).list("public").await.is_err());
    }

    #[tokio::test]
    async fn test_create_folder_conflict() {
        let mut storage = MockObjectStorage::new();
        storage
            .expect_exists()
            .with(eq("public/banners/"))
            .returning(|_| Ok(true));
        storage.expect_put_empty().never();

        let result = service(storage).create_folder("public/", "banners").await;
        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_create_folder_writes_marker() {
        let mut storage = MockObjectStorage::new();
        storage.expect_exists().returning(|_| Ok(false));
        storage
            .expect_put_empty()
            .with(eq("banners/"))
            .times(1)
            .returning(|_| Ok(()));

        let folder = service(storage).create_folder("", "banners").await.unwrap();
        assert_eq!(folder.prefix, "banners/");
        assert_eq!(folder.name, "banners");
    }

    #[tokio::test]
    async fn test_rename_file_copies_then_deletes() {
        let mut storage = MockObjectStorage::new();
        let mut seq = Sequence::new();
        storage
            .expect_exists()
            .with(eq("docs/new.pdf"))
            .returning(|_| Ok(false));
        storage
            .expect_exists()
            .with(eq("docs/old.pdf"))
            .returning(|_| Ok(true));
        storage
            .expect_copy()
            .with(eq("docs/old.pdf"), eq("docs/new.pdf"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        storage
            .expect_delete()
            .with(eq("docs/old.pdf"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let result = service(storage)
            .rename("docs/old.pdf", "new.pdf")
            .await
            .unwrap();

        assert_eq!(result.to, "docs/new.pdf");
        assert_eq!(result.moved, 1);
    }

    #[tokio::test]
    async fn test_rename_folder_moves_every_object() {
        let mut storage = MockObjectStorage::new();
        storage
            .expect_exists()
            .with(eq("media/archive/"))
            .returning(|_| Ok(false));
        storage
            .expect_list_recursive()
            .with(eq("media/photos/"))
            .returning(|_| {
                Ok(vec![
                    object("media/photos/"),
                    object("media/photos/a.jpg"),
                    object("media/photos/2024/b.jpg"),
                ])
            });
        storage
            .expect_copy()
            .withf(|from, to| {
                from.starts_with("media/photos/")
                    && to == format!("media/archive/{}", &from["media/photos/".len()..])
            })
            .times(3)
            .returning(|_, _| Ok(()));
        storage.expect_delete().times(3).returning(|_| Ok(()));

        let result = service(storage)
            .rename("media/photos/", "archive")
            .await
            .unwrap();

        assert_eq!(result.to, "media/archive/");
        assert_eq!(result.moved, 3);
    }

    #[tokio::test]
    async fn test_rename_failure_reports_progress() {
        let mut storage = MockObjectStorage::new();
        storage.expect_exists().returning(|_| Ok(false));
        storage.expect_list_recursive().returning(|_| {
            Ok(vec![
                object("media/photos/a.jpg"),
                object("media/photos/b.jpg"),
                object("media/photos/c.jpg"),
            ])
        });
        storage.expect_copy().returning(|from, _| {
            if from == "media/photos/b.jpg" {
                Err(StorageError::Request("copy refused".to_string()))
            } else {
                Ok(())
            }
        });
        storage.expect_delete().times(1).returning(|_| Ok(()));

        let err = service(storage)
            .rename("media/photos/", "archive")
            .await
            .unwrap_err();

        assert_eq!(err.status(), axum::http::StatusCode::BAD_GATEWAY);
        let info = err.to_error_info();
        assert_eq!(info.details["moved"], 1);
        assert_eq!(info.details["total"], 3);
        assert_eq!(info.details["failed_key"], "media/photos/b.jpg");
    }

    #[tokio::test]
    async fn test_rename_to_existing_target_conflicts() {
        let mut storage = MockObjectStorage::new();
        storage.expect_exists().returning(|_| Ok(true));
        storage.expect_copy().never();

        let result = service(storage).rename("a.txt", "b.txt").await;
        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_rename_missing_file_is_not_found() {
        let mut storage = MockObjectStorage::new();
        storage.expect_exists().returning(|_| Ok(false));
        storage.expect_copy().never();

        let result = service(storage).rename("a.txt", "b.txt").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_mixed_keys() {
        let mut storage = MockObjectStorage::new();
        storage
            .expect_list_recursive()
            .with(eq("old/"))
            .returning(|_| Ok(vec![object("old/"), object("old/x.png")]));
        storage
            .expect_delete()
            .with(eq("broken.png"))
            .returning(|_| Err(StorageError::Request("denied".to_string())));
        storage.expect_delete().returning(|_| Ok(()));

        let keys = vec![
            "old/".to_string(),
            "a.png".to_string(),
            "broken.png".to_string(),
            "../etc".to_string(),
        ];
        let report = service(storage).delete(&keys).await;

        assert_eq!(report.requested, 4);
        assert_eq!(report.deleted, 2);
        assert_eq!(report.failed.len(), 2);
        assert_eq!(report.failed[0].key, "broken.png");
        assert_eq!(report.failed[0].error.code, "storage_error");
        assert_eq!(report.failed[1].error.code, "validation_error");
    }

    #[tokio::test]
    async fn test_upload_url_joins_prefix_and_name() {
        let mut storage = MockObjectStorage::new();
        storage
            .expect_presign_put()
            .with(
                eq("docs/price list.pdf"),
                eq("application/pdf"),
                eq(Duration::from_secs(900)),
            )
            .returning(|_, _, _| Ok("https://signed/put".to_string()));
        storage
            .expect_public_url()
            .returning(|key| format!("https://media.example.com/{}", key));

        let upload = service(storage)
            .upload_url("docs/", "price list.pdf", "application/pdf")
            .await
            .unwrap();

        assert_eq!(upload.key, "docs/price list.pdf");
        assert_eq!(upload.expires_in, 900);
    }

    #[tokio::test]
    async fn test_download_url_missing_object() {
        let mut storage = MockObjectStorage::new();
        storage.expect_exists().returning(|_| Ok(false));
        storage.expect_presign_get().never();

        let result = service(storage).download_url("docs/none.pdf").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_download_url_rejects_folders() {
        let storage = MockObjectStorage::new();
        let result = service(storage).download_url("docs/").await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }
}
