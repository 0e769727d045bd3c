#![allow(dead_code)]

use async_trait::async_trait;
use catalog_admin::application::services::auth_service::hash_token;
use catalog_admin::domain::entities::{Folder, StoredObject};
use catalog_admin::domain::repositories::TokenRepository;
use catalog_admin::domain::storage::{ObjectStorage, PrefixContents, StorageError};
use catalog_admin::infrastructure::cache::NullCache;
use catalog_admin::infrastructure::persistence::PgTokenRepository;
use catalog_admin::state::AppState;
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const PUBLIC_BASE: &str = "https://cdn.test";

pub async fn create_category(pool: &PgPool, table: &str, name: &str, slug: &str) -> i64 {
    sqlx::query_scalar(&format!(
        "INSERT INTO {table} (name, slug) VALUES ($1, $2) RETURNING id"
    ))
    .bind(name)
    .bind(slug)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_inactive_category(pool: &PgPool, table: &str, name: &str, slug: &str) -> i64 {
    sqlx::query_scalar(&format!(
        "INSERT INTO {table} (name, slug, is_active) VALUES ($1, $2, FALSE) RETURNING id"
    ))
    .bind(name)
    .bind(slug)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_item(
    pool: &PgPool,
    table: &str,
    category_id: i64,
    name: &str,
    slug: &str,
    price: Option<&str>,
) -> i64 {
    sqlx::query_scalar(&format!(
        "INSERT INTO {table} (name, slug, price, category_id) \
         VALUES ($1, $2, $3::NUMERIC, $4) RETURNING id"
    ))
    .bind(name)
    .bind(slug)
    .bind(price)
    .bind(category_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn set_item_flags(pool: &PgPool, table: &str, id: i64, active: bool, featured: bool) {
    sqlx::query(&format!(
        "UPDATE {table} SET is_active = $1, is_featured = $2 WHERE id = $3"
    ))
    .bind(active)
    .bind(featured)
    .bind(id)
    .execute(pool)
    .await
    .unwrap();
}

/// Stores an API token named after its raw value.
pub async fn issue_token(pool: &PgPool, raw: &str) {
    let repo = PgTokenRepository::new(Arc::new(pool.clone()));
    let hash = hash_token(SIGNING_SECRET, raw).unwrap();
    repo.create_token(raw, &hash).await.unwrap();
}

/// In-memory bucket keyed by object key; values are object sizes.
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<BTreeMap<String, i64>>,
}

impl MemoryStorage {
    pub fn with_objects(keys: &[&str]) -> Self {
        let storage = Self::default();
        {
            let mut objects = storage.objects.lock().unwrap();
            for key in keys {
                objects.insert(key.to_string(), 1);
            }
        }
        storage
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    fn object(&self, key: &str, size: i64) -> StoredObject {
        StoredObject {
            key: key.to_string(),
            name: key.rsplit('/').next().unwrap_or_default().to_string(),
            size,
            last_modified: None,
            etag: None,
            url: self.public_url(key),
        }
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn list_level(&self, prefix: &str) -> Result<PrefixContents, StorageError> {
        let objects = self.objects.lock().unwrap().clone();
        let mut contents = PrefixContents::default();

        for (key, size) in objects.iter().filter(|(k, _)| k.starts_with(prefix)) {
            let rest = &key[prefix.len()..];
            match rest.find('/') {
                Some(pos) => {
                    let folder = format!("{}{}/", prefix, &rest[..pos]);
                    if !contents.folders.iter().any(|f| f.prefix == folder) {
                        contents.folders.push(Folder::from_prefix(folder));
                    }
                }
                None if !rest.is_empty() => contents.objects.push(self.object(key, *size)),
                None => {}
            }
        }

        Ok(contents)
    }

    async fn list_recursive(&self, prefix: &str) -> Result<Vec<StoredObject>, StorageError> {
        let objects = self.objects.lock().unwrap().clone();
        Ok(objects
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, size)| self.object(k, *size))
            .collect())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.objects.lock().unwrap().contains_key(key))
    }

    async fn put_empty(&self, key: &str) -> Result<(), StorageError> {
        self.objects.lock().unwrap().insert(key.to_string(), 0);
        Ok(())
    }

    async fn copy(&self, from_key: &str, to_key: &str) -> Result<(), StorageError> {
        let mut objects = self.objects.lock().unwrap();
        let size = *objects
            .get(from_key)
            .ok_or_else(|| StorageError::NotFound(from_key.to_string()))?;
        objects.insert(to_key.to_string(), size);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    async fn presign_put(
        &self,
        key: &str,
        _content_type: &str,
        _expires_in: Duration,
    ) -> Result<String, StorageError> {
        Ok(format!("https://upload.test/{key}?signature=abc"))
    }

    async fn presign_get(&self, key: &str, _expires_in: Duration) -> Result<String, StorageError> {
        Ok(format!("https://download.test/{key}?signature=abc"))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{PUBLIC_BASE}/{key}")
    }

    fn key_from_public_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(PUBLIC_BASE)
            .and_then(|rest| rest.strip_prefix('/'))
            .map(str::to_string)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

pub fn create_test_state(pool: PgPool, storage: Arc<MemoryStorage>) -> AppState {
    AppState::new(
        pool,
        storage,
        Arc::new(NullCache),
        Duration::from_secs(900),
        SIGNING_SECRET.to_string(),
    )
}
