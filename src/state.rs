//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{
    AuthService, CategoryService, FileManagerService, ImageService, ItemService,
    StorefrontService,
};
use crate::domain::repositories::{CategoryRepository, ItemRepository};
use crate::domain::storage::ObjectStorage;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{
    PgCategoryRepository, PgItemRepository, PgTokenRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub category_service: Arc<CategoryService>,
    pub item_service: Arc<ItemService>,
    pub file_service: Arc<FileManagerService>,
    pub storefront_service: Arc<StorefrontService>,
    pub auth_service: Arc<AuthService>,
    pub db: PgPool,
    pub storage: Arc<dyn ObjectStorage>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Wires the PostgreSQL repositories into every service.
    pub fn new(
        pool: PgPool,
        storage: Arc<dyn ObjectStorage>,
        cache: Arc<dyn CacheService>,
        presign_ttl: Duration,
        signing_secret: String,
    ) -> Self {
        let pool_arc = Arc::new(pool.clone());
        let categories: Arc<dyn CategoryRepository> =
            Arc::new(PgCategoryRepository::new(pool_arc.clone()));
        let items: Arc<dyn ItemRepository> = Arc::new(PgItemRepository::new(pool_arc.clone()));
        let tokens = Arc::new(PgTokenRepository::new(pool_arc));

        let images = Arc::new(ImageService::new(storage.clone(), presign_ttl));

        Self {
            category_service: Arc::new(CategoryService::new(
                categories.clone(),
                images.clone(),
                cache.clone(),
            )),
            item_service: Arc::new(ItemService::new(
                items.clone(),
                categories.clone(),
                images,
                cache.clone(),
            )),
            file_service: Arc::new(FileManagerService::new(storage.clone(), presign_ttl)),
            storefront_service: Arc::new(StorefrontService::new(
                categories,
                items,
                cache.clone(),
            )),
            auth_service: Arc::new(AuthService::new(tokens, signing_secret)),
            db: pool,
            storage,
            cache,
        }
    }
}
