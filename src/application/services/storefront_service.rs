//! Cached public reads for the storefront and their revalidation.
//!
//! Responses are cached as JSON under `catalog:{catalog}:…`. Admin services
//! call [`revalidate`] after every mutation so the storefront never serves a
//! deleted or renamed record for longer than one request.

use serde::Serialize;
use serde_json::{Value, json};
use std::future::Future;
use std::sync::Arc;

use crate::domain::entities::{Catalog, Category, Item};
use crate::domain::repositories::{CategoryRepository, ItemRepository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Cache key prefix shared by every storefront entry of `catalog`.
pub fn cache_prefix(catalog: Catalog) -> String {
    format!("catalog:{}:", catalog)
}

/// Drops every cached storefront response of `catalog`.
///
/// Cache backends fail open, so this never fails the mutation that calls it.
pub async fn revalidate(cache: &dyn CacheService, catalog: Catalog) -> u64 {
    match cache.invalidate_prefix(&cache_prefix(catalog)).await {
        Ok(removed) => {
            tracing::debug!("Revalidated {} storefront: {} keys", catalog, removed);
            removed
        }
        Err(e) => {
            tracing::warn!("Failed to revalidate {} storefront: {}", catalog, e);
            0
        }
    }
}

/// A category page: the category and its active items.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDetail {
    pub category: Category,
    pub items: Vec<Item>,
}

pub struct StorefrontService {
    categories: Arc<dyn CategoryRepository>,
    items: Arc<dyn ItemRepository>,
    cache: Arc<dyn CacheService>,
}

impl StorefrontService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        items: Arc<dyn ItemRepository>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            categories,
            items,
            cache,
        }
    }

    /// Active categories, featured first.
    pub async fn categories(&self, catalog: Catalog) -> Result<Value, AppError> {
        let key = format!("{}categories", cache_prefix(catalog));
        self.cached(&key, || self.categories.list_active(catalog))
            .await
    }

    /// An active category with its active items.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active category has this slug.
    pub async fn category(&self, catalog: Catalog, slug: &str) -> Result<Value, AppError> {
        let key = format!("{}category:{}", cache_prefix(catalog), slug);
        self.cached(&key, || async {
            let category = self
                .categories
                .find_by_slug(catalog, slug)
                .await?
                .filter(|c| c.is_active)
                .ok_or_else(|| {
                    AppError::not_found(
                        "Category not found",
                        json!({ "catalog": catalog, "slug": slug }),
                    )
                })?;
            let items = self
                .items
                .list_by_category(catalog, category.id, true)
                .await?;
            Ok(CategoryDetail { category, items })
        })
        .await
    }

    /// Active featured items from active categories.
    pub async fn featured(&self, catalog: Catalog) -> Result<Value, AppError> {
        let key = format!("{}featured", cache_prefix(catalog));
        self.cached(&key, || self.items.list_featured(catalog))
            .await
    }

    async fn cached<T, F, Fut>(&self, key: &str, load: F) -> Result<Value, AppError>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        if let Ok(Some(raw)) = self.cache.get(key).await {
            match serde_json::from_str::<Value>(&raw) {
                Ok(value) => return Ok(value),
                Err(e) => tracing::warn!("Discarding unreadable cache entry {}: {}", key, e),
            }
        }

        let value = serde_json::to_value(load().await?).map_err(|e| {
            AppError::internal(
                "Failed to serialize response",
                json!({ "reason": e.to_string() }),
            )
        })?;

        if let Err(e) = self.cache.set(key, &value.to_string(), None).await {
            tracing::warn!("Failed to cache {}: {}", key, e);
        }

        Ok(value)
    }
}
