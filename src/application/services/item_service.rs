//! Item management service.

use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

use crate::application::services::bulk::{BulkDeleteReport, FailedId};
use crate::application::services::image_service::{ImageService, PresignedUpload};
use crate::application::services::storefront_service::revalidate;
use crate::domain::entities::{Catalog, ImageOwner, Item, ItemPatch, NewItem};
use crate::domain::query::{ItemQuery, Page};
use crate::domain::repositories::{CategoryRepository, ItemRepository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::slug::resolve_unique;

const SLUG_FALLBACK: &str = "item";

/// Prices are stored as `NUMERIC(12, 2)`.
const MAX_PRICE_SCALE: u32 = 2;
const MAX_PRICE_EXCLUSIVE: i64 = 10_000_000_000;

/// Validated input for a new item.
#[derive(Debug, Clone)]
pub struct ItemInput {
    pub name: String,
    pub category_id: i64,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub sku: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
}

/// Requested changes to an item. Inner `None` clears a nullable field.
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub description: Option<Option<String>>,
    pub price: Option<Option<Decimal>>,
    pub sku: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

/// Checks that a price is non-negative, has at most two decimals and fits
/// the column.
pub fn validate_price(price: Decimal) -> Result<(), AppError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(AppError::bad_request(
            "Price must not be negative",
            json!({"price": price.to_string()}),
        ));
    }

    if price.normalize().scale() > MAX_PRICE_SCALE {
        return Err(AppError::bad_request(
            "Price must have at most two decimal places",
            json!({"price": price.to_string()}),
        ));
    }

    if price >= Decimal::from(MAX_PRICE_EXCLUSIVE) {
        return Err(AppError::bad_request(
            "Price is too large",
            json!({"price": price.to_string(), "max": "9999999999.99"}),
        ));
    }

    Ok(())
}

/// Trims a SKU and treats blank input as "no SKU".
fn normalize_sku(sku: Option<String>) -> Option<String> {
    sku.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Service for managing catalog items.
pub struct ItemService {
    repository: Arc<dyn ItemRepository>,
    categories: Arc<dyn CategoryRepository>,
    images: Arc<ImageService>,
    cache: Arc<dyn CacheService>,
}

impl ItemService {
    pub fn new(
        repository: Arc<dyn ItemRepository>,
        categories: Arc<dyn CategoryRepository>,
        images: Arc<ImageService>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            repository,
            categories,
            images,
            cache,
        }
    }

    pub async fn list(&self, catalog: Catalog, query: ItemQuery) -> Result<Page<Item>, AppError> {
        self.repository.list(catalog, query).await
    }

    /// Retrieves an item by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the item does not exist.
    pub async fn get(&self, catalog: Catalog, id: i64) -> Result<Item, AppError> {
        self.repository
            .find_by_id(catalog, id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Item not found", json!({"catalog": catalog, "id": id}))
            })
    }

    /// Creates an item.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a missing category or an invalid price.
    /// Returns [`AppError::Conflict`] if the SKU is already used in this catalog.
    pub async fn create(&self, catalog: Catalog, input: ItemInput) -> Result<Item, AppError> {
        self.ensure_category(catalog, input.category_id).await?;
        if let Some(price) = input.price {
            validate_price(price)?;
        }
        let sku = normalize_sku(input.sku);
        if let Some(sku) = sku.as_deref() {
            self.ensure_sku_free(catalog, sku, None).await?;
        }

        let slug = self.unique_slug(catalog, &input.name, None).await?;

        let created = self
            .repository
            .create(
                catalog,
                NewItem {
                    name: input.name,
                    slug,
                    description: input.description,
                    price: input.price,
                    sku,
                    is_active: input.is_active,
                    is_featured: input.is_featured,
                    category_id: input.category_id,
                },
            )
            .await?;

        tracing::info!(catalog = %catalog, id = created.id, slug = %created.slug, "Item created");
        revalidate(self.cache.as_ref(), catalog).await;
        Ok(created)
    }

    /// Applies changes to an item.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the item does not exist.
    /// Returns [`AppError::Validation`] for a missing category or an invalid price.
    /// Returns [`AppError::Conflict`] if the new SKU is already used.
    pub async fn update(
        &self,
        catalog: Catalog,
        id: i64,
        changes: ItemChanges,
    ) -> Result<Item, AppError> {
        let current = self.get(catalog, id).await?;

        if let Some(category_id) = changes.category_id
            && category_id != current.category_id
        {
            self.ensure_category(catalog, category_id).await?;
        }

        if let Some(Some(price)) = changes.price {
            validate_price(price)?;
        }

        let sku = changes.sku.map(normalize_sku);
        if let Some(Some(new_sku)) = sku.as_ref()
            && current.sku.as_deref() != Some(new_sku.as_str())
        {
            self.ensure_sku_free(catalog, new_sku, Some(id)).await?;
        }

        let mut patch = ItemPatch {
            description: changes.description,
            price: changes.price,
            sku,
            is_active: changes.is_active,
            is_featured: changes.is_featured,
            category_id: changes.category_id,
            ..Default::default()
        };

        if let Some(name) = changes.name
            && name != current.name
        {
            patch.slug = Some(self.unique_slug(catalog, &name, Some(id)).await?);
            patch.name = Some(name);
        }

        self.apply(catalog, id, patch).await
    }

    pub async fn toggle_active(&self, catalog: Catalog, id: i64) -> Result<Item, AppError> {
        let current = self.get(catalog, id).await?;
        let patch = ItemPatch {
            is_active: Some(!current.is_active),
            ..Default::default()
        };
        self.apply(catalog, id, patch).await
    }

    pub async fn toggle_featured(&self, catalog: Catalog, id: i64) -> Result<Item, AppError> {
        let current = self.get(catalog, id).await?;
        let patch = ItemPatch {
            is_featured: Some(!current.is_featured),
            ..Default::default()
        };
        self.apply(catalog, id, patch).await
    }

    /// Deletes an item and then its image.
    pub async fn delete(&self, catalog: Catalog, id: i64) -> Result<(), AppError> {
        self.delete_one(catalog, id).await?;
        revalidate(self.cache.as_ref(), catalog).await;
        Ok(())
    }

    pub async fn bulk_delete(&self, catalog: Catalog, ids: &[i64]) -> BulkDeleteReport<FailedId> {
        let mut report = BulkDeleteReport::new(ids.len());

        for &id in ids {
            match self.delete_one(catalog, id).await {
                Ok(()) => report.deleted += 1,
                Err(e) => report.failed.push(FailedId::new(id, &e)),
            }
        }

        if report.deleted > 0 {
            revalidate(self.cache.as_ref(), catalog).await;
        }

        tracing::info!(
            catalog = %catalog,
            requested = report.requested,
            deleted = report.deleted,
            failed = report.failed.len(),
            "Bulk item delete finished"
        );
        report
    }

    pub async fn image_upload_url(
        &self,
        catalog: Catalog,
        id: i64,
        content_type: &str,
    ) -> Result<PresignedUpload, AppError> {
        self.get(catalog, id).await?;
        self.images
            .prepare_upload(catalog, ImageOwner::Item, id, content_type)
            .await
    }

    /// Points the item at a freshly uploaded image, removing a previous object
    /// stored under another key.
    pub async fn set_image(&self, catalog: Catalog, id: i64, key: &str) -> Result<Item, AppError> {
        let current = self.get(catalog, id).await?;
        let public_url = self
            .images
            .confirm_upload(catalog, ImageOwner::Item, id, key)
            .await?;

        let patch = ItemPatch {
            image: Some(Some(public_url)),
            ..Default::default()
        };
        let updated = self.apply(catalog, id, patch).await?;

        if let Some(old) = current.image
            && self.images.key_for_url(&old).as_deref() != Some(key)
        {
            self.images.remove_quietly(&old).await;
        }

        Ok(updated)
    }

    pub async fn remove_image(&self, catalog: Catalog, id: i64) -> Result<Item, AppError> {
        let current = self.get(catalog, id).await?;

        if let Some(url) = current.image.as_deref() {
            self.images.remove(url).await?;
        }

        let patch = ItemPatch {
            image: Some(None),
            ..Default::default()
        };
        self.apply(catalog, id, patch).await
    }

    async fn apply(&self, catalog: Catalog, id: i64, patch: ItemPatch) -> Result<Item, AppError> {
        let updated = self.repository.update(catalog, id, patch).await?;
        revalidate(self.cache.as_ref(), catalog).await;
        Ok(updated)
    }

    async fn delete_one(&self, catalog: Catalog, id: i64) -> Result<(), AppError> {
        let item = self.get(catalog, id).await?;
        self.repository.delete(catalog, id).await?;

        if let Some(url) = item.image.as_deref() {
            self.images.remove_quietly(url).await;
        }

        tracing::info!(catalog = %catalog, id, "Item deleted");
        Ok(())
    }

    async fn ensure_category(&self, catalog: Catalog, category_id: i64) -> Result<(), AppError> {
        if self
            .categories
            .find_by_id(catalog, category_id)
            .await?
            .is_none()
        {
            return Err(AppError::bad_request(
                "Category does not exist",
                json!({"catalog": catalog, "category_id": category_id}),
            ));
        }
        Ok(())
    }

    async fn ensure_sku_free(
        &self,
        catalog: Catalog,
        sku: &str,
        exclude_id: Option<i64>,
    ) -> Result<(), AppError> {
        if self.repository.sku_exists(catalog, sku, exclude_id).await? {
            return Err(AppError::conflict(
                "SKU already exists",
                json!({"catalog": catalog, "sku": sku}),
            ));
        }
        Ok(())
    }

    async fn unique_slug(
        &self,
        catalog: Catalog,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<String, AppError> {
        resolve_unique(name, SLUG_FALLBACK, |slug| {
            let repository = Arc::clone(&self.repository);
            async move { repository.slug_exists(catalog, &slug, exclude_id).await }
        })
        .await
    }
}
