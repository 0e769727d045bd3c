//! Category management service.

use serde_json::json;
use std::sync::Arc;

use crate::application::services::bulk::{BulkDeleteReport, FailedId};
use crate::application::services::image_service::{ImageService, PresignedUpload};
use crate::application::services::storefront_service::revalidate;
use crate::domain::entities::{
    Catalog, Category, CategoryOption, CategoryPatch, ImageOwner, NewCategory,
};
use crate::domain::query::{CategoryQuery, Page};
use crate::domain::repositories::{CatalogSummary, CategoryRepository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::slug::resolve_unique;

const SLUG_FALLBACK: &str = "category";

/// Validated input for a new category.
#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
}

/// Requested changes to a category. `description: Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

/// Service for managing catalog categories.
///
/// Enforces:
/// - Unique, name-derived slugs
/// - No deletion while items still reference the category
/// - Storefront revalidation after every change
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
    images: Arc<ImageService>,
    cache: Arc<dyn CacheService>,
}

impl CategoryService {
    pub fn new(
        repository: Arc<dyn CategoryRepository>,
        images: Arc<ImageService>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            repository,
            images,
            cache,
        }
    }

    pub async fn list(
        &self,
        catalog: Catalog,
        query: CategoryQuery,
    ) -> Result<Page<Category>, AppError> {
        self.repository.list(catalog, query).await
    }

    pub async fn options(&self, catalog: Catalog) -> Result<Vec<CategoryOption>, AppError> {
        self.repository.list_options(catalog).await
    }

    /// Record counts of one catalog.
    pub async fn summary(&self, catalog: Catalog) -> Result<CatalogSummary, AppError> {
        self.repository.summary(catalog).await
    }

    /// Retrieves a category by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    pub async fn get(&self, catalog: Catalog, id: i64) -> Result<Category, AppError> {
        self.repository
            .find_by_id(catalog, id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Category not found", json!({"catalog": catalog, "id": id}))
            })
    }

    /// Creates a category with a slug derived from its name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if no free slug can be found.
    pub async fn create(
        &self,
        catalog: Catalog,
        input: CategoryInput,
    ) -> Result<Category, AppError> {
        let slug = self.unique_slug(catalog, &input.name, None).await?;

        let created = self
            .repository
            .create(
                catalog,
                NewCategory {
                    name: input.name,
                    slug,
                    description: input.description,
                    is_active: input.is_active,
                    is_featured: input.is_featured,
                },
            )
            .await?;

        tracing::info!(catalog = %catalog, id = created.id, slug = %created.slug, "Category created");
        revalidate(self.cache.as_ref(), catalog).await;
        Ok(created)
    }

    /// Applies changes to a category.
    ///
    /// The slug is regenerated only when the name actually changes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    pub async fn update(
        &self,
        catalog: Catalog,
        id: i64,
        changes: CategoryChanges,
    ) -> Result<Category, AppError> {
        let current = self.get(catalog, id).await?;

        let mut patch = CategoryPatch {
            description: changes.description,
            is_active: changes.is_active,
            is_featured: changes.is_featured,
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

    pub async fn toggle_active(&self, catalog: Catalog, id: i64) -> Result<Category, AppError> {
        let current = self.get(catalog, id).await?;
        let patch = CategoryPatch {
            is_active: Some(!current.is_active),
            ..Default::default()
        };
        self.apply(catalog, id, patch).await
    }

    pub async fn toggle_featured(&self, catalog: Catalog, id: i64) -> Result<Category, AppError> {
        let current = self.get(catalog, id).await?;
        let patch = CategoryPatch {
            is_featured: Some(!current.is_featured),
            ..Default::default()
        };
        self.apply(catalog, id, patch).await
    }

    /// Deletes a category and then its image.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    /// Returns [`AppError::Validation`] if items still belong to it; nothing is
    /// deleted in that case.
    pub async fn delete(&self, catalog: Catalog, id: i64) -> Result<(), AppError> {
        self.delete_one(catalog, id).await?;
        revalidate(self.cache.as_ref(), catalog).await;
        Ok(())
    }

    /// Deletes each id in turn and reports per-id outcomes.
    pub async fn bulk_delete(
        &self,
        catalog: Catalog,
        ids: &[i64],
    ) -> BulkDeleteReport<FailedId> {
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
            "Bulk category delete finished"
        );
        report
    }

    /// Presigns an upload for the category image.
    pub async fn image_upload_url(
        &self,
        catalog: Catalog,
        id: i64,
        content_type: &str,
    ) -> Result<PresignedUpload, AppError> {
        self.get(catalog, id).await?;
        self.images
            .prepare_upload(catalog, ImageOwner::Category, id, content_type)
            .await
    }

    /// Points the category at a freshly uploaded image.
    ///
    /// The previous object is removed when it lived at a different key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `key` is not this category's image key.
    pub async fn set_image(
        &self,
        catalog: Catalog,
        id: i64,
        key: &str,
    ) -> Result<Category, AppError> {
        let current = self.get(catalog, id).await?;
        let public_url = self
            .images
            .confirm_upload(catalog, ImageOwner::Category, id, key)
            .await?;

        let patch = CategoryPatch {
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

    /// Deletes the image object and clears the field.
    pub async fn remove_image(&self, catalog: Catalog, id: i64) -> Result<Category, AppError> {
        let current = self.get(catalog, id).await?;

        if let Some(url) = current.image.as_deref() {
            self.images.remove(url).await?;
        }

        let patch = CategoryPatch {
            image: Some(None),
            ..Default::default()
        };
        self.apply(catalog, id, patch).await
    }

    async fn apply(
        &self,
        catalog: Catalog,
        id: i64,
        patch: CategoryPatch,
    ) -> Result<Category, AppError> {
        let updated = self.repository.update(catalog, id, patch).await?;
        revalidate(self.cache.as_ref(), catalog).await;
        Ok(updated)
    }

    async fn delete_one(&self, catalog: Catalog, id: i64) -> Result<(), AppError> {
        let category = self.get(catalog, id).await?;

        let item_count = self.repository.count_items(catalog, id).await?;
        if item_count > 0 {
            return Err(AppError::bad_request(
                "Cannot delete category with associated items",
                json!({"id": id, "item_count": item_count}),
            ));
        }

        self.repository.delete(catalog, id).await?;

        if let Some(url) = category.image.as_deref() {
            self.images.remove_quietly(url).await;
        }

        tracing::info!(catalog = %catalog, id, "Category deleted");
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
