//! Repository trait for catalog categories.

use crate::domain::entities::{Catalog, Category, CategoryOption, CategoryPatch, NewCategory};
use crate::domain::query::{CategoryQuery, Page};
use crate::error::AppError;
use async_trait::async_trait;
use serde::Serialize;

/// Record counts for one catalog, shown on the dashboard and by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CatalogSummary {
    pub categories: i64,
    pub active_categories: i64,
    pub items: i64,
    pub active_items: i64,
    pub featured_items: i64,
}

/// Repository interface for categories.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCategoryRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Returns one page of categories matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, catalog: Catalog, query: CategoryQuery)
    -> Result<Page<Category>, AppError>;

    /// Lists `{id, name}` pairs of active categories ordered by name.
    async fn list_options(&self, catalog: Catalog) -> Result<Vec<CategoryOption>, AppError>;

    /// Lists active categories, featured first, then by name.
    async fn list_active(&self, catalog: Catalog) -> Result<Vec<Category>, AppError>;

    async fn find_by_id(&self, catalog: Catalog, id: i64) -> Result<Option<Category>, AppError>;

    async fn find_by_slug(
        &self,
        catalog: Catalog,
        slug: &str,
    ) -> Result<Option<Category>, AppError>;

    /// Checks whether `slug` is taken by a category other than `exclude_id`.
    async fn slug_exists(
        &self,
        catalog: Catalog,
        slug: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError>;

    /// Inserts a category.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the slug is already taken.
    async fn create(&self, catalog: Catalog, new_category: NewCategory)
    -> Result<Category, AppError>;

    /// Applies a partial update and bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    async fn update(
        &self,
        catalog: Catalog,
        id: i64,
        patch: CategoryPatch,
    ) -> Result<Category, AppError>;

    /// Deletes a category row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    async fn delete(&self, catalog: Catalog, id: i64) -> Result<(), AppError>;

    /// Counts items assigned to a category.
    async fn count_items(&self, catalog: Catalog, id: i64) -> Result<i64, AppError>;

    async fn summary(&self, catalog: Catalog) -> Result<CatalogSummary, AppError>;
}
