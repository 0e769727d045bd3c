//! Repository trait for catalog items.

use crate::domain::entities::{Catalog, Item, ItemPatch, NewItem};
use crate::domain::query::{ItemQuery, Page};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for items.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgItemRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Returns one page of items matching the query, with category names joined.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, catalog: Catalog, query: ItemQuery) -> Result<Page<Item>, AppError>;

    /// Lists the items of a category ordered by name.
    async fn list_by_category(
        &self,
        catalog: Catalog,
        category_id: i64,
        only_active: bool,
    ) -> Result<Vec<Item>, AppError>;

    /// Lists active, featured items whose category is also active.
    async fn list_featured(&self, catalog: Catalog) -> Result<Vec<Item>, AppError>;

    async fn find_by_id(&self, catalog: Catalog, id: i64) -> Result<Option<Item>, AppError>;

    /// Checks whether `slug` is taken by an item other than `exclude_id`.
    async fn slug_exists(
        &self,
        catalog: Catalog,
        slug: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError>;

    /// Checks whether `sku` is taken by an item other than `exclude_id`.
    async fn sku_exists(
        &self,
        catalog: Catalog,
        sku: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError>;

    /// Inserts an item.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] on a slug or SKU collision.
    async fn create(&self, catalog: Catalog, new_item: NewItem) -> Result<Item, AppError>;

    /// Applies a partial update and bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the item does not exist.
    async fn update(&self, catalog: Catalog, id: i64, patch: ItemPatch)
    -> Result<Item, AppError>;

    /// Deletes an item row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the item does not exist.
    async fn delete(&self, catalog: Catalog, id: i64) -> Result<(), AppError>;
}
