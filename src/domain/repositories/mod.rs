//! Repository trait definitions for the domain layer.
//!
//! Traits define the data access contract; PostgreSQL implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! with `mockall` for service tests.
//!
//! # Available Repositories
//!
//! - [`CategoryRepository`] - Category CRUD, slug lookups, catalog summary
//! - [`ItemRepository`] - Item CRUD, slug and SKU lookups, storefront reads
//! - [`TokenRepository`] - API token authentication
//!
//! Every catalog-scoped method takes a [`crate::domain::entities::Catalog`]
//! so products and services share one implementation.

pub mod category_repository;
pub mod item_repository;
pub mod token_repository;

pub use category_repository::{CatalogSummary, CategoryRepository};
pub use item_repository::ItemRepository;
pub use token_repository::{ApiToken, TokenRepository};

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use item_repository::MockItemRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
