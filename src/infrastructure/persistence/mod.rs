//! PostgreSQL repository implementations.
//!
//! Queries are built at runtime with `sqlx::QueryBuilder` because table names
//! depend on the catalog and list filters are optional. Every user-supplied
//! value is bound; only whitelisted identifiers are pushed as SQL text.
//!
//! # Repositories
//!
//! - [`PgCategoryRepository`] - Categories of both catalogs
//! - [`PgItemRepository`] - Items of both catalogs
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_category_repository;
pub mod pg_item_repository;
pub mod pg_token_repository;

pub use pg_category_repository::PgCategoryRepository;
pub use pg_item_repository::PgItemRepository;
pub use pg_token_repository::PgTokenRepository;
