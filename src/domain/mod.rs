//! Domain layer containing catalog entities, list-query types and the
//! contracts implemented by the infrastructure layer.
//!
//! # Architecture
//!
//! - [`entities`] - Catalog records, stored objects and API tokens
//! - [`query`] - Pagination, filter and sort types shared by list endpoints
//! - [`repositories`] - Data access trait definitions
//! - [`storage`] - Object storage contract (S3-compatible buckets)
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business rules live in [`crate::application::services`].

pub mod entities;
pub mod query;
pub mod repositories;
pub mod storage;
