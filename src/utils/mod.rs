//! Helper functions shared by the service layer.
//!
//! - [`slug`] - Slug derivation and unique-slug probing
//! - [`storage_keys`] - Bucket key layout and key/name validation

pub mod slug;
pub mod storage_keys;
