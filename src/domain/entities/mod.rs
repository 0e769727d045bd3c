//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Catalog`] - Which catalog (products or services) a record belongs to
//! - [`Category`] - A catalog category
//! - [`Item`] - A product or service offered inside a category
//! - [`StoredObject`] / [`Folder`] - Objects and prefixes in the bucket
//!
//! Creation and partial updates use separate structs (`NewCategory`,
//! `CategoryPatch`, ...) the same way for every entity.

pub mod catalog;
pub mod category;
pub mod item;
pub mod object;

pub use catalog::{Catalog, ImageOwner};
pub use category::{Category, CategoryOption, CategoryPatch, NewCategory};
pub use item::{Item, ItemPatch, NewItem};
pub use object::{Folder, Listing, StoredObject};
