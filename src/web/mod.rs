//! Web admin for browsers.
//!
//! Askama renders the page shells; the tables and forms call the JSON API
//! with the token kept in the `auth_token` cookie.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Cookie authentication
//! - [`routes`] - Admin route configuration

pub mod handlers;
pub mod middleware;
pub mod routes;
