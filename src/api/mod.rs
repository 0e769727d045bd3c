//! REST API layer for HTTP request/response handling.
//!
//! Translates HTTP requests into service calls and wraps results in the
//! `{ "success", "data" }` envelope.
//!
//! # Modules
//!
//! - [`dto`] - Request bodies, query parameters and response envelopes
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authentication and request tracing
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
