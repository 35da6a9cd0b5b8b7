//! # appliances-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON REST API** under `api/appliances`, optionally behind a
//!   configured base path prefix
//! - Map HTTP requests into application service calls (driving adapter)
//! - Render every result in one of two envelopes: `{data, meta?}` on success,
//!   `{message, details?}` on failure
//! - Answer CORS preflight requests and decorate responses with CORS headers
//!
//! ## Dependency rule
//! Depends on `appliances-app` (for port traits and services) and
//! `appliances-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod body;
pub mod cors;
pub mod error;
pub mod response;
pub mod router;
pub mod state;
