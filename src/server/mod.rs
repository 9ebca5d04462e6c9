//! HTTP server for the admin and public API.

pub mod api;
pub mod app;
pub mod auth;
pub mod errors;
pub mod tracing;
