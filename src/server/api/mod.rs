//! This module contains the API endpoints for the server.
pub mod auth;
pub mod partners;
pub mod routes;
pub mod state;
pub mod users;
