//! Utilities shared across the crate.

pub mod cli;
pub mod config;
pub mod password;
