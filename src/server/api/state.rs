//! Centralized state management for the Actix web server
use crate::{
    db,
    utils::config::{Config, SessionConfig},
};

/// Global, read-only state
pub trait Global {
    /// Database connection
    fn db(&self) -> &db::DatabaseConnection;
    /// Loaded configuration
    fn config(&self) -> &Config;

    /// Order of the first partner in the strip
    fn first_order(&self) -> i64 {
        self.config().partners.first_order
    }

    /// Session cookie settings
    fn session(&self) -> &SessionConfig {
        &self.config().session
    }
}

/// Application state
#[derive(Debug, Clone)]
pub struct App {
    /// Database connection
    pub db: db::DatabaseConnection,
    /// Loaded configuration
    pub config: Config,
}

impl Global for App {
    fn db(&self) -> &db::DatabaseConnection {
        &self.db
    }

    fn config(&self) -> &Config {
        &self.config
    }
}
