//! Configuration file for the server.
//!
//! Every section and every key is optional; missing values fall back to the
//! defaults below, so an absent config file runs a local SQLite setup.

use serde_derive::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use crate::db::DEFAULT_MAX_CONNECTIONS;
use crate::partners::DEFAULT_FIRST_ORDER;

/// Config file read when `--config` is not passed.
pub const DEFAULT_CONFIG_PATH: &str = "sbd.toml";

/// Top-level config object.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Partner ordering settings.
    pub partners: PartnersConfig,
    /// Login session settings.
    pub session: SessionConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind: String,
    /// Port to listen on.
    pub port: u16,
}

/// `[database]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx connection url. `DATABASE_URL` takes precedence.
    pub url: String,
    /// Size of the connection pool.
    pub max_connections: u32,
}

/// `[partners]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct PartnersConfig {
    /// Order of the first partner in the strip, usually 1 or 0.
    pub first_order: i64,
}

/// `[session]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Lifetime of a session in hours.
    pub ttl_hours: i64,
    /// Only send the cookie over HTTPS.
    pub secure_cookie: bool,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for daily rolling log files. Logs go to stdout only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://sbd.sqlite3?mode=rwc".to_owned(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Default for PartnersConfig {
    fn default() -> Self {
        Self {
            first_order: DEFAULT_FIRST_ORDER,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "sbd_session".to_owned(),
            ttl_hours: 72,
            secure_cookie: false,
        }
    }
}

impl Config {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    /// Will error if the text is not valid TOML or has values of the wrong type.
    pub fn parse(config_str: &str) -> anyhow::Result<Self> {
        let conf: Self = toml::from_str(config_str)?;
        Ok(conf)
    }

    /// Load the config at `path`.
    /// A missing file at the default location yields the default config.
    ///
    /// # Errors
    /// Will error if an explicitly requested file is missing, or if the file cannot be parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() && path == Path::new(DEFAULT_CONFIG_PATH) {
            tracing::debug!("No config file at '{}', using defaults", path.display());
            return Ok(Self::default());
        }
        let config_str = read_to_string(path).map_err(|err| {
            anyhow::anyhow!("Unable to read config file '{}': {err}", path.display())
        })?;
        Self::parse(&config_str)
    }
}
