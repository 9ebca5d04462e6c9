use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{any::AnyRow, FromRow, Row as _};

use super::user::User;

pub mod manager;

/// Trait for managing login sessions.
#[async_trait]
pub trait Manager {
    /// Store a new session for `user_id`.
    async fn create(&self, token: &str, user_id: i64, expires_at: &str) -> anyhow::Result<()>;
    /// Find a session and its user by token, whether or not it has expired.
    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<ActiveSession>>;
    /// Delete a session by token. Returns the number of deleted rows.
    async fn delete_by_token(&self, token: &str) -> anyhow::Result<u64>;
}

/// A session joined with the user it belongs to.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    /// Opaque session token, as stored in the cookie.
    pub token: String,
    /// Expiry time, RFC 3339.
    pub expires_at: String,
    /// Owner of the session.
    pub user: User,
}

impl FromRow<'_, AnyRow> for ActiveSession {
    fn from_row(row: &AnyRow) -> anyhow::Result<Self, sqlx::Error> {
        Ok(Self {
            token: row.try_get("token")?,
            expires_at: row.try_get("expires_at")?,
            user: User::from_row(row)?,
        })
    }
}

impl ActiveSession {
    /// Whether the session is past its expiry time at `now`.
    /// A session whose expiry cannot be parsed counts as expired.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        DateTime::parse_from_rfc3339(&self.expires_at)
            .map_or(true, |expires_at| expires_at <= now)
    }
}
