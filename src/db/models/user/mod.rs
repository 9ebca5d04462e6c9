use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{any::AnyRow, FromRow, Row as _};

pub mod manager;

/// Role name that grants access to user management.
pub const ADMIN_ROLE: &str = "admin";

/// Trait for managing users.
#[async_trait]
pub trait Manager {
    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    /// Find all users, ordered by email.
    async fn find_all(&self) -> anyhow::Result<Vec<User>>;
    /// Insert a user unless the email is taken.
    /// Returns whether a new user was created.
    async fn create_if_missing(
        &self,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> anyhow::Result<bool>;
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
/// Model for an admin panel user.
pub struct User {
    /// Store-assigned identifier.
    #[serde(rename = "_id")]
    pub id: i64,
    /// Login email, unique.
    pub email: String,
    /// Salted password hash, never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Either `admin` or `user`.
    pub role: String,
    /// Creation time, RFC 3339.
    pub created_at: String,
    /// Last update time, RFC 3339.
    pub updated_at: String,
}

impl FromRow<'_, AnyRow> for User {
    fn from_row(row: &AnyRow) -> anyhow::Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            role: row.try_get("role")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl User {
    /// Whether the user may manage other users.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}
