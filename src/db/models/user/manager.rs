//! Manager for the user model.
use super::User;
use crate::db::{models::timestamp_now, DatabaseConnection};
use async_trait::async_trait;

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find a user by email.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let statement = "
            SELECT *
            FROM app_user
            WHERE email = $1
        ";
        let mut connection = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, User>(statement)
            .bind(email)
            .fetch_optional(&mut *connection)
            .await?;
        Ok(row)
    }

    /// Find all users.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all(&self) -> anyhow::Result<Vec<User>> {
        let statement = "
            SELECT *
            FROM app_user
            ORDER BY email ASC
        ";
        let mut connection = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, User>(statement)
            .fetch_all(&mut *connection)
            .await?;
        Ok(rows)
    }

    /// Insert a user if no user with `email` exists yet.
    ///
    /// # Errors
    /// Errors if the user cannot be inserted into the database.
    async fn create_if_missing(
        &self,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> anyhow::Result<bool> {
        let statement = "
            INSERT INTO app_user ( email, password_hash, role, created_at, updated_at )
            VALUES ( $1, $2, $3, $4, $5 )
            ON CONFLICT ( email ) DO NOTHING
        ";
        let now = timestamp_now();
        let mut connection = self.pool.acquire().await?;
        let result = sqlx::query(statement)
            .bind(email)
            .bind(password_hash)
            .bind(role)
            .bind(&now)
            .bind(&now)
            .execute(&mut *connection)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
