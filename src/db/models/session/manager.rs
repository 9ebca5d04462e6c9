//! Manager for the session model.
use super::ActiveSession;
use crate::db::{models::timestamp_now, DatabaseConnection};
use async_trait::async_trait;

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Store a new session.
    ///
    /// # Errors
    /// Errors if the session cannot be inserted into the database.
    async fn create(&self, token: &str, user_id: i64, expires_at: &str) -> anyhow::Result<()> {
        let statement = "
            INSERT INTO session ( token, user_id, expires_at, created_at )
            VALUES ( $1, $2, $3, $4 )
        ";
        let mut connection = self.pool.acquire().await?;
        sqlx::query(statement)
            .bind(token)
            .bind(user_id)
            .bind(expires_at)
            .bind(timestamp_now())
            .execute(&mut *connection)
            .await?;
        Ok(())
    }

    /// Find a session together with its user.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<ActiveSession>> {
        let statement = "
            SELECT s.token, s.expires_at, u.*
            FROM session s
            JOIN app_user u ON u.id = s.user_id
            WHERE s.token = $1
        ";
        let mut connection = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, ActiveSession>(statement)
            .bind(token)
            .fetch_optional(&mut *connection)
            .await?;
        Ok(row)
    }

    /// Delete a session.
    ///
    /// # Errors
    /// Errors if the delete fails.
    async fn delete_by_token(&self, token: &str) -> anyhow::Result<u64> {
        let statement = "
            DELETE FROM session
            WHERE token = $1
        ";
        let mut connection = self.pool.acquire().await?;
        let result = sqlx::query(statement)
            .bind(token)
            .execute(&mut *connection)
            .await?;
        Ok(result.rows_affected())
    }
}
