use crate::db::{DatabaseConnection, DatabaseKind, Db as _};
use crate::utils::config::DatabaseConfig;
use std::env;

/// Connects to a database and applies migrations.
/// The url comes from the `[database]` section of the config file, but we can override it by
/// setting the `DATABASE_URL` environment variable.
///
/// # Errors
/// Errors if connection to database fails.
/// Connections can fail if the database is not running, or if the database URL is invalid.
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db_url = env::var("DATABASE_URL").unwrap_or_else(|_| config.url.clone());
    let connection = DatabaseConnection::connect(&db_url, config.max_connections).await?;
    tracing::info!("Connected to database");
    migrate(&connection).await?;
    Ok(connection)
}

/// Apply any pending migrations for the connected database kind.
///
/// # Errors
/// Errors if a migration fails to apply.
pub async fn migrate(connection: &DatabaseConnection) -> anyhow::Result<()> {
    match connection.kind {
        DatabaseKind::Sqlite => {
            sqlx::migrate!("./migrations/sqlite")
                .run(&connection.pool)
                .await?;
        }
        DatabaseKind::Postgres => {
            sqlx::migrate!("./migrations/postgres")
                .run(&connection.pool)
                .await?;
        }
    }
    tracing::debug!("Migrations applied");
    Ok(())
}
