//! MySQL pool factory and startup checks for bookshelf.

use std::time::Duration;

use anyhow::Context;
use bookshelf_kernel::settings::DatabaseSettings;
use sqlx::mysql::MySqlPoolOptions;

pub type DbPool = sqlx::MySqlPool;

/// Create a connection pool and verify a first connection.
///
/// Fails when the server cannot be reached, so the process never accepts
/// traffic without a working store.
pub async fn create_pool(settings: &DatabaseSettings) -> anyhow::Result<DbPool> {
    tracing::info!(
        target: "bookshelf-db",
        url = %settings.redacted_url(),
        max_connections = settings.max_connections,
        "connecting to database"
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
        .connect(&settings.url)
        .await
        .with_context(|| format!("failed to connect to {}", settings.redacted_url()))?;

    health_check(&pool)
        .await
        .context("database health check failed")?;

    tracing::info!(target: "bookshelf-db", "database connection established");
    Ok(pool)
}

/// Round-trip a trivial query on a pooled connection.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
