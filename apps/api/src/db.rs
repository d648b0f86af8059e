//! SQLite connection pool and migrations
//!
//! The pool enforces foreign keys (playlist membership cascades on delete)
//! and uses WAL journaling for file-backed databases.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{info, warn};
use tunehub_shared_config::DatabaseConfig;

use crate::error::ApiResult;

/// Create a configured SQLite connection pool and apply pending migrations
pub async fn create_pool(config: &DatabaseConfig) -> ApiResult<SqlitePool> {
    info!(
        database_url = %config.url,
        max_connections = config.max_connections,
        "Creating database connection pool"
    );

    let mut connect_options = SqliteConnectOptions::from_str(&config.url)?
        .foreign_keys(true)
        .create_if_missing(true);

    if !config.is_in_memory() {
        connect_options = connect_options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);
    }

    let mut pool_options = SqlitePoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs));

    // An in-memory database lives exactly as long as its connection
    if config.is_in_memory() {
        pool_options = pool_options.idle_timeout(None).max_lifetime(None);
    }

    let pool = pool_options
        .connect_with(connect_options)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create connection pool");
            e
        })?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// In-memory pool with migrations applied, for tests
pub async fn create_test_pool() -> ApiResult<SqlitePool> {
    create_pool(&DatabaseConfig::in_memory()).await
}

/// Apply the migrations embedded from `migrations/`
pub async fn run_migrations(pool: &SqlitePool) -> ApiResult<()> {
    info!("Running database migrations");

    sqlx::migrate!("./migrations").run(pool).await.map_err(|e| {
        warn!(error = %e, "Migration failed");
        e
    })?;

    Ok(())
}

/// Verify the database answers a trivial query
pub async fn health_check(pool: &SqlitePool) -> ApiResult<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_test_pool_applies_migrations() {
        let pool = create_test_pool().await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        for expected in [
            "albums",
            "artists",
            "favorites",
            "play_history",
            "playlist_songs",
            "playlists",
            "sessions",
            "songs",
            "users",
        ] {
            assert!(tables.iter().any(|t| t == expected), "missing table {}", expected);
        }
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let pool = create_test_pool().await.unwrap();
        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn test_health_check() {
        let pool = create_test_pool().await.unwrap();
        assert!(health_check(&pool).await.is_ok());
    }
}
