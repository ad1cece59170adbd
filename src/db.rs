use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::config::AppConfig;

pub async fn connect(config: &AppConfig) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .context("parse DATABASE_URL")?
        .create_if_missing(true);
    let db = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(options)
        .await
        .context("connect to database")?;
    info!(max_connections = config.max_connections, "database pool ready");
    Ok(db)
}

pub async fn migrate(db: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run migrations")?;
    Ok(())
}

/// Single-connection in-memory pool. Every connection to `sqlite::memory:`
/// opens its own database, so the pool must never recycle its one connection.
pub async fn memory_pool() -> anyhow::Result<SqlitePool> {
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .context("open in-memory database")?;
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_and_migrate_creates_users_table() {
        let config = AppConfig {
            database_url: "sqlite::memory:".into(),
            max_connections: 1,
            acquire_timeout_secs: 5,
        };
        let db = connect(&config).await.expect("connect");
        migrate(&db).await.expect("migrate");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&db)
            .await
            .expect("users table exists");
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let db = memory_pool().await.expect("pool");
        migrate(&db).await.expect("first run");
        migrate(&db).await.expect("second run");
    }
}
