use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{ConnectOptions, SqlitePool};
use sqlx_migrator::{Migrate, Plan};
use tracing::log::LevelFilter;

/// Per-connection settings: WAL journaling, a busy timeout and enforced
/// foreign keys.
fn connect_options(database_url: &str) -> Result<SqliteConnectOptions> {
    Ok(SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true)
        .pragma("cache_size", "-20000")
        .pragma("temp_store", "memory")
        .log_statements(LevelFilter::Debug))
}

/// Pool for queries. Several connections may read concurrently under WAL.
///
/// Open the write pool first so the database file exists in WAL mode.
pub async fn create_read_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(
            connect_options(database_url)?
                .create_if_missing(false)
                .read_only(true),
        )
        .await?;

    tracing::info!(max_connections, "read pool ready");

    Ok(pool)
}

/// Single-connection pool for writes, SQLite allows one writer at a time.
pub async fn create_write_pool(database_url: &str) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options(database_url)?)
        .await?;

    tracing::info!("write pool ready");

    Ok(pool)
}

/// Read-write pool for CLI commands and tests.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(connect_options(database_url)?)
        .await?;

    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    let mut conn = pool.acquire().await?;
    let migrator = formforge_db::migrator()?;
    migrator.run(&mut conn, &Plan::apply_all()).await?;

    tracing::info!("migrations applied");

    Ok(())
}
