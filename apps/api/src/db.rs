use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

const CREATE_APPLICATIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS applications (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    company      TEXT NOT NULL,
    position     TEXT NOT NULL,
    job_link     TEXT,
    status       TEXT,
    applied_date DATE,
    notes        TEXT
)
"#;

/// Creates and returns a SQLite connection pool, creating the database file if needed.
///
/// `sqlite::memory:` databases are private to one connection, so callers using them
/// should pass `max_connections = 1`.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    info!("Connecting to SQLite at {database_url}...");

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{database_url}'"))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    info!("SQLite connection pool established");
    Ok(pool)
}

/// Creates the `applications` table when it does not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(CREATE_APPLICATIONS_TABLE)
        .execute(pool)
        .await
        .context("Failed to create applications table")?;
    Ok(())
}

#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = create_pool("sqlite::memory:", 1).await.unwrap();
    init_schema(&pool).await.unwrap();
    pool
}
