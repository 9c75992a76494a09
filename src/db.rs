use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::info;

/// Open the SQLite pool, creating the database file when it does not exist yet.
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("parse database url {database_url}"))?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .context("connect to database")?;
    info!(%database_url, max_connections, "database pool established");
    Ok(pool)
}

/// Create the `users` and `history` tables. Safe to run on every start.
pub async fn init_schema(db: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            username TEXT PRIMARY KEY,
            password TEXT
        )
        "#,
    )
    .execute(db)
    .await?;

    // No foreign key on username: history rows reference accounts by name only.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS history (
            username TEXT,
            feature TEXT,
            score TEXT,
            details TEXT
        )
        "#,
    )
    .execute(db)
    .await?;

    info!("database schema ready");
    Ok(())
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    init_schema(&pool).await.expect("schema");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let db = memory_pool().await;
        init_schema(&db).await.expect("second run succeeds");

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&db)
        .await
        .unwrap();
        let names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        assert_eq!(names, vec!["history", "users"]);
    }

    #[tokio::test]
    async fn connect_creates_missing_file() {
        let path = std::env::temp_dir().join(format!("talentmatch-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let url = format!("sqlite://{}", path.display());

        let db = connect(&url, 1).await.expect("connect");
        init_schema(&db).await.expect("schema");
        db.close().await;

        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }
}
