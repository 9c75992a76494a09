use sqlx::SqlitePool;
use tracing::debug;

use crate::errors::StoreError;
use crate::history::repo_types::{encode_score, Feature, HistoryEntry, HistoryRow};

/// Append one entry. There is no update or delete.
pub async fn append(
    db: &SqlitePool,
    username: &str,
    feature: Feature,
    score: Option<u8>,
    details: &str,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        INSERT INTO history (username, feature, score, details)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(username)
    .bind(feature.as_str())
    .bind(encode_score(score))
    .bind(details)
    .execute(db)
    .await?;
    debug!(%username, %feature, ?score, "history appended");
    Ok(())
}

/// Every entry for `username`, oldest first.
pub async fn list_for_user(db: &SqlitePool, username: &str) -> Result<Vec<HistoryEntry>, StoreError> {
    let rows = sqlx::query_as::<_, HistoryRow>(
        r#"
        SELECT username, feature, score, details
        FROM history
        WHERE username = ?
        ORDER BY rowid ASC
        "#,
    )
    .bind(username)
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(HistoryEntry::from).collect())
}
