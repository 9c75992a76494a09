use sqlx::SqlitePool;
use tracing::debug;

use crate::accounts::{
    password::{verify_password, PasswordScheme},
    repo_types::User,
};
use crate::errors::StoreError;

impl User {
    /// Register `username`. Returns `Ok(false)` when the name is taken; the
    /// existing row is left untouched.
    pub async fn create_account(
        db: &SqlitePool,
        scheme: PasswordScheme,
        username: &str,
        password: &str,
    ) -> Result<bool, StoreError> {
        let hash = scheme
            .hash(password)
            .map_err(|e| StoreError::Hashing(e.to_string()))?;

        let res = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(&hash)
            .execute(db)
            .await;

        match res {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                debug!(%username, "username already registered");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// True iff `username` exists and `password` matches its stored hash.
    pub async fn verify_credentials(
        db: &SqlitePool,
        username: &str,
        password: &str,
    ) -> Result<bool, StoreError> {
        let Some(user) = Self::find_by_username(db, username).await? else {
            return Ok(false);
        };
        Ok(verify_password(password, &user.password_hash))
    }

    pub async fn find_by_username(
        db: &SqlitePool,
        username: &str,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT username, password
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    #[tokio::test]
    async fn create_then_verify() {
        let db = memory_pool().await;
        assert!(User::create_account(&db, PasswordScheme::Sha256, "ada", "pw1").await.unwrap());
        assert!(User::verify_credentials(&db, "ada", "pw1").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected_without_overwrite() {
        let db = memory_pool().await;
        assert!(User::create_account(&db, PasswordScheme::Sha256, "ada", "first").await.unwrap());
        let before = User::find_by_username(&db, "ada").await.unwrap().unwrap();

        assert!(!User::create_account(&db, PasswordScheme::Sha256, "ada", "second").await.unwrap());

        let after = User::find_by_username(&db, "ada").await.unwrap().unwrap();
        assert_eq!(before.password_hash, after.password_hash);
        assert!(User::verify_credentials(&db, "ada", "first").await.unwrap());
        assert!(!User::verify_credentials(&db, "ada", "second").await.unwrap());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_both_fail() {
        let db = memory_pool().await;
        User::create_account(&db, PasswordScheme::Sha256, "ada", "pw").await.unwrap();
        assert!(!User::verify_credentials(&db, "ada", "nope").await.unwrap());
        assert!(!User::verify_credentials(&db, "grace", "pw").await.unwrap());
    }

    #[tokio::test]
    async fn raw_password_never_stored() {
        let db = memory_pool().await;
        User::create_account(&db, PasswordScheme::Sha256, "ada", "plaintext-secret")
            .await
            .unwrap();
        let stored: Vec<(String,)> = sqlx::query_as("SELECT password FROM users")
            .fetch_all(&db)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert!(!stored[0].0.contains("plaintext-secret"));
        assert_eq!(stored[0].0, PasswordScheme::Sha256.hash("plaintext-secret").unwrap());
    }

    #[tokio::test]
    async fn empty_username_is_accepted() {
        let db = memory_pool().await;
        assert!(User::create_account(&db, PasswordScheme::Sha256, "", "pw").await.unwrap());
        assert!(User::verify_credentials(&db, "", "pw").await.unwrap());
    }

    #[tokio::test]
    async fn mixed_schemes_verify_in_one_store() {
        let db = memory_pool().await;
        User::create_account(&db, PasswordScheme::Sha256, "legacy", "old").await.unwrap();
        User::create_account(&db, PasswordScheme::Argon2, "modern", "new").await.unwrap();
        assert!(User::verify_credentials(&db, "legacy", "old").await.unwrap());
        assert!(User::verify_credentials(&db, "modern", "new").await.unwrap());
        assert!(!User::verify_credentials(&db, "modern", "old").await.unwrap());
    }

    #[tokio::test]
    async fn closed_pool_is_a_storage_error() {
        let db = memory_pool().await;
        db.close().await;
        let err = User::verify_credentials(&db, "ada", "pw").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
