use sqlx::FromRow;

/// Account row in the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub username: String,
    #[sqlx(rename = "password")]
    pub password_hash: String, // digest only, never the raw password
}
