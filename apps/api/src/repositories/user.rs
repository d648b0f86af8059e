//! User repository for centralized database operations

use chrono::Utc;
use sqlx::SqlitePool;

use super::utils::USER_COLUMNS;
use crate::models::user::{User, DEFAULT_AVATAR};

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new UserRepository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a user by their unique ID
    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Find a user by login name (exact match)
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = ?",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    /// Check whether a username is taken
    pub async fn username_exists(&self, username: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
            .bind(username)
            .fetch_one(&self.pool)
            .await
    }

    /// Check whether an email address is already registered
    pub async fn email_exists(&self, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
    }

    /// Insert a new user with the default avatar
    ///
    /// # Errors
    /// Returns a unique-violation database error when the username or email
    /// is taken by a concurrent registration.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, avatar, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(DEFAULT_AVATAR)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }
}
