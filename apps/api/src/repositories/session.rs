//! Session repository for centralized database operations

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::user::Session;

/// Repository for session database operations
#[derive(Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Create a new SessionRepository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new session record
    ///
    /// # Arguments
    /// * `token_hash` - SHA-256 hex digest of the cookie token, used as the id
    /// * `user_id` - ID of the user who owns this session
    /// * `expires_at` - Session expiration timestamp
    pub async fn create(
        &self,
        token_hash: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(token_hash)
        .bind(user_id)
        .bind(Utc::now())
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Find a session by its token hash, expired or not
    pub async fn find_by_id(&self, token_hash: &str) -> Result<Option<Session>, sqlx::Error> {
        sqlx::query_as::<_, Session>(
            "SELECT id, user_id, created_at, expires_at FROM sessions WHERE id = ?",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete a single session (logout)
    ///
    /// # Returns
    /// * `Ok(true)` - If the session was deleted
    /// * `Ok(false)` - If no session with the given id exists
    pub async fn delete(&self, token_hash: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every session whose expiry has passed
    pub async fn delete_expired(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
