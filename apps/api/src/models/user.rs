//! User and session models for TuneHub
//!
//! This module contains the database models for:
//! - User accounts
//! - Server-side login sessions

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Avatar assigned to every new account
pub const DEFAULT_AVATAR: &str = "default-avatar.png";

/// User account from the users table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: i64,

    /// Login name (unique)
    pub username: String,

    /// User's email address (unique)
    pub email: String,

    /// Argon2 hashed password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Avatar file name under the static directory
    pub avatar: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Session row from the sessions table
///
/// The id is the SHA-256 hex digest of the cookie token; the token itself
/// is never stored.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is past its expiry time
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
