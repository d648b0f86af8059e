//! Authentication service for TuneHub
//!
//! This module provides the authentication functionality:
//! - User registration with Argon2id password hashing
//! - Login backed by server-side sessions
//! - Session resolution from the cookie token
//! - Logout

use argon2::{
    password_hash::{
        rand_core::{OsRng, RngCore},
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};
use tracing::instrument;

use crate::error::{ApiError, ApiResult};
use crate::models::user::User;
use crate::repositories::{SessionRepository, UserRepository};

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Random bytes in a session token before encoding
const SESSION_TOKEN_BYTES: usize = 32;

/// Parse duration strings like "15m", "7d", "24h" to seconds
///
/// Returns `None` for an unknown unit or a value that overflows `i64`.
pub fn parse_duration_string(s: &str) -> Option<i64> {
    let s = s.trim();
    let (split, unit) = s.char_indices().last()?;
    let num: i64 = s[..split].parse().ok()?;

    let multiplier = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3600,
        'd' => 24 * 3600,
        'w' => 7 * 24 * 3600,
        _ => return None,
    };
    num.checked_mul(multiplier)
}

/// Registration form input
#[derive(Debug, Clone, Default)]
pub struct Registration<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

/// Authentication service providing registration, login, and sessions
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    sessions: SessionRepository,
    session_ttl_secs: i64,
    argon2: Argon2<'static>,
    /// Verified against when a username is unknown so that failed logins
    /// take the same time whether or not the account exists.
    dummy_password_hash: String,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(users: UserRepository, sessions: SessionRepository, session_ttl_secs: i64) -> Self {
        let argon2 = Argon2::default();

        let dummy_salt = SaltString::generate(&mut OsRng);
        let dummy_password_hash = argon2
            .hash_password(b"dummy_password_for_timing_attack_prevention", &dummy_salt)
            .expect("dummy password hashing should not fail")
            .to_string();

        Self {
            users,
            sessions,
            session_ttl_secs,
            argon2,
            dummy_password_hash,
        }
    }

    /// Session lifetime in seconds
    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl_secs
    }

    /// Register a new user account
    ///
    /// Checks run in this order: required fields, password confirmation,
    /// password length, username uniqueness, email uniqueness.
    ///
    /// # Errors
    /// - `ApiError::Validation` if a field is missing or the password is rejected
    /// - `ApiError::Conflict` if the username or email is taken
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn register(&self, form: &Registration<'_>) -> ApiResult<User> {
        let username = form.username.trim();
        let email = form.email.trim();

        if username.is_empty() || email.is_empty() || form.password.is_empty() {
            return Err(ApiError::validation("All fields are required"));
        }

        if form.password != form.confirm_password {
            return Err(ApiError::validation("Passwords do not match"));
        }

        if form.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ApiError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        if self.users.username_exists(username).await? {
            return Err(ApiError::Conflict("Username already exists".to_string()));
        }

        if self.users.email_exists(email).await? {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = self.hash_password(form.password)?;

        let user = self
            .users
            .create(username, email, &password_hash)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    ApiError::Conflict("Username or email already registered".to_string())
                }
                _ => ApiError::Database(e),
            })?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered successfully");

        Ok(user)
    }

    /// Authenticate a user and open a new session
    ///
    /// # Returns
    /// The user and the raw session token to hand to the browser
    ///
    /// # Errors
    /// - `ApiError::InvalidCredentials` if the username or password is wrong
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<(User, String)> {
        let user = self.users.find_by_username(username.trim()).await?;

        // Verify a hash whether or not the user exists
        let (user, password_valid) = match user {
            Some(u) => {
                let valid = self.verify_password(password, &u.password_hash)?;
                (Some(u), valid)
            }
            None => {
                let _ = self.verify_password(password, &self.dummy_password_hash);
                (None, false)
            }
        };

        let user = match (user, password_valid) {
            (Some(u), true) => u,
            (Some(_), false) => {
                tracing::warn!(username = %username, "Login failed: invalid password");
                return Err(ApiError::InvalidCredentials);
            }
            (None, _) => {
                tracing::warn!(username = %username, "Login failed: user not found");
                return Err(ApiError::InvalidCredentials);
            }
        };

        let token = self.create_session(user.id).await?;

        tracing::info!(user_id = user.id, username = %user.username, "User logged in successfully");

        Ok((user, token))
    }

    /// Resolve a cookie token to its user
    ///
    /// Unknown tokens yield `None`; expired sessions are deleted and also
    /// yield `None`.
    pub async fn resolve_session(&self, token: &str) -> ApiResult<Option<User>> {
        let token_hash = hash_token(token);

        let Some(session) = self.sessions.find_by_id(&token_hash).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            tracing::debug!(user_id = session.user_id, "Session expired");
            self.sessions.delete(&token_hash).await?;
            return Ok(None);
        }

        Ok(self.users.find_by_id(session.user_id).await?)
    }

    /// Delete the session behind a cookie token
    pub async fn logout(&self, token: &str) -> ApiResult<bool> {
        let deleted = self.sessions.delete(&hash_token(token)).await?;
        tracing::info!(deleted, "User logged out");
        Ok(deleted)
    }

    /// Drop every session row whose expiry has passed
    pub async fn purge_expired_sessions(&self) -> ApiResult<u64> {
        let purged = self.sessions.delete_expired().await?;
        if purged > 0 {
            tracing::info!(purged, "Expired sessions removed");
        }
        Ok(purged)
    }

    /// Create a user unless the username is already taken
    ///
    /// # Returns
    /// `true` if the user was created, `false` if it already existed
    pub async fn ensure_user(&self, username: &str, email: &str, password: &str) -> ApiResult<bool> {
        if self.users.username_exists(username).await? {
            return Ok(false);
        }

        let password_hash = self.hash_password(password)?;
        self.users.create(username, email, &password_hash).await?;
        Ok(true)
    }

    /// Store a new session for `user_id` and return its raw token
    async fn create_session(&self, user_id: i64) -> ApiResult<String> {
        let mut bytes = [0u8; SESSION_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let token = URL_SAFE_NO_PAD.encode(bytes);

        let expires_at = Utc::now() + Duration::seconds(self.session_ttl_secs);
        self.sessions
            .create(&hash_token(&token), user_id, expires_at)
            .await?;

        Ok(token)
    }

    /// Hash a password with Argon2id
    fn hash_password(&self, password: &str) -> ApiResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Verify a password against an Argon2id hash
    fn verify_password(&self, password: &str, hash: &str) -> ApiResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| ApiError::Internal(format!("Invalid password hash format: {}", e)))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

/// Hash a token using SHA-256 for secure storage
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
