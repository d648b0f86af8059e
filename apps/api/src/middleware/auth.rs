//! Session cookie authentication extractors for Axum handlers
//!
//! - `AuthUser`: requires a valid session, returns 401 if missing/invalid
//! - `MaybeAuthUser`: optional authentication, `None` if not signed in
//!
//! Both read the `tunehub_session` cookie and resolve it through the
//! [`AuthService`] stored in the request extensions.
//!
//! # Usage
//!
//! ```rust,ignore
//! async fn protected_handler(auth: AuthUser) -> impl IntoResponse {
//!     format!("Hello, {}!", auth.user.username)
//! }
//!
//! async fn optional_auth_handler(auth: MaybeAuthUser) -> impl IntoResponse {
//!     match auth.user {
//!         Some(user) => format!("Hello, {}!", user.username),
//!         None => "Hello, guest!".to_string(),
//!     }
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts, HeaderMap},
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::models::user::User;
use crate::services::AuthService;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "tunehub_session";

/// Authenticated user extractor
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    /// Raw session token from the cookie
    pub token: String,
}

/// Optional authentication extractor
#[derive(Debug, Clone, Default)]
pub struct MaybeAuthUser {
    pub user: Option<User>,
    pub token: Option<String>,
}

/// Authentication rejection types
#[derive(Debug)]
pub enum AuthRejection {
    /// No session cookie
    MissingToken,
    /// Cookie present but the session is unknown or expired
    InvalidSession,
    /// Database error while resolving the session
    DatabaseError(String),
    /// AuthService not installed as an extension
    MissingServices,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let error = match self {
            AuthRejection::MissingToken => {
                tracing::debug!("Authentication rejected: missing session cookie");
                ApiError::Unauthorized
            }
            AuthRejection::InvalidSession => {
                tracing::debug!("Authentication rejected: unknown or expired session");
                ApiError::Unauthorized
            }
            AuthRejection::DatabaseError(e) => {
                tracing::error!(error = %e, "Authentication rejected: database error");
                ApiError::Internal(format!("Failed to resolve session: {}", e))
            }
            AuthRejection::MissingServices => {
                tracing::error!("Authentication rejected: AuthService missing from extensions");
                ApiError::Internal("Authentication services not configured".to_string())
            }
        };

        error.into_response()
    }
}

/// Extract the session token from the Cookie header(s)
pub fn extract_session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token)
        .filter(|token| !token.is_empty())
}

/// `Set-Cookie` value establishing a session
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value expiring the session cookie
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_session_token(&parts.headers)
            .ok_or(AuthRejection::MissingToken)?
            .to_string();

        let auth_service = parts
            .extensions
            .get::<AuthService>()
            .ok_or(AuthRejection::MissingServices)?;

        let user = auth_service
            .resolve_session(&token)
            .await
            .map_err(|e| AuthRejection::DatabaseError(e.to_string()))?
            .ok_or(AuthRejection::InvalidSession)?;

        Ok(AuthUser { user, token })
    }
}

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_session_token(&parts.headers).map(str::to_string) else {
            return Ok(MaybeAuthUser::default());
        };

        let Some(auth_service) = parts.extensions.get::<AuthService>() else {
            tracing::warn!("AuthService not in extensions for MaybeAuthUser");
            return Ok(MaybeAuthUser::default());
        };

        match auth_service.resolve_session(&token).await {
            Ok(Some(user)) => Ok(MaybeAuthUser {
                user: Some(user),
                token: Some(token),
            }),
            Ok(None) => Ok(MaybeAuthUser::default()),
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup failed in MaybeAuthUser");
                Ok(MaybeAuthUser::default())
            }
        }
    }
}
