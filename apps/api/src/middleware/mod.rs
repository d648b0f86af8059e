//! Middleware components for TuneHub
//!
//! Session cookie extractors for Axum handlers:
//! - `AuthUser`: requires a valid session, returns 401 if missing/invalid
//! - `MaybeAuthUser`: optional authentication, `None` if not signed in

pub mod auth;

pub use auth::{
    clear_session_cookie, extract_session_token, session_cookie, AuthUser, MaybeAuthUser,
    SESSION_COOKIE,
};
