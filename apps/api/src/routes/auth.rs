//! Authentication route handlers for TuneHub
//!
//! - `GET|POST /login` - Log in and receive the session cookie
//! - `GET|POST /register` - Create a new user account
//! - `GET /logout` - Invalidate the current session

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::middleware::{clear_session_cookie, session_cookie, MaybeAuthUser};
use crate::services::auth::Registration;
use crate::state::AppState;
use crate::views::{login_page, register_page, Flash};

/// Create the authentication router
pub fn auth_router(state: AppState) -> Router {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/register", get(register_form).post(register))
        .route("/logout", get(logout))
        .with_state(state)
}

// ========== Request Types ==========

/// Login form body
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form body
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Query string of `GET /login`
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    /// Set after a successful registration
    pub registered: Option<String>,
}

// ========== Route Handlers ==========

async fn login_form(Query(query): Query<LoginQuery>) -> Response {
    let message = query
        .registered
        .is_some()
        .then_some(Flash::Info("Registration successful! Please login."));
    login_page(message).into_response()
}

/// Log in
///
/// # Response
/// - 303 See Other to `/` with the session cookie
/// - 401 Unauthorized: login page with an error message
async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> ApiResult<Response> {
    match state.auth.login(&form.username, &form.password).await {
        Ok((_user, token)) => {
            let cookie = session_cookie(
                &token,
                state.auth.session_ttl_secs(),
                state.settings.cookie_secure,
            );
            Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response())
        }
        Err(err @ ApiError::InvalidCredentials) => Ok((
            StatusCode::UNAUTHORIZED,
            login_page(Some(Flash::Error(&err.to_string()))),
        )
            .into_response()),
        Err(err) => Err(err),
    }
}

async fn register_form() -> Response {
    register_page(None).into_response()
}

/// Register a new user account
///
/// # Response
/// - 303 See Other to `/login?registered=1`
/// - 400 Bad Request: missing field, password mismatch or too short
/// - 409 Conflict: username or email taken
async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> ApiResult<Response> {
    let registration = Registration {
        username: &form.username,
        email: &form.email,
        password: &form.password,
        confirm_password: &form.confirm_password,
    };

    match state.auth.register(&registration).await {
        Ok(_) => Ok(Redirect::to("/login?registered=1").into_response()),
        Err(err @ (ApiError::Validation(_) | ApiError::Conflict(_))) => Ok((
            err.status_code(),
            register_page(Some(Flash::Error(&err.to_string()))),
        )
            .into_response()),
        Err(err) => Err(err),
    }
}

/// Log out and expire the cookie
async fn logout(State(state): State<AppState>, auth: MaybeAuthUser) -> ApiResult<Response> {
    let Some(token) = auth.token else {
        return Ok(Redirect::to("/login").into_response());
    };

    state.auth.logout(&token).await?;
    let cookie = clear_session_cookie(state.settings.cookie_secure);
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response())
}
