//! Health check HTTP route handlers
//!
//! - `GET /health` - simple liveness check (returns 200 OK)
//! - `GET /health/live` - liveness probe with version
//! - `GET /health/ready` - readiness check against the database

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};

use crate::state::AppState;

/// Create health check router
pub fn health_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(simple_health))
        .route("/live", get(liveness_probe))
        .route("/ready", get(readiness_probe))
        .with_state(state)
}

/// Always OK while the server answers requests
async fn simple_health() -> &'static str {
    "OK"
}

/// Liveness probe; never checks dependencies
async fn liveness_probe() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness probe
///
/// # Response
/// - 200 OK if the database answers
/// - 503 Service Unavailable otherwise
async fn readiness_probe(State(state): State<AppState>) -> impl IntoResponse {
    let response = state.health.check_all().await;

    let status_code = if response.is_healthy() {
        StatusCode::OK
    } else {
        tracing::warn!(?response, "Readiness check failed");
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
