//! Router assembly

use axum::{
    extract::Extension,
    http::{header, Method},
    Router,
};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tunehub_deezer_client::DeezerClient;

use crate::config::AppSettings;
use crate::routes::{
    auth_router, catalog_router, favorite_router, health_router, music_router, pages_router,
    playlist_router, streaming_router, upload_router,
};
use crate::state::AppState;

/// Build the CORS layer from the settings.
///
/// - Configured `CORS_ORIGINS`: only those origins, with credentials
/// - Production without origins: no cross-origin requests
/// - Development without origins: permissive
pub fn build_cors_layer(settings: &AppSettings) -> CorsLayer {
    match &settings.cors_allowed_origins {
        Some(origins) if !origins.is_empty() => {
            let allowed_origins: Vec<_> = origins
                .iter()
                .filter_map(|origin| {
                    origin.parse().ok().or_else(|| {
                        tracing::warn!("Invalid CORS origin '{}', skipping", origin);
                        None
                    })
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::error!("No valid CORS origins configured, CORS requests will be rejected");
                return CorsLayer::new();
            }

            tracing::info!(
                "CORS configured with {} allowed origin(s): {:?}",
                allowed_origins.len(),
                origins
            );
            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::HEAD, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN, header::RANGE])
                .allow_credentials(true)
                .max_age(std::time::Duration::from_secs(3600))
        }
        _ if settings.production => {
            tracing::warn!(
                "CORS_ORIGINS not configured in production mode. \
                 CORS requests will be rejected."
            );
            CorsLayer::new()
        }
        _ => {
            tracing::debug!("Using permissive CORS in development mode");
            CorsLayer::permissive()
        }
    }
}

/// Build the complete application router
///
/// # Routes
/// - HTML pages, `/login`, `/register`, `/logout`
/// - `/search`, `/api/...` catalog, playlist, favorite, upload and stream endpoints
/// - `/api/music/...` Deezer proxy
/// - `/health`, `/health/live`, `/health/ready`
/// - `/static/*` files from the static directory
pub fn build_router(pool: SqlitePool, deezer: DeezerClient, settings: AppSettings) -> Router {
    let cors_layer = build_cors_layer(&settings);
    let static_dir = settings.static_dir.clone();
    let state = AppState::new(pool, deezer, settings);

    Router::new()
        .merge(pages_router(state.clone()))
        .merge(auth_router(state.clone()))
        .merge(catalog_router(state.clone()))
        .merge(playlist_router(state.clone()))
        .merge(favorite_router(state.clone()))
        .merge(upload_router(state.clone()))
        .merge(streaming_router(state.clone()))
        .nest("/api/music", music_router(state.clone()))
        .nest("/health", health_router(state.clone()))
        .nest_service("/static", ServeDir::new(static_dir))
        // AuthService for the session extractors
        .layer(Extension(state.auth))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
}
