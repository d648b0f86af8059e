//! Deezer metadata proxy endpoints
//!
//! - `GET /api/music/search?q=&limit=10`
//! - `GET /api/music/track/{id}`
//! - `GET /api/music/trending`
//! - `GET /api/music/artist/{id}/top`
//!
//! Upstream failures surface as 500 with the client's error message.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::services::music::{SearchResults, TopTracks, TrackInfo, DEFAULT_SEARCH_LIMIT};
use crate::state::AppState;

pub fn music_router(state: AppState) -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/track/{track_id}", get(track))
        .route("/trending", get(trending))
        .route("/artist/{artist_id}/top", get(artist_top))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct MusicSearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

async fn search(
    State(state): State<AppState>,
    Query(query): Query<MusicSearchQuery>,
) -> ApiResult<Json<SearchResults>> {
    if query.q.is_empty() {
        return Err(ApiError::validation("No search query"));
    }

    let limit = query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    Ok(Json(state.music.search(&query.q, limit).await?))
}

async fn track(
    State(state): State<AppState>,
    Path(track_id): Path<i64>,
) -> ApiResult<Json<TrackInfo>> {
    Ok(Json(state.music.track(track_id).await?))
}

async fn trending(State(state): State<AppState>) -> ApiResult<Json<SearchResults>> {
    Ok(Json(state.music.trending().await?))
}

async fn artist_top(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
) -> ApiResult<Json<TopTracks>> {
    Ok(Json(state.music.artist_top(artist_id).await?))
}
