//! Per-user listening endpoints
//!
//! - `POST /favorite/toggle/{song_id}`
//! - `GET /api/user/favorites`
//! - `GET /api/user/recently-played`
//! - `GET /api/songs/recommended`

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ApiResult;
use crate::middleware::AuthUser;
use crate::routes::catalog::SongCard;
use crate::state::AppState;

pub fn favorite_router(state: AppState) -> Router {
    Router::new()
        .route("/favorite/toggle/{song_id}", post(toggle_favorite))
        .route("/api/user/favorites", get(list_favorites))
        .route("/api/user/recently-played", get(recently_played))
        .route("/api/songs/recommended", get(recommended))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub success: bool,
    pub is_favorite: bool,
}

#[derive(Debug, Serialize)]
pub struct FavoriteEntry {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub duration: i64,
    pub plays: i64,
    pub cover_url: String,
    /// `YYYY-MM-DD`
    pub added_date: String,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<FavoriteEntry>,
}

#[derive(Debug, Serialize)]
pub struct RecentEntry {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub cover_url: String,
    pub played_at: DateTime<Utc>,
}

async fn toggle_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(song_id): Path<i64>,
) -> ApiResult<Json<ToggleResponse>> {
    let is_favorite = state.favorites.toggle(auth.user.id, song_id).await?;
    Ok(Json(ToggleResponse {
        success: true,
        is_favorite,
    }))
}

async fn list_favorites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<FavoritesResponse>> {
    let favorites = state.favorites.favorites(auth.user.id).await?;

    Ok(Json(FavoritesResponse {
        favorites: favorites
            .into_iter()
            .map(|f| FavoriteEntry {
                cover_url: f.cover_url(),
                added_date: f.added_at.format("%Y-%m-%d").to_string(),
                id: f.song_id,
                title: f.title,
                artist: f.artist_name,
                duration: f.duration,
                plays: f.plays,
            })
            .collect(),
    }))
}

async fn recently_played(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<RecentEntry>>> {
    let plays = state.favorites.recently_played(auth.user.id).await?;

    Ok(Json(
        plays
            .into_iter()
            .map(|p| RecentEntry {
                cover_url: p.cover_url(),
                id: p.song_id,
                title: p.title,
                artist: p.artist_name,
                played_at: p.played_at,
            })
            .collect(),
    ))
}

async fn recommended(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<SongCard>>> {
    let songs = state.favorites.recommended(auth.user.id).await?;
    Ok(Json(songs.into_iter().map(SongCard::from).collect()))
}
