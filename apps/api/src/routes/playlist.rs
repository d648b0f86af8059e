//! Playlist endpoints
//!
//! All mutations require a session and ownership of the playlist:
//! - `POST /playlist/create`
//! - `POST /playlist/{id}/add-song`
//! - `POST /playlist/{id}/remove-song`
//! - `POST /playlist/{id}/edit`
//! - `POST /playlist/{id}/delete`
//! - `GET /api/playlists` - the caller's playlists

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::middleware::AuthUser;
use crate::models::{PlaylistSummary, UpdatePlaylist};
use crate::state::AppState;

pub fn playlist_router(state: AppState) -> Router {
    Router::new()
        .route("/playlist/create", post(create_playlist))
        .route("/playlist/{playlist_id}/add-song", post(add_song))
        .route("/playlist/{playlist_id}/remove-song", post(remove_song))
        .route("/playlist/{playlist_id}/edit", post(edit_playlist))
        .route("/playlist/{playlist_id}/delete", post(delete_playlist))
        .route("/api/playlists", get(list_playlists))
        .with_state(state)
}

// ========== Request/Response Types ==========

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SongRef {
    pub song_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct EditPlaylistRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i64,
}

// ========== Route Handlers ==========

async fn create_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreatePlaylistRequest>,
) -> ApiResult<Json<CreatedResponse>> {
    let playlist = state
        .playlists
        .create(auth.user.id, &body.name, body.description.as_deref())
        .await?;

    Ok(Json(CreatedResponse {
        success: true,
        id: playlist.id,
    }))
}

async fn add_song(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(playlist_id): Path<i64>,
    Json(body): Json<SongRef>,
) -> ApiResult<Json<SuccessResponse>> {
    state
        .playlists
        .add_song(auth.user.id, playlist_id, body.song_id)
        .await?;
    Ok(SuccessResponse::ok())
}

async fn remove_song(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(playlist_id): Path<i64>,
    Json(body): Json<SongRef>,
) -> ApiResult<Json<SuccessResponse>> {
    state
        .playlists
        .remove_song(auth.user.id, playlist_id, body.song_id)
        .await?;
    Ok(SuccessResponse::ok())
}

async fn edit_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(playlist_id): Path<i64>,
    Json(body): Json<EditPlaylistRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let update = UpdatePlaylist {
        name: body.name,
        description: body.description,
    };
    state.playlists.edit(auth.user.id, playlist_id, update).await?;
    Ok(SuccessResponse::ok())
}

async fn delete_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(playlist_id): Path<i64>,
) -> ApiResult<Json<SuccessResponse>> {
    state.playlists.delete(auth.user.id, playlist_id).await?;
    Ok(SuccessResponse::ok())
}

async fn list_playlists(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PlaylistSummary>>> {
    Ok(Json(
        state
            .playlists
            .repository()
            .find_summaries_by_user(auth.user.id)
            .await?,
    ))
}
