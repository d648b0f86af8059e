//! Catalog query endpoints
//!
//! - `GET /search?q=` - substring search over songs, artists and albums
//! - `GET /api/song/{id}` - song details for the player
//! - `GET /api/stats` - catalog counters
//! - `GET /api/songs/trending` - most played songs
//! - `GET /api/albums/new-releases` - newest albums
//! - `GET /api/artists/popular` - artists with their song counts

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::artist::artist_image_url;
use crate::models::{AlbumWithArtist, SongDetails};
use crate::repositories::CatalogStats;
use crate::state::AppState;

/// Length of the trending, new-release and popular-artist lists
const LIST_LIMIT: i64 = 10;

pub fn catalog_router(state: AppState) -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/api/song/{song_id}", get(get_song))
        .route("/api/stats", get(stats))
        .route("/api/songs/trending", get(trending_songs))
        .route("/api/albums/new-releases", get(new_releases))
        .route("/api/artists/popular", get(popular_artists))
        .with_state(state)
}

// ========== Request/Response Types ==========

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SongHit {
    pub id: i64,
    pub title: String,
    pub artist: String,
}

#[derive(Debug, Serialize)]
pub struct ArtistHit {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct AlbumCard {
    pub id: i64,
    pub title: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct SearchResponse {
    pub songs: Vec<SongHit>,
    pub artists: Vec<ArtistHit>,
    pub albums: Vec<AlbumCard>,
}

/// Song as the player fetches it
#[derive(Debug, Serialize)]
pub struct SongResponse {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration: i64,
    pub file_url: String,
    pub cover_url: String,
}

impl From<SongDetails> for SongResponse {
    fn from(song: SongDetails) -> Self {
        Self {
            id: song.id,
            album: song.album_display().to_string(),
            file_url: song.file_url(),
            cover_url: song.cover_url(),
            title: song.title,
            artist: song.artist_name,
            duration: song.duration,
        }
    }
}

/// Compact song entry for the discovery lists
#[derive(Debug, Serialize)]
pub struct SongCard {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub cover_url: String,
}

impl From<SongDetails> for SongCard {
    fn from(song: SongDetails) -> Self {
        Self {
            id: song.id,
            cover_url: song.cover_url(),
            title: song.title,
            artist: song.artist_name,
        }
    }
}

impl AlbumCard {
    fn with_cover(album: AlbumWithArtist) -> Self {
        Self {
            id: album.id,
            cover_url: Some(album.cover_url()),
            title: album.title,
            artist: album.artist_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PopularArtist {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub songs_count: i64,
}

// ========== Route Handlers ==========

/// Case-insensitive substring search; an empty query matches nothing
async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<SearchResponse>> {
    if query.q.is_empty() {
        return Ok(Json(SearchResponse::default()));
    }

    let songs = state.songs.search(&query.q).await?;
    let artists = state.artists.search(&query.q).await?;
    let albums = state.albums.search(&query.q).await?;

    Ok(Json(SearchResponse {
        songs: songs
            .into_iter()
            .map(|s| SongHit {
                id: s.id,
                title: s.title,
                artist: s.artist_name,
            })
            .collect(),
        artists: artists
            .into_iter()
            .map(|a| ArtistHit { id: a.id, name: a.name })
            .collect(),
        albums: albums
            .into_iter()
            .map(|a| AlbumCard {
                id: a.id,
                title: a.title,
                artist: a.artist_name,
                cover_url: None,
            })
            .collect(),
    }))
}

async fn get_song(
    State(state): State<AppState>,
    Path(song_id): Path<i64>,
) -> ApiResult<Json<SongResponse>> {
    let song = state
        .songs
        .find_details(song_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Song", song_id))?;
    Ok(Json(song.into()))
}

async fn stats(State(state): State<AppState>) -> ApiResult<Json<CatalogStats>> {
    Ok(Json(state.songs.stats().await?))
}

async fn trending_songs(State(state): State<AppState>) -> ApiResult<Json<Vec<SongCard>>> {
    let songs = state.songs.find_most_played(LIST_LIMIT).await?;
    Ok(Json(songs.into_iter().map(SongCard::from).collect()))
}

async fn new_releases(State(state): State<AppState>) -> ApiResult<Json<Vec<AlbumCard>>> {
    let albums = state.albums.find_recent(LIST_LIMIT).await?;
    Ok(Json(albums.into_iter().map(AlbumCard::with_cover).collect()))
}

async fn popular_artists(State(state): State<AppState>) -> ApiResult<Json<Vec<PopularArtist>>> {
    let artists = state.artists.find_first_with_song_counts(LIST_LIMIT).await?;
    Ok(Json(
        artists
            .into_iter()
            .map(|a| PopularArtist {
                image_url: artist_image_url(Some(&a.image)),
                id: a.id,
                name: a.name,
                songs_count: a.songs_count,
            })
            .collect(),
    ))
}
