//! HTML page handlers
//!
//! - `GET /` - featured songs, recent albums, artists
//! - `GET /library` - the whole catalog
//! - `GET /player/{id}` - player page; counts a play
//! - `GET /discover` - trending, new releases, artists, personal picks
//! - `GET /favorites` - the signed-in user's favorites
//! - `GET /playlist/{id}` - a playlist's songs

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use maud::Markup;

use crate::error::{ApiError, ApiResult};
use crate::middleware::MaybeAuthUser;
use crate::models::PlaylistSummary;
use crate::state::AppState;
use crate::views::{self, DiscoverLists};

/// Songs in the featured list
const FEATURED_SONGS: i64 = 10;

/// Albums and artists on the home page
const HOME_CARDS: i64 = 6;

/// Entries per discover list
const DISCOVER_LIMIT: i64 = 10;

pub fn pages_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/library", get(library))
        .route("/player/{song_id}", get(player))
        .route("/discover", get(discover))
        .route("/favorites", get(favorites))
        .route("/playlist/{playlist_id}", get(playlist))
        .with_state(state)
}

async fn home(State(state): State<AppState>, auth: MaybeAuthUser) -> ApiResult<Markup> {
    let featured = state.songs.find_most_played(FEATURED_SONGS).await?;
    let albums = state.albums.find_recent(HOME_CARDS).await?;
    let artists = state.artists.find_first(HOME_CARDS).await?;

    Ok(views::home_page(
        auth.user.as_ref(),
        &featured,
        &albums,
        &artists,
    ))
}

async fn library(State(state): State<AppState>, auth: MaybeAuthUser) -> ApiResult<Markup> {
    let songs = state.songs.find_all().await?;
    let albums = state.albums.find_all().await?;
    let artists = state.artists.find_all().await?;
    let playlists = own_playlists(&state, &auth).await?;

    Ok(views::library_page(
        auth.user.as_ref(),
        &songs,
        &albums,
        &artists,
        &playlists,
    ))
}

/// Render the player and count the play
///
/// The play counter is bumped for every load; signed-in visitors also get
/// a history entry.
async fn player(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    Path(song_id): Path<i64>,
) -> ApiResult<Markup> {
    if !state.songs.increment_plays(song_id).await? {
        return Err(ApiError::not_found("Song", song_id));
    }

    let song = state
        .songs
        .find_details(song_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Song", song_id))?;

    if let Some(user) = &auth.user {
        state.favorites.record_play(user.id, song_id).await?;
    }

    let playlists = own_playlists(&state, &auth).await?;

    tracing::debug!(song_id, plays = song.plays, "Player page served");
    Ok(views::player_page(auth.user.as_ref(), &song, &playlists))
}

async fn discover(State(state): State<AppState>, auth: MaybeAuthUser) -> ApiResult<Markup> {
    let mut lists = DiscoverLists {
        trending: state.songs.find_most_played(DISCOVER_LIMIT).await?,
        new_releases: state.albums.find_recent(DISCOVER_LIMIT).await?,
        popular_artists: state.artists.find_first(DISCOVER_LIMIT).await?,
        ..Default::default()
    };

    if let Some(user) = &auth.user {
        lists.recommended = state.favorites.recommended(user.id).await?;
        lists.recently_played = state.favorites.recently_played(user.id).await?;
    }

    Ok(views::discover_page(auth.user.as_ref(), &lists))
}

async fn own_playlists(state: &AppState, auth: &MaybeAuthUser) -> ApiResult<Vec<PlaylistSummary>> {
    match &auth.user {
        Some(user) => Ok(state
            .playlists
            .repository()
            .find_summaries_by_user(user.id)
            .await?),
        None => Ok(Vec::new()),
    }
}

async fn favorites(State(state): State<AppState>, auth: MaybeAuthUser) -> ApiResult<Response> {
    let Some(user) = auth.user else {
        return Ok(Redirect::to("/login").into_response());
    };

    let favorites = state.favorites.favorites(user.id).await?;
    Ok(views::favorites_page(&user, &favorites).into_response())
}

async fn playlist(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    Path(playlist_id): Path<i64>,
) -> ApiResult<Markup> {
    let repo = state.playlists.repository();
    let playlist = repo
        .find_by_id(playlist_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Playlist", playlist_id))?;
    let songs = repo.get_songs(playlist_id).await?;

    Ok(views::playlist_page(auth.user.as_ref(), &playlist, &songs))
}
