//! Playlist service
//!
//! Owner-checked playlist mutations on top of [`PlaylistRepository`].
//! Read paths (listing a user's playlists, rendering a playlist page) go
//! straight to the repository.

use sqlx::SqlitePool;
use tracing::instrument;

use crate::error::{ApiError, ApiResult};
use crate::models::{Playlist, UpdatePlaylist};
use crate::repositories::{PlaylistRepository, SongRepository};

/// Service for playlist operations
#[derive(Clone)]
pub struct PlaylistService {
    playlists: PlaylistRepository,
    songs: SongRepository,
}

impl PlaylistService {
    /// Create a new PlaylistService
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            playlists: PlaylistRepository::new(pool.clone()),
            songs: SongRepository::new(pool),
        }
    }

    /// Access the underlying repository for read-only queries
    pub fn repository(&self) -> &PlaylistRepository {
        &self.playlists
    }

    /// Create a playlist owned by `user_id`
    #[instrument(skip(self, description))]
    pub async fn create(
        &self,
        user_id: i64,
        name: &str,
        description: Option<&str>,
    ) -> ApiResult<Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::validation("Playlist name is required"));
        }

        let playlist = self.playlists.create(user_id, name, description).await?;
        tracing::info!(playlist_id = playlist.id, user_id, "Playlist created");
        Ok(playlist)
    }

    /// Add a song; already-present and unknown songs are accepted as no-ops
    #[instrument(skip(self))]
    pub async fn add_song(&self, user_id: i64, playlist_id: i64, song_id: i64) -> ApiResult<()> {
        self.owned_playlist(user_id, playlist_id).await?;

        if !self.songs.exists(song_id).await? {
            tracing::debug!(song_id, "Ignoring unknown song for playlist add");
            return Ok(());
        }

        if !self.playlists.contains_song(playlist_id, song_id).await? {
            self.playlists.add_song(playlist_id, song_id).await?;
        }
        Ok(())
    }

    /// Remove a song; removing a non-member succeeds without change
    #[instrument(skip(self))]
    pub async fn remove_song(&self, user_id: i64, playlist_id: i64, song_id: i64) -> ApiResult<()> {
        self.owned_playlist(user_id, playlist_id).await?;

        if self.playlists.contains_song(playlist_id, song_id).await? {
            self.playlists.remove_song(playlist_id, song_id).await?;
        }
        Ok(())
    }

    /// Apply a partial name/description update
    #[instrument(skip(self, update))]
    pub async fn edit(&self, user_id: i64, playlist_id: i64, update: UpdatePlaylist) -> ApiResult<()> {
        self.owned_playlist(user_id, playlist_id).await?;

        let update = UpdatePlaylist {
            name: update.name.filter(|name| !name.trim().is_empty()),
            description: update.description,
        };
        self.playlists.update(playlist_id, &update).await?;
        Ok(())
    }

    /// Delete a playlist and its membership rows
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: i64, playlist_id: i64) -> ApiResult<()> {
        self.owned_playlist(user_id, playlist_id).await?;
        self.playlists.delete(playlist_id).await?;
        tracing::info!(playlist_id, user_id, "Playlist deleted");
        Ok(())
    }

    /// Load a playlist, failing with 404 when missing and 403 for non-owners
    async fn owned_playlist(&self, user_id: i64, playlist_id: i64) -> ApiResult<Playlist> {
        let playlist = self
            .playlists
            .find_by_id(playlist_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Playlist", playlist_id))?;

        if !playlist.is_owned_by(user_id) {
            tracing::warn!(playlist_id, user_id, owner = playlist.user_id, "Playlist ownership check failed");
            return Err(ApiError::Forbidden("Unauthorized".to_string()));
        }
        Ok(playlist)
    }
}
