//! Playlist model for TuneHub

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Cover assigned to every new playlist
pub const DEFAULT_PLAYLIST_COVER: &str = "default-playlist.jpg";

/// Playlist record from the playlists table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Playlist {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Owning user; only the owner may mutate the playlist
    pub user_id: i64,
    pub cover_image: String,
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Whether the given user owns this playlist
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Playlist with its song count, as listed for the owner
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlaylistSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub song_count: i64,
}

/// Partial update; absent fields keep their current value
#[derive(Debug, Clone, Default)]
pub struct UpdatePlaylist {
    pub name: Option<String>,
    pub description: Option<String>,
}
