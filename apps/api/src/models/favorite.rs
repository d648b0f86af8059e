//! Favorite and play history models for TuneHub

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::album::cover_url;

/// Favorite record linking a user to a song
#[derive(Debug, Clone, FromRow)]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub song_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A favorited song with the data the favorites list shows
#[derive(Debug, Clone, FromRow)]
pub struct FavoriteSong {
    pub song_id: i64,
    pub title: String,
    pub artist_name: String,
    pub duration: i64,
    pub plays: i64,
    pub cover_image: Option<String>,
    pub added_at: DateTime<Utc>,
}

impl FavoriteSong {
    pub fn cover_url(&self) -> String {
        cover_url(self.cover_image.as_deref())
    }
}

/// A play history entry joined with the song shown for it
#[derive(Debug, Clone, FromRow)]
pub struct RecentPlay {
    pub song_id: i64,
    pub title: String,
    pub artist_name: String,
    pub cover_image: Option<String>,
    pub played_at: DateTime<Utc>,
}

impl RecentPlay {
    pub fn cover_url(&self) -> String {
        cover_url(self.cover_image.as_deref())
    }
}
