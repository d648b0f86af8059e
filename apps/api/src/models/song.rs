//! Song model for TuneHub
//!
//! Most read paths need a song together with its artist name and album
//! cover, so the joined [`SongDetails`] row is the workhorse here.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::album::cover_url;

/// Song record from the songs table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist_id: i64,
    pub album_id: Option<i64>,
    /// Duration in seconds
    pub duration: i64,
    /// File name under the uploads audio directory
    pub file_path: String,
    /// Play counter, only ever incremented
    pub plays: i64,
    pub created_at: DateTime<Utc>,
}

/// Song joined with artist name and (optional) album title/cover
#[derive(Debug, Clone, FromRow)]
pub struct SongDetails {
    pub id: i64,
    pub title: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub album_id: Option<i64>,
    pub album_title: Option<String>,
    pub cover_image: Option<String>,
    pub duration: i64,
    pub file_path: String,
    pub plays: i64,
    pub created_at: DateTime<Utc>,
}

impl SongDetails {
    /// Public URL of the album cover (default image when there is none)
    pub fn cover_url(&self) -> String {
        cover_url(self.cover_image.as_deref())
    }

    /// Public URL of the uploaded audio file
    pub fn file_url(&self) -> String {
        format!("/static/uploads/audio/{}", self.file_path)
    }

    /// Album title for display; songs without an album are singles
    pub fn album_display(&self) -> &str {
        self.album_title.as_deref().unwrap_or("Single")
    }

    /// Duration formatted as m:ss
    pub fn duration_display(&self) -> String {
        format_duration(self.duration)
    }
}

/// Input for inserting a song during upload
#[derive(Debug, Clone)]
pub struct NewSong<'a> {
    pub title: &'a str,
    pub artist_id: i64,
    pub album_id: Option<i64>,
    pub duration: i64,
    pub file_path: &'a str,
}

/// Format a duration in seconds as m:ss
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
