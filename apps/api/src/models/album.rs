//! Album model for TuneHub

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Cover stored for albums uploaded without an image
pub const DEFAULT_ALBUM_COVER: &str = "default-album.jpg";

/// Album title used when an upload names no album
pub const SINGLES_ALBUM: &str = "Singles";

/// Album record from the albums table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Album {
    pub id: i64,
    pub title: String,
    pub artist_id: i64,
    pub release_date: Option<NaiveDate>,
    /// Cover file name under the uploads covers directory
    pub cover_image: String,
    pub genre: Option<String>,
}

/// Album joined with its artist's name
#[derive(Debug, Clone, FromRow)]
pub struct AlbumWithArtist {
    pub id: i64,
    pub title: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub release_date: Option<NaiveDate>,
    pub cover_image: String,
    pub genre: Option<String>,
}

impl AlbumWithArtist {
    /// Public URL of the album cover
    pub fn cover_url(&self) -> String {
        cover_url(Some(&self.cover_image))
    }
}

/// Input for inserting an album during upload
#[derive(Debug, Clone)]
pub struct NewAlbum<'a> {
    pub title: &'a str,
    pub artist_id: i64,
    pub cover_image: &'a str,
    pub genre: &'a str,
    pub release_date: Option<NaiveDate>,
}

/// Resolve a cover file name to a URL under `/static`
///
/// Songs without an album, albums without a cover and albums still on the
/// default cover all resolve to the bundled default image.
pub fn cover_url(cover_image: Option<&str>) -> String {
    match cover_image {
        Some(file) if !file.is_empty() && file != DEFAULT_ALBUM_COVER => {
            format!("/static/uploads/covers/{}", file)
        }
        _ => format!("/static/{}", DEFAULT_ALBUM_COVER),
    }
}
