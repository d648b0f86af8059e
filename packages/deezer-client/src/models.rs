//! Deezer API response models

use serde::{Deserialize, Serialize};

/// A track as returned by Deezer search, track and chart endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: i64,
    pub title: String,
    /// Duration in seconds
    #[serde(default)]
    pub duration: i64,
    /// URL of a 30 second MP3 preview
    #[serde(default)]
    pub preview: String,
    pub artist: TrackArtist,
    #[serde(default)]
    pub album: TrackAlbum,
}

/// Artist summary embedded in a track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: i64,
    pub name: String,
}

/// Album summary embedded in a track
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackAlbum {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub cover_small: Option<String>,
    #[serde(default)]
    pub cover_medium: Option<String>,
    #[serde(default)]
    pub cover_big: Option<String>,
}

// Internal response types for deserialization

/// List endpoints wrap their results in `data`
#[derive(Debug, Deserialize)]
pub(crate) struct DataResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Errors come back with HTTP 200 and an `error` object
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
}
