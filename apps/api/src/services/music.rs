//! Music metadata proxy
//!
//! Wraps the Deezer client and reshapes its tracks into the flat JSON the
//! front end consumes.

use serde::Serialize;
use tracing::instrument;
use tunehub_deezer_client::{DeezerClient, Track};

use crate::error::ApiResult;

/// Platform tag attached to every proxied result
pub const PLATFORM: &str = "deezer";

/// Default number of search results
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Query used for the trending list; Deezer exposes no chart via search
const TRENDING_QUERY: &str = "trending";

/// Number of top tracks returned per artist
pub const ARTIST_TOP_LIMIT: usize = 5;

/// A search result
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchTrack {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub artist_id: i64,
    pub album: String,
    pub album_id: i64,
    pub cover: Option<String>,
    pub cover_small: Option<String>,
    pub cover_big: Option<String>,
    pub preview: String,
    pub duration: i64,
    pub platform: &'static str,
}

impl From<Track> for SearchTrack {
    fn from(track: Track) -> Self {
        Self {
            id: track.id,
            title: track.title,
            artist: track.artist.name,
            artist_id: track.artist.id,
            album: track.album.title,
            album_id: track.album.id,
            cover: track.album.cover_medium,
            cover_small: track.album.cover_small,
            cover_big: track.album.cover_big,
            preview: track.preview,
            duration: track.duration,
            platform: PLATFORM,
        }
    }
}

/// Search results with their platform
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub data: Vec<SearchTrack>,
    pub platform: &'static str,
}

/// A single track lookup
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrackInfo {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub artist_id: i64,
    pub album: String,
    pub album_id: i64,
    pub cover: Option<String>,
    pub preview: String,
    pub duration: i64,
    pub platform: &'static str,
}

impl From<Track> for TrackInfo {
    fn from(track: Track) -> Self {
        Self {
            id: track.id,
            title: track.title,
            artist: track.artist.name,
            artist_id: track.artist.id,
            album: track.album.title,
            album_id: track.album.id,
            cover: track.album.cover_medium,
            preview: track.preview,
            duration: track.duration,
            platform: PLATFORM,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopTrack {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub preview: String,
}

impl From<Track> for TopTrack {
    fn from(track: Track) -> Self {
        Self {
            id: track.id,
            title: track.title,
            artist: track.artist.name,
            preview: track.preview,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TopTracks {
    pub data: Vec<TopTrack>,
}

/// Service fronting the Deezer API
#[derive(Clone)]
pub struct MusicService {
    client: DeezerClient,
}

impl MusicService {
    pub fn new(client: DeezerClient) -> Self {
        Self { client }
    }

    /// Search tracks by free text
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, limit: usize) -> ApiResult<SearchResults> {
        let tracks = self.client.search(query, limit).await?;
        Ok(SearchResults {
            data: tracks.into_iter().map(SearchTrack::from).collect(),
            platform: PLATFORM,
        })
    }

    /// Look up one track
    #[instrument(skip(self))]
    pub async fn track(&self, track_id: i64) -> ApiResult<TrackInfo> {
        Ok(self.client.get_track(track_id).await?.into())
    }

    /// Tracks for the literal query "trending"
    pub async fn trending(&self) -> ApiResult<SearchResults> {
        self.search(TRENDING_QUERY, DEFAULT_SEARCH_LIMIT).await
    }

    /// An artist's most popular tracks
    #[instrument(skip(self))]
    pub async fn artist_top(&self, artist_id: i64) -> ApiResult<TopTracks> {
        let tracks = self.client.get_artist_top(artist_id, ARTIST_TOP_LIMIT).await?;
        Ok(TopTracks {
            data: tracks.into_iter().map(TopTrack::from).collect(),
        })
    }
}
