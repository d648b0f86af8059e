//! Deezer API client implementation

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::error::{DeezerError, DeezerResult, DATA_NOT_FOUND_CODE};
use crate::models::{DataResponse, ErrorResponse, Track};

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Maximum search query length
const MAX_QUERY_LENGTH: usize = 256;

/// Deezer API client
#[derive(Debug, Clone)]
pub struct DeezerClient {
    http_client: Client,
    base_url: String,
}

impl DeezerClient {
    /// Create a new client against the given base URL
    ///
    /// # Errors
    /// Returns `DeezerError::InvalidInput` if the base URL is empty, or
    /// `DeezerError::Http` if the HTTP client cannot be built
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> DeezerResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(DeezerError::InvalidInput(
                "base URL cannot be empty".to_string(),
            ));
        }

        let http_client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent("TuneHub/1.0")
            .build()?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn validate_query(query: &str) -> DeezerResult<&str> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(DeezerError::InvalidInput(
                "search query cannot be empty".to_string(),
            ));
        }
        if trimmed.len() > MAX_QUERY_LENGTH {
            return Err(DeezerError::InvalidInput(format!(
                "search query too long (max {} characters)",
                MAX_QUERY_LENGTH
            )));
        }
        Ok(trimmed)
    }

    /// Make a GET request and return the body text
    async fn make_request(&self, path: &str, params: &[(&str, &str)]) -> DeezerResult<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http_client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeezerError::Timeout
                } else {
                    DeezerError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), path, "Deezer API returned an error status");
            return Err(DeezerError::Status(status.as_u16()));
        }

        response.text().await.map_err(DeezerError::Http)
    }

    /// Parse a response body, mapping Deezer's in-band error objects
    fn parse_response<T: DeserializeOwned>(text: &str, resource: &str) -> DeezerResult<T> {
        if let Ok(error) = serde_json::from_str::<ErrorResponse>(text) {
            if error.error.code == DATA_NOT_FOUND_CODE {
                return Err(DeezerError::NotFound(resource.to_string()));
            }
            return Err(DeezerError::Api {
                kind: error.error.kind,
                message: error.error.message,
                code: error.error.code,
            });
        }
        Ok(serde_json::from_str(text)?)
    }

    /// Search tracks matching a free-text query
    ///
    /// At most `limit` tracks are returned.
    ///
    /// # Errors
    /// - `DeezerError::InvalidInput` - If the query is empty or too long
    /// - `DeezerError::Api` - If Deezer returns an error object
    /// - `DeezerError::Http` - If the HTTP request fails
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, limit: usize) -> DeezerResult<Vec<Track>> {
        let query = Self::validate_query(query)?;
        let limit_str = limit.to_string();

        debug!(query = %query, limit, "Searching Deezer tracks");

        let text = self
            .make_request("/search", &[("q", query), ("limit", &limit_str)])
            .await?;
        let response: DataResponse<Track> = Self::parse_response(&text, query)?;

        let mut tracks = response.data;
        tracks.truncate(limit);

        debug!(query = %query, result_count = tracks.len(), "Deezer search finished");

        Ok(tracks)
    }

    /// Fetch a single track by its Deezer id
    ///
    /// # Errors
    /// - `DeezerError::NotFound` - If no track has this id
    /// - `DeezerError::Api` - If Deezer returns another error object
    /// - `DeezerError::Http` - If the HTTP request fails
    #[instrument(skip(self))]
    pub async fn get_track(&self, track_id: i64) -> DeezerResult<Track> {
        debug!(track_id, "Fetching Deezer track");

        let text = self
            .make_request(&format!("/track/{}", track_id), &[])
            .await?;
        Self::parse_response(&text, &format!("track {}", track_id))
    }

    /// Fetch the most popular tracks of an artist
    ///
    /// # Errors
    /// - `DeezerError::NotFound` - If no artist has this id
    /// - `DeezerError::Api` - If Deezer returns another error object
    /// - `DeezerError::Http` - If the HTTP request fails
    #[instrument(skip(self))]
    pub async fn get_artist_top(&self, artist_id: i64, limit: usize) -> DeezerResult<Vec<Track>> {
        let limit_str = limit.to_string();

        debug!(artist_id, limit, "Fetching artist top tracks from Deezer");

        let text = self
            .make_request(
                &format!("/artist/{}/top", artist_id),
                &[("limit", &limit_str)],
            )
            .await?;
        let response: DataResponse<Track> =
            Self::parse_response(&text, &format!("artist {}", artist_id))?;

        let mut tracks = response.data;
        tracks.truncate(limit);
        Ok(tracks)
    }
}
