//! Mock Deezer server for testing the music proxy
//!
//! Provides a [`MockDeezerServer`] that answers the Deezer endpoints used by
//! TuneHub with canned track payloads.

use serde_json::{json, Value};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build a Deezer track object the way the public API returns it
pub fn track_fixture(id: i64, title: &str, artist: &str) -> Value {
    json!({
        "id": id,
        "readable": true,
        "title": title,
        "duration": 180 + id % 60,
        "preview": format!("https://cdns-preview.dzcdn.net/stream/{}.mp3", id),
        "type": "track",
        "artist": {
            "id": 1000 + id,
            "name": artist,
            "type": "artist"
        },
        "album": {
            "id": 2000 + id,
            "title": format!("{} Album", title),
            "cover_small": format!("https://e-cdns-images.dzcdn.net/images/cover/{}/56x56.jpg", id),
            "cover_medium": format!("https://e-cdns-images.dzcdn.net/images/cover/{}/250x250.jpg", id),
            "cover_big": format!("https://e-cdns-images.dzcdn.net/images/cover/{}/500x500.jpg", id),
            "type": "album"
        }
    })
}

/// Mock Deezer API server
///
/// Wraps a [`wiremock::MockServer`] with helpers for the responses the
/// music proxy needs.
pub struct MockDeezerServer {
    server: MockServer,
}

impl MockDeezerServer {
    /// Start a new mock Deezer server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Answer `/search?q=<query>` with `count` generated tracks
    pub async fn mock_search(&self, query: &str, count: i64) {
        let data: Vec<Value> = (1..=count)
            .map(|i| track_fixture(i, &format!("{} song {}", query, i), "Mock Artist"))
            .collect();

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", query))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": data,
                "total": count
            })))
            .mount(&self.server)
            .await;
    }

    /// Answer `/track/<id>` with a single track
    pub async fn mock_track(&self, id: i64, title: &str, artist: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/track/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(track_fixture(id, title, artist)))
            .mount(&self.server)
            .await;
    }

    /// Answer `/artist/<id>/top` with `count` tracks by `artist`
    pub async fn mock_artist_top(&self, artist_id: i64, artist: &str, count: i64) {
        let data: Vec<Value> = (1..=count)
            .map(|i| track_fixture(i, &format!("Hit {}", i), artist))
            .collect();

        Mock::given(method("GET"))
            .and(path(format!("/artist/{}/top", artist_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
            .mount(&self.server)
            .await;
    }

    /// Answer every request with a Deezer in-band error object (HTTP 200)
    pub async fn mock_api_error(&self, code: i64, message: &str) {
        Mock::given(method("GET"))
            .and(path_regex(".*"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": {"type": "Exception", "message": message, "code": code}
            })))
            .mount(&self.server)
            .await;
    }

    /// Answer every request with an HTTP error status
    pub async fn mock_server_error(&self, status_code: u16) {
        Mock::given(method("GET"))
            .and(path_regex(".*"))
            .respond_with(ResponseTemplate::new(status_code))
            .mount(&self.server)
            .await;
    }

    /// Number of requests the server has received so far
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }

    /// Get the underlying wiremock server for custom mocks
    pub fn inner(&self) -> &MockServer {
        &self.server
    }
}
