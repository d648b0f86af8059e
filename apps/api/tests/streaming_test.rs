//! Integration tests for audio streaming
//!
//! - Full responses and byte ranges
//! - ETag revalidation
//! - Missing songs, missing files and paths escaping the audio directory

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::*;

const AUDIO: &[u8] = b"0123456789abcdefghij";

async fn app_with_track() -> (TestApp, i64) {
    let app = TestApp::new().await;
    std::fs::write(app.audio_dir().join("track.mp3"), AUDIO).unwrap();
    let id = app.seed_song("Streamed", "Artist", "track.mp3", 0).await;
    (app, id)
}

fn ranged(uri: &str, range: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::RANGE, range)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_full_stream() {
    let (app, id) = app_with_track().await;

    let response = app.send(get(&format!("/api/song/{}/stream", id))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    assert_eq!(response.headers()[header::ACCEPT_RANGES], "bytes");
    assert_eq!(response.headers()[header::CONTENT_LENGTH], "20");
    assert_eq!(body_bytes(response).await, AUDIO.to_vec());
}

#[tokio::test]
async fn test_partial_range() {
    let (app, id) = app_with_track().await;

    let response = app
        .send(ranged(&format!("/api/song/{}/stream", id), "bytes=5-9"))
        .await;
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.headers()[header::CONTENT_RANGE], "bytes 5-9/20");
    assert_eq!(body_bytes(response).await, b"56789".to_vec());
}

#[tokio::test]
async fn test_suffix_range() {
    let (app, id) = app_with_track().await;

    let response = app
        .send(ranged(&format!("/api/song/{}/stream", id), "bytes=-4"))
        .await;
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.headers()[header::CONTENT_RANGE], "bytes 16-19/20");
    assert_eq!(body_bytes(response).await, b"ghij".to_vec());
}

#[tokio::test]
async fn test_range_past_end_not_satisfiable() {
    let (app, id) = app_with_track().await;

    let response = app
        .send(ranged(&format!("/api/song/{}/stream", id), "bytes=100-200"))
        .await;
    assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
    assert_eq!(response.headers()[header::CONTENT_RANGE], "bytes */20");
}

#[tokio::test]
async fn test_etag_revalidation() {
    let (app, id) = app_with_track().await;
    let uri = format!("/api/song/{}/stream", id);

    let response = app.send(get(&uri)).await;
    let etag = response.headers()[header::ETAG].clone();

    let request = Request::builder()
        .uri(&uri)
        .header(header::IF_NONE_MATCH, etag)
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
}

#[tokio::test]
async fn test_head_has_no_body() {
    let (app, id) = app_with_track().await;

    let request = Request::builder()
        .method(Method::HEAD)
        .uri(format!("/api/song/{}/stream", id))
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_LENGTH], "20");
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_unknown_song_not_found() {
    let app = TestApp::new().await;

    let response = app.send(get("/api/song/404/stream")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_file_not_found() {
    let app = TestApp::new().await;
    let id = app.seed_song("Ghost", "Artist", "gone.mp3", 0).await;

    let response = app.send(get(&format!("/api/song/{}/stream", id))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "AUDIO_NOT_FOUND");
}

#[tokio::test]
async fn test_traversal_path_forbidden() {
    let app = TestApp::new().await;
    let id = app.seed_song("Sneaky", "Artist", "../../secret.mp3", 0).await;

    let response = app.send(get(&format!("/api/song/{}/stream", id))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
