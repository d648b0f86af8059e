//! Integration tests for the Deezer proxy under `/api/music`

mod common;

use axum::http::StatusCode;
use common::*;

#[tokio::test]
async fn test_search_reshapes_tracks() {
    let app = TestApp::new().await;
    app.deezer.mock_search("daft punk", 3).await;

    let response = app.send(get("/api/music/search?q=daft%20punk")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["platform"], "deezer");
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["title"], "daft punk song 1");
    assert_eq!(data[0]["artist"], "Mock Artist");
    assert_eq!(data[0]["platform"], "deezer");
    assert!(data[0]["preview"].as_str().unwrap().ends_with("/1.mp3"));
}

#[tokio::test]
async fn test_search_respects_limit() {
    let app = TestApp::new().await;
    app.deezer.mock_search("jazz", 8).await;

    let json = body_json(app.send(get("/api/music/search?q=jazz&limit=2")).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_without_query_rejected_locally() {
    let app = TestApp::new().await;

    let response = app.send(get("/api/music/search")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No search query");
    assert_eq!(app.deezer.request_count().await, 0);
}

#[tokio::test]
async fn test_track_lookup() {
    let app = TestApp::new().await;
    app.deezer.mock_track(3135556, "Harder, Better, Faster, Stronger", "Daft Punk").await;

    let json = body_json(app.send(get("/api/music/track/3135556")).await).await;
    assert_eq!(json["id"], 3135556);
    assert_eq!(json["title"], "Harder, Better, Faster, Stronger");
    assert_eq!(json["artist"], "Daft Punk");
}

#[tokio::test]
async fn test_trending_uses_fixed_query() {
    let app = TestApp::new().await;
    app.deezer.mock_search("trending", 10).await;

    let json = body_json(app.send(get("/api/music/trending")).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_artist_top_tracks() {
    let app = TestApp::new().await;
    app.deezer.mock_artist_top(27, "Daft Punk", 5).await;

    let json = body_json(app.send(get("/api/music/artist/27/top")).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 5);
    assert_eq!(data[0]["artist"], "Daft Punk");
}

#[tokio::test]
async fn test_upstream_failure_is_server_error() {
    let app = TestApp::new().await;
    app.deezer.mock_server_error(503).await;

    let response = app.send(get("/api/music/search?q=anything")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "EXTERNAL_SERVICE_ERROR");
}

#[tokio::test]
async fn test_upstream_error_object_is_server_error() {
    let app = TestApp::new().await;
    app.deezer.mock_api_error(4, "Quota limit exceeded").await;

    let response = app.send(get("/api/music/trending")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
