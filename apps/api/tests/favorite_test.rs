//! Integration tests for favorites and recommendations

mod common;

use axum::http::StatusCode;
use common::*;

#[tokio::test]
async fn test_toggle_twice_restores_state() {
    let app = TestApp::new().await;
    let cookie = app.login_as("fan").await;
    let song_id = app.seed_song("Loved", "Artist", "l.mp3", 0).await;
    let uri = format!("/favorite/toggle/{}", song_id);

    let json = body_json(app.send(post_empty(&uri, Some(&cookie))).await).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["is_favorite"], true);

    let favorites = body_json(
        app.send(get_with_cookie("/api/user/favorites", &cookie))
            .await,
    )
    .await;
    let list = favorites["favorites"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "Loved");
    assert_eq!(list[0]["added_date"].as_str().unwrap().len(), 10);

    let json = body_json(app.send(post_empty(&uri, Some(&cookie))).await).await;
    assert_eq!(json["is_favorite"], false);

    let favorites = body_json(
        app.send(get_with_cookie("/api/user/favorites", &cookie))
            .await,
    )
    .await;
    assert!(favorites["favorites"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_toggle_unknown_song_not_found() {
    let app = TestApp::new().await;
    let cookie = app.login_as("fan").await;

    let response = app
        .send(post_empty("/favorite/toggle/777", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_toggle_requires_session() {
    let app = TestApp::new().await;
    let song_id = app.seed_song("Loved", "Artist", "l.mp3", 0).await;

    let response = app
        .send(post_empty(&format!("/favorite/toggle/{}", song_id), None))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_favorites_are_per_user() {
    let app = TestApp::new().await;
    let alice = app.login_as("alice").await;
    let bob = app.login_as("bob").await;
    let song_id = app.seed_song("Shared", "Artist", "s.mp3", 0).await;

    app.send(post_empty(&format!("/favorite/toggle/{}", song_id), Some(&alice)))
        .await;

    let bobs = body_json(app.send(get_with_cookie("/api/user/favorites", &bob)).await).await;
    assert!(bobs["favorites"].as_array().unwrap().is_empty());

    let page = body_text(app.send(get_with_cookie("/favorites", &alice)).await).await;
    assert!(page.contains("Shared"));
}

#[tokio::test]
async fn test_recommendations_follow_favorite_artists() {
    let app = TestApp::new().await;
    let cookie = app.login_as("fan").await;
    let liked = app.seed_song("Liked", "Favorite Artist", "a.mp3", 1).await;
    app.seed_song("Deep Cut", "Favorite Artist", "b.mp3", 2).await;
    app.seed_song("Chart Topper", "Other Artist", "c.mp3", 100).await;

    let cold = body_json(
        app.send(get_with_cookie("/api/songs/recommended", &cookie))
            .await,
    )
    .await;
    assert_eq!(cold[0]["title"], "Chart Topper");

    app.send(post_empty(&format!("/favorite/toggle/{}", liked), Some(&cookie)))
        .await;

    let warm = body_json(
        app.send(get_with_cookie("/api/songs/recommended", &cookie))
            .await,
    )
    .await;
    let titles: Vec<_> = warm
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Deep Cut", "Liked"]);
}
