//! Integration tests for health check endpoints

mod common;

use axum::http::StatusCode;
use common::*;

#[tokio::test]
async fn test_simple_health_check() {
    let app = TestApp::new().await;

    let response = app.send(get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
}

#[tokio::test]
async fn test_liveness_reports_version() {
    let app = TestApp::new().await;

    let json = body_json(app.send(get("/health/live")).await).await;
    assert_eq!(json["status"], "alive");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_readiness_checks_database() {
    let app = TestApp::new().await;

    let response = app.send(get("/health/ready")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["services"][0]["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_unavailable_when_database_closed() {
    let app = TestApp::new().await;
    app.pool.close().await;

    let response = app.send(get("/health/ready")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["status"], "unhealthy");
}

#[tokio::test]
async fn test_static_files_served() {
    let app = TestApp::new().await;
    let css_dir = app.settings.static_dir.join("css");
    std::fs::create_dir_all(&css_dir).unwrap();
    std::fs::write(css_dir.join("style.css"), "body { margin: 0; }").unwrap();

    let response = app.send(get("/static/css/style.css")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "body { margin: 0; }");
}
