//! Shared setup for the API integration tests

#![allow(dead_code, unused_imports)]

pub mod helpers;

pub use helpers::*;

use std::path::PathBuf;
use std::time::Duration;

use axum::{body::Body, http::Request, response::Response, Router};
use chrono::Utc;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;
use tunehub_api::{build_router, db, AppSettings};
use tunehub_deezer_client::DeezerClient;
use tunehub_test_utils::MockDeezerServer;

/// A full application backed by an in-memory database, a temporary
/// upload directory and a mock Deezer API
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub deezer: MockDeezerServer,
    pub settings: AppSettings,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::build(None).await
    }

    /// Same as [`TestApp::new`] but serving the crate's own `static/` assets
    pub async fn with_bundled_assets() -> Self {
        Self::build(Some(PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")))).await
    }

    async fn build(static_dir: Option<PathBuf>) -> Self {
        let dir = TempDir::new().unwrap();
        let static_dir = static_dir.unwrap_or_else(|| dir.path().to_path_buf());
        let settings = AppSettings::new(static_dir, dir.path().join("uploads"));
        std::fs::create_dir_all(settings.audio_dir()).unwrap();
        std::fs::create_dir_all(settings.covers_dir()).unwrap();

        let pool = db::create_test_pool().await.unwrap();
        let deezer = MockDeezerServer::start().await;
        let client = DeezerClient::new(deezer.url(), Duration::from_secs(5)).unwrap();

        let router = build_router(pool.clone(), client, settings.clone());

        Self {
            router,
            pool,
            deezer,
            settings,
            _dir: dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.settings.audio_dir()
    }

    /// Register a user through the form and log in, returning the
    /// `Cookie` header value for the new session
    pub async fn login_as(&self, username: &str) -> String {
        let register = form_request(
            "/register",
            &[
                ("username", username),
                ("email", &format!("{}@example.com", username)),
                ("password", "secret123"),
                ("confirm_password", "secret123"),
            ],
        );
        let response = self.send(register).await;
        assert_eq!(location(&response), Some("/login?registered=1"));

        let login = form_request(
            "/login",
            &[("username", username), ("password", "secret123")],
        );
        let response = self.send(login).await;
        session_cookie(&response).expect("login should set the session cookie")
    }

    /// Insert a song (and its artist) directly, returning the song ID
    pub async fn seed_song(&self, title: &str, artist: &str, file_path: &str, plays: i64) -> i64 {
        let artist_id = match sqlx::query_scalar::<_, i64>("SELECT id FROM artists WHERE name = ?")
            .bind(artist)
            .fetch_optional(&self.pool)
            .await
            .unwrap()
        {
            Some(id) => id,
            None => sqlx::query("INSERT INTO artists (name) VALUES (?)")
                .bind(artist)
                .execute(&self.pool)
                .await
                .unwrap()
                .last_insert_rowid(),
        };

        sqlx::query(
            "INSERT INTO songs (title, artist_id, duration, file_path, plays, created_at)
             VALUES (?, ?, 180, ?, ?, ?)",
        )
        .bind(title)
        .bind(artist_id)
        .bind(file_path)
        .bind(plays)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    /// Current play counter of a song
    pub async fn plays(&self, song_id: i64) -> i64 {
        sqlx::query_scalar("SELECT plays FROM songs WHERE id = ?")
            .bind(song_id)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}
