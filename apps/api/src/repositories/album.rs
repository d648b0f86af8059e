//! Album repository for centralized database operations

use sqlx::{SqliteConnection, SqlitePool};

use super::utils::{contains_pattern, ALBUM_COLUMNS, ALBUM_WITH_ARTIST_SELECT};
use crate::models::album::{Album, AlbumWithArtist, NewAlbum};

/// Repository for album database operations
#[derive(Clone)]
pub struct AlbumRepository {
    pool: SqlitePool,
}

impl AlbumRepository {
    /// Create a new AlbumRepository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All albums with their artist, in insertion order
    pub async fn find_all(&self) -> Result<Vec<AlbumWithArtist>, sqlx::Error> {
        sqlx::query_as::<_, AlbumWithArtist>(&format!(
            "{} ORDER BY al.id",
            ALBUM_WITH_ARTIST_SELECT
        ))
        .fetch_all(&self.pool)
        .await
    }

    /// Most recently released albums
    ///
    /// Albums without a release date sort after dated ones; ties keep
    /// insertion order.
    pub async fn find_recent(&self, limit: i64) -> Result<Vec<AlbumWithArtist>, sqlx::Error> {
        sqlx::query_as::<_, AlbumWithArtist>(&format!(
            "{} ORDER BY al.release_date DESC, al.id ASC LIMIT ?",
            ALBUM_WITH_ARTIST_SELECT
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    /// Case-insensitive substring search on album title
    pub async fn search(&self, query: &str) -> Result<Vec<AlbumWithArtist>, sqlx::Error> {
        sqlx::query_as::<_, AlbumWithArtist>(&format!(
            r"{} WHERE al.title LIKE ? ESCAPE '\' ORDER BY al.id",
            ALBUM_WITH_ARTIST_SELECT
        ))
        .bind(contains_pattern(query))
        .fetch_all(&self.pool)
        .await
    }

    /// Return the album with this (title, artist), inserting it if missing
    ///
    /// Cover, genre and release date are only applied when the album is
    /// created; an existing album keeps its own.
    pub async fn get_or_create(
        conn: &mut SqliteConnection,
        album: &NewAlbum<'_>,
    ) -> Result<Album, sqlx::Error> {
        let existing = sqlx::query_as::<_, Album>(&format!(
            "SELECT {} FROM albums WHERE title = ? AND artist_id = ? ORDER BY id LIMIT 1",
            ALBUM_COLUMNS
        ))
        .bind(album.title)
        .bind(album.artist_id)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(found) = existing {
            return Ok(found);
        }

        tracing::debug!(title = %album.title, artist_id = album.artist_id, "Creating album");

        sqlx::query_as::<_, Album>(&format!(
            r#"
            INSERT INTO albums (title, artist_id, release_date, cover_image, genre)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            ALBUM_COLUMNS
        ))
        .bind(album.title)
        .bind(album.artist_id)
        .bind(album.release_date)
        .bind(album.cover_image)
        .bind(album.genre)
        .fetch_one(&mut *conn)
        .await
    }
}
