//! Artist repository for centralized database operations

use sqlx::{SqliteConnection, SqlitePool};

use super::utils::{contains_pattern, ARTIST_COLUMNS};
use crate::models::artist::{Artist, ArtistWithSongCount, DEFAULT_ARTIST_IMAGE};

/// Repository for artist database operations
#[derive(Clone)]
pub struct ArtistRepository {
    pool: SqlitePool,
}

impl ArtistRepository {
    /// Create a new ArtistRepository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All artists in insertion order
    pub async fn find_all(&self) -> Result<Vec<Artist>, sqlx::Error> {
        sqlx::query_as::<_, Artist>(&format!(
            "SELECT {} FROM artists ORDER BY id",
            ARTIST_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
    }

    /// First `limit` artists in insertion order
    pub async fn find_first(&self, limit: i64) -> Result<Vec<Artist>, sqlx::Error> {
        sqlx::query_as::<_, Artist>(&format!(
            "SELECT {} FROM artists ORDER BY id LIMIT ?",
            ARTIST_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    /// First `limit` artists with the number of songs credited to each
    pub async fn find_first_with_song_counts(
        &self,
        limit: i64,
    ) -> Result<Vec<ArtistWithSongCount>, sqlx::Error> {
        sqlx::query_as::<_, ArtistWithSongCount>(
            r#"
            SELECT
                a.id, a.name, a.image,
                (SELECT COUNT(*) FROM songs s WHERE s.artist_id = a.id) AS songs_count
            FROM artists a
            ORDER BY a.id
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    /// Case-insensitive substring search on artist name
    pub async fn search(&self, query: &str) -> Result<Vec<Artist>, sqlx::Error> {
        sqlx::query_as::<_, Artist>(&format!(
            r"SELECT {} FROM artists WHERE name LIKE ? ESCAPE '\' ORDER BY id",
            ARTIST_COLUMNS
        ))
        .bind(contains_pattern(query))
        .fetch_all(&self.pool)
        .await
    }

    /// Return the first artist named exactly `name`, inserting one if none exists
    ///
    /// Runs on the caller's connection so it can take part in the upload
    /// transaction.
    pub async fn get_or_create(
        conn: &mut SqliteConnection,
        name: &str,
    ) -> Result<Artist, sqlx::Error> {
        let existing = sqlx::query_as::<_, Artist>(&format!(
            "SELECT {} FROM artists WHERE name = ? ORDER BY id LIMIT 1",
            ARTIST_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(artist) = existing {
            return Ok(artist);
        }

        tracing::debug!(name = %name, "Creating artist");

        sqlx::query_as::<_, Artist>(&format!(
            "INSERT INTO artists (name, image) VALUES (?, ?) RETURNING {}",
            ARTIST_COLUMNS
        ))
        .bind(name)
        .bind(DEFAULT_ARTIST_IMAGE)
        .fetch_one(&mut *conn)
        .await
    }
}
