//! Song repository for centralized database operations

use chrono::Utc;
use sqlx::{FromRow, SqliteConnection, SqlitePool};

use super::utils::{contains_pattern, SONG_COLUMNS, SONG_DETAILS_SELECT};
use crate::models::song::{NewSong, Song, SongDetails};

/// Catalog-wide counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, serde::Serialize)]
pub struct CatalogStats {
    pub songs: i64,
    pub artists: i64,
    pub albums: i64,
    pub plays: i64,
}

/// Repository for song database operations
#[derive(Clone)]
pub struct SongRepository {
    pool: SqlitePool,
}

impl SongRepository {
    /// Create a new SongRepository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a bare song row by ID
    pub async fn find_by_id(&self, song_id: i64) -> Result<Option<Song>, sqlx::Error> {
        sqlx::query_as::<_, Song>(&format!("SELECT {} FROM songs WHERE id = ?", SONG_COLUMNS))
            .bind(song_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Find a song with its artist and album by ID
    pub async fn find_details(&self, song_id: i64) -> Result<Option<SongDetails>, sqlx::Error> {
        sqlx::query_as::<_, SongDetails>(&format!("{} WHERE s.id = ?", SONG_DETAILS_SELECT))
            .bind(song_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Check whether a song exists
    pub async fn exists(&self, song_id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM songs WHERE id = ?)")
            .bind(song_id)
            .fetch_one(&self.pool)
            .await
    }

    /// All songs in insertion order
    pub async fn find_all(&self) -> Result<Vec<SongDetails>, sqlx::Error> {
        sqlx::query_as::<_, SongDetails>(&format!("{} ORDER BY s.id", SONG_DETAILS_SELECT))
            .fetch_all(&self.pool)
            .await
    }

    /// Most played songs; ties keep insertion order
    pub async fn find_most_played(&self, limit: i64) -> Result<Vec<SongDetails>, sqlx::Error> {
        sqlx::query_as::<_, SongDetails>(&format!(
            "{} ORDER BY s.plays DESC, s.id ASC LIMIT ?",
            SONG_DETAILS_SELECT
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    /// Most played songs by the artists of the songs a user has favorited
    pub async fn find_most_played_by_favorite_artists(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<SongDetails>, sqlx::Error> {
        sqlx::query_as::<_, SongDetails>(&format!(
            r#"
            {}
            WHERE s.artist_id IN (
                SELECT fs.artist_id
                FROM favorites f
                JOIN songs fs ON fs.id = f.song_id
                WHERE f.user_id = ?
            )
            ORDER BY s.plays DESC, s.id ASC
            LIMIT ?
            "#,
            SONG_DETAILS_SELECT
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    /// Case-insensitive substring search on song title
    pub async fn search(&self, query: &str) -> Result<Vec<SongDetails>, sqlx::Error> {
        sqlx::query_as::<_, SongDetails>(&format!(
            r"{} WHERE s.title LIKE ? ESCAPE '\' ORDER BY s.id",
            SONG_DETAILS_SELECT
        ))
        .bind(contains_pattern(query))
        .fetch_all(&self.pool)
        .await
    }

    /// Add exactly one play to a song
    ///
    /// # Returns
    /// * `Ok(true)` - If the song exists and was updated
    /// * `Ok(false)` - If no song has this ID
    pub async fn increment_plays(&self, song_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE songs SET plays = plays + 1 WHERE id = ?")
            .bind(song_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts of songs, artists, albums and the sum of all plays
    pub async fn stats(&self) -> Result<CatalogStats, sqlx::Error> {
        sqlx::query_as::<_, CatalogStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM songs) AS songs,
                (SELECT COUNT(*) FROM artists) AS artists,
                (SELECT COUNT(*) FROM albums) AS albums,
                (SELECT COALESCE(SUM(plays), 0) FROM songs) AS plays
            "#,
        )
        .fetch_one(&self.pool)
        .await
    }

    /// Insert a song on the caller's connection, returning its ID
    pub async fn create(conn: &mut SqliteConnection, song: &NewSong<'_>) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO songs (title, artist_id, album_id, duration, file_path, plays, created_at)
            VALUES (?, ?, ?, ?, ?, 0, ?)
            "#,
        )
        .bind(song.title)
        .bind(song.artist_id)
        .bind(song.album_id)
        .bind(song.duration)
        .bind(song.file_path)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
