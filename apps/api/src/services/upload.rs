//! Upload ingestion service
//!
//! Validates an uploaded audio file (and optional cover), writes both under
//! the upload directory, and derives the Artist/Album/Song rows from the
//! accompanying form fields.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::instrument;

use crate::error::{ApiError, ApiResult};
use crate::models::album::{DEFAULT_ALBUM_COVER, SINGLES_ALBUM};
use crate::models::{NewAlbum, NewSong};
use crate::repositories::{AlbumRepository, ArtistRepository, SongRepository};

/// Accepted audio extensions (lowercase)
pub const ALLOWED_AUDIO: &[&str] = &["mp3", "wav", "ogg", "m4a"];

/// Accepted cover image extensions (lowercase)
pub const ALLOWED_IMAGES: &[&str] = &["png", "jpg", "jpeg", "gif"];

const DEFAULT_ARTIST_NAME: &str = "Unknown Artist";
const DEFAULT_TITLE: &str = "Untitled";
const DEFAULT_GENRE: &str = "Unknown";

/// A file part of the multipart body
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name (unsanitized)
    pub file_name: String,
    pub data: Bytes,
}

/// Everything the upload form may carry
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub audio: Option<UploadedFile>,
    pub cover: Option<UploadedFile>,
    pub title: Option<String>,
    pub artist: Option<String>,
    /// `None` files the song under "Singles"; a blank value means no album
    pub album: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<String>,
    pub release_date: Option<String>,
}

/// Check a file name's extension (after the last `.`) against an allow-list
pub fn has_allowed_extension(file_name: &str, allowed: &[&str]) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => allowed.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

/// Reduce a client file name to a safe ASCII name
///
/// Path separators and whitespace runs become `_`, characters outside
/// `[A-Za-z0-9._-]` are dropped, and leading/trailing dots and underscores
/// are stripped. The result may be empty.
pub fn sanitize_filename(file_name: &str) -> String {
    let spaced = file_name.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Trimmed, non-empty form value
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Service handling song uploads
#[derive(Clone)]
pub struct UploadService {
    pool: SqlitePool,
    audio_dir: PathBuf,
    covers_dir: PathBuf,
}

impl UploadService {
    /// Create a new UploadService writing under the given directories
    pub fn new(pool: SqlitePool, audio_dir: PathBuf, covers_dir: PathBuf) -> Self {
        Self {
            pool,
            audio_dir,
            covers_dir,
        }
    }

    /// Directory audio files are written to
    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    /// Ingest an upload and return the new song's ID
    ///
    /// # Errors
    /// - `ApiError::InvalidUpload` for a missing, unnamed or disallowed audio
    ///   file; nothing is written and no row is created
    /// - `ApiError::Validation` for a malformed duration or release date
    #[instrument(skip(self, form), fields(title = ?form.title, artist = ?form.artist))]
    pub async fn upload(&self, form: UploadForm) -> ApiResult<i64> {
        let audio = form
            .audio
            .as_ref()
            .ok_or_else(|| ApiError::InvalidUpload("No audio file".to_string()))?;

        if audio.file_name.is_empty() {
            return Err(ApiError::InvalidUpload("No selected file".to_string()));
        }

        if !has_allowed_extension(&audio.file_name, ALLOWED_AUDIO) {
            return Err(ApiError::InvalidUpload("Invalid file type".to_string()));
        }

        let audio_name = sanitize_filename(&audio.file_name);
        if audio_name.is_empty() {
            return Err(ApiError::InvalidUpload("Invalid file name".to_string()));
        }

        let duration = match non_blank(&form.duration) {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| ApiError::validation("Duration must be a whole number of seconds"))?,
            None => 0,
        };

        let release_date = match non_blank(&form.release_date) {
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| ApiError::validation("Release date must be YYYY-MM-DD"))?,
            ),
            None => None,
        };

        let cover = form
            .cover
            .as_ref()
            .filter(|cover| has_allowed_extension(&cover.file_name, ALLOWED_IMAGES))
            .map(|cover| (sanitize_filename(&cover.file_name), &cover.data))
            .filter(|(name, _)| !name.is_empty());
        let cover_name = cover
            .as_ref()
            .map_or(DEFAULT_ALBUM_COVER, |(name, _)| name.as_str());

        let artist_name = non_blank(&form.artist).unwrap_or(DEFAULT_ARTIST_NAME);
        let album_title = match &form.album {
            None => Some(SINGLES_ALBUM),
            Some(title) => Some(title.trim()).filter(|t| !t.is_empty()),
        };
        let title = non_blank(&form.title).unwrap_or(DEFAULT_TITLE);
        let genre = non_blank(&form.genre).unwrap_or(DEFAULT_GENRE);

        let mut tx = self.pool.begin().await?;

        let artist = ArtistRepository::get_or_create(&mut tx, artist_name).await?;

        let album_id = match album_title {
            Some(album_title) => {
                let album = AlbumRepository::get_or_create(
                    &mut tx,
                    &NewAlbum {
                        title: album_title,
                        artist_id: artist.id,
                        cover_image: cover_name,
                        genre,
                        release_date,
                    },
                )
                .await?;
                Some(album.id)
            }
            None => None,
        };

        let song_id = SongRepository::create(
            &mut tx,
            &NewSong {
                title,
                artist_id: artist.id,
                album_id,
                duration,
                file_path: &audio_name,
            },
        )
        .await?;

        // Files go to disk only once the rows are in place; anything this
        // upload created is removed again if the commit does not happen.
        let mut created = Vec::new();
        let stored = async {
            write_new_file(&self.audio_dir, &audio_name, &audio.data, &mut created).await?;
            if let Some((name, data)) = &cover {
                write_new_file(&self.covers_dir, name, data, &mut created).await?;
            }
            tx.commit().await?;
            Ok::<_, ApiError>(())
        }
        .await;

        if let Err(err) = stored {
            remove_files(&created).await;
            return Err(err);
        }

        tracing::info!(song_id, artist_id = artist.id, ?album_id, file = %audio_name, "Song uploaded");

        Ok(song_id)
    }
}

/// Write `data` to `dir/name`, creating `dir` if needed
///
/// The path is pushed onto `created` when no file existed there before.
async fn write_new_file(
    dir: &Path,
    name: &str,
    data: &[u8],
    created: &mut Vec<PathBuf>,
) -> ApiResult<()> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| ApiError::Io(e.to_string()))?;

    let path = dir.join(name);
    if !tokio::fs::try_exists(&path).await.unwrap_or(true) {
        created.push(path.clone());
    }

    tokio::fs::write(&path, data)
        .await
        .map_err(|e| ApiError::Io(e.to_string()))
}

async fn remove_files(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::warn!(error = %e, path = %path.display(), "Failed to remove orphaned upload");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use assert_matches::assert_matches;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("song.mp3", true)]
    #[case("SONG.MP3", true)]
    #[case("track.final.wav", true)]
    #[case("voice.m4a", true)]
    #[case("clip.ogg", true)]
    #[case("song.flac", false)]
    #[case("mp3", false)]
    #[case("song.", false)]
    #[case("", false)]
    fn test_audio_allow_list(#[case] name: &str, #[case] allowed: bool) {
        assert_eq!(has_allowed_extension(name, ALLOWED_AUDIO), allowed);
    }

    #[rstest]
    #[case("My Song.mp3", "My_Song.mp3")]
    #[case("../../etc/passwd", "etc_passwd")]
    #[case("  spaced   out .mp3", "spaced_out_.mp3")]
    #[case("café olé.mp3", "caf_ol.mp3")]
    #[case(".hidden.mp3", "hidden.mp3")]
    #[case("___", "")]
    fn test_sanitize_filename(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_filename(input), expected);
    }

    fn service(pool: SqlitePool, dir: &TempDir) -> UploadService {
        UploadService::new(pool, dir.path().join("audio"), dir.path().join("covers"))
    }

    fn audio(name: &str) -> Option<UploadedFile> {
        Some(UploadedFile {
            file_name: name.to_string(),
            data: Bytes::from_static(b"ID3fake-audio"),
        })
    }

    async fn song_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM songs")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_audio_part() {
        let dir = TempDir::new().unwrap();
        let pool = create_test_pool().await.unwrap();
        let result = service(pool, &dir).upload(UploadForm::default()).await;
        assert_matches!(result, Err(ApiError::InvalidUpload(msg)) if msg == "No audio file");
    }

    #[tokio::test]
    async fn test_empty_file_name() {
        let dir = TempDir::new().unwrap();
        let pool = create_test_pool().await.unwrap();
        let form = UploadForm {
            audio: audio(""),
            ..Default::default()
        };
        let result = service(pool, &dir).upload(form).await;
        assert_matches!(result, Err(ApiError::InvalidUpload(msg)) if msg == "No selected file");
    }

    #[tokio::test]
    async fn test_disallowed_extension_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let pool = create_test_pool().await.unwrap();
        let form = UploadForm {
            audio: audio("malware.exe"),
            ..Default::default()
        };

        let result = service(pool.clone(), &dir).upload(form).await;
        assert_matches!(result, Err(ApiError::InvalidUpload(msg)) if msg == "Invalid file type");
        assert_eq!(song_count(&pool).await, 0);
        assert!(!dir.path().join("audio").exists());
    }

    #[tokio::test]
    async fn test_defaults_file_song_under_singles() {
        let dir = TempDir::new().unwrap();
        let pool = create_test_pool().await.unwrap();
        let form = UploadForm {
            audio: audio("Demo Take.mp3"),
            ..Default::default()
        };

        let song_id = service(pool.clone(), &dir).upload(form).await.unwrap();

        let (title, artist, album, genre, duration): (String, String, String, String, i64) =
            sqlx::query_as(
                r#"
                SELECT s.title, ar.name, al.title, al.genre, s.duration
                FROM songs s
                JOIN artists ar ON ar.id = s.artist_id
                JOIN albums al ON al.id = s.album_id
                WHERE s.id = ?
                "#,
            )
            .bind(song_id)
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(title, "Untitled");
        assert_eq!(artist, "Unknown Artist");
        assert_eq!(album, "Singles");
        assert_eq!(genre, "Unknown");
        assert_eq!(duration, 0);
        assert!(dir.path().join("audio/Demo_Take.mp3").exists());
    }

    #[tokio::test]
    async fn test_blank_album_means_no_album() {
        let dir = TempDir::new().unwrap();
        let pool = create_test_pool().await.unwrap();
        let form = UploadForm {
            audio: audio("b.mp3"),
            album: Some("   ".to_string()),
            ..Default::default()
        };

        let song_id = service(pool.clone(), &dir).upload(form).await.unwrap();
        let album_id: Option<i64> = sqlx::query_scalar("SELECT album_id FROM songs WHERE id = ?")
            .bind(song_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(album_id.is_none());
    }

    #[tokio::test]
    async fn test_second_upload_reuses_artist_and_album() {
        let dir = TempDir::new().unwrap();
        let pool = create_test_pool().await.unwrap();
        let svc = service(pool.clone(), &dir);

        for (file, title) in [("one.mp3", "One"), ("two.mp3", "Two")] {
            svc.upload(UploadForm {
                audio: audio(file),
                title: Some(title.to_string()),
                artist: Some("Queen".to_string()),
                album: Some("Innuendo".to_string()),
                duration: Some("240".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        }

        let artists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists")
            .fetch_one(&pool)
            .await
            .unwrap();
        let albums: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM albums")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!((artists, albums), (1, 1));
        assert_eq!(song_count(&pool).await, 2);
    }

    #[tokio::test]
    async fn test_cover_and_release_date_apply_to_new_album() {
        let dir = TempDir::new().unwrap();
        let pool = create_test_pool().await.unwrap();
        let form = UploadForm {
            audio: audio("c.mp3"),
            cover: Some(UploadedFile {
                file_name: "Front Cover.PNG".to_string(),
                data: Bytes::from_static(b"\x89PNG"),
            }),
            album: Some("Discovery".to_string()),
            release_date: Some("2001-03-12".to_string()),
            ..Default::default()
        };

        service(pool.clone(), &dir).upload(form).await.unwrap();

        let (cover, release): (String, Option<NaiveDate>) =
            sqlx::query_as("SELECT cover_image, release_date FROM albums")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(cover, "Front_Cover.PNG");
        assert_eq!(release, NaiveDate::from_ymd_opt(2001, 3, 12));
        assert!(dir.path().join("covers/Front_Cover.PNG").exists());
    }

    #[tokio::test]
    async fn test_non_numeric_duration_is_rejected() {
        let dir = TempDir::new().unwrap();
        let pool = create_test_pool().await.unwrap();
        let form = UploadForm {
            audio: audio("d.mp3"),
            duration: Some("three minutes".to_string()),
            ..Default::default()
        };

        let result = service(pool.clone(), &dir).upload(form).await;
        assert_matches!(result, Err(ApiError::Validation(_)));
        assert_eq!(song_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_failed_cover_write_leaves_no_files_or_rows() {
        let dir = TempDir::new().unwrap();
        let pool = create_test_pool().await.unwrap();
        // A regular file where the covers directory should be
        let covers = dir.path().join("covers");
        std::fs::write(&covers, b"not a directory").unwrap();

        let form = UploadForm {
            audio: audio("orphan.mp3"),
            cover: Some(UploadedFile {
                file_name: "art.png".to_string(),
                data: Bytes::from_static(b"PNG"),
            }),
            ..Default::default()
        };

        let result = UploadService::new(pool.clone(), dir.path().join("audio"), covers)
            .upload(form)
            .await;

        assert_matches!(result, Err(ApiError::Io(_)));
        assert!(!dir.path().join("audio").join("orphan.mp3").exists());
        assert_eq!(song_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_existing_file_of_same_name() {
        let dir = TempDir::new().unwrap();
        let pool = create_test_pool().await.unwrap();
        let audio_dir = dir.path().join("audio");
        std::fs::create_dir_all(&audio_dir).unwrap();
        std::fs::write(audio_dir.join("shared.mp3"), b"earlier upload").unwrap();
        let covers = dir.path().join("covers");
        std::fs::write(&covers, b"not a directory").unwrap();

        let form = UploadForm {
            audio: audio("shared.mp3"),
            cover: Some(UploadedFile {
                file_name: "art.png".to_string(),
                data: Bytes::from_static(b"PNG"),
            }),
            ..Default::default()
        };

        let result = UploadService::new(pool, audio_dir.clone(), covers).upload(form).await;

        assert!(result.is_err());
        assert!(audio_dir.join("shared.mp3").exists());
    }
}
