//! Audio streaming route handlers
//!
//! - `GET /api/song/{id}/stream` - stream an uploaded file with range support
//! - `HEAD /api/song/{id}/stream` - file metadata without body
//!
//! Single `bytes=` ranges are honored (206/416); `ETag`, `Last-Modified`
//! and the matching conditional request headers are supported.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, response::Builder, HeaderMap, StatusCode},
    response::Response,
    routing::get,
    Router,
};
use std::path::{Path as StdPath, PathBuf};
use std::time::SystemTime;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};
use tokio_util::io::ReaderStream;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const CACHE_CONTROL_VALUE: &str = "private, max-age=31536000, immutable";

pub fn streaming_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/song/{song_id}/stream",
            get(stream_song).head(head_song),
        )
        .with_state(state)
}

/// Resolved file plus the validators derived from its metadata
struct AudioFile {
    path: PathBuf,
    size: u64,
    content_type: &'static str,
    etag: String,
    last_modified: String,
    modified: SystemTime,
}

impl AudioFile {
    /// Builder preloaded with the headers every response carries
    fn response(&self, status: StatusCode) -> Builder {
        Response::builder()
            .status(status)
            .header(header::ETAG, &self.etag)
            .header(header::LAST_MODIFIED, &self.last_modified)
            .header(header::CACHE_CONTROL, CACHE_CONTROL_VALUE)
    }
}

/// Look up a song and resolve its audio file inside the audio directory
async fn resolve_audio(state: &AppState, song_id: i64) -> ApiResult<AudioFile> {
    let song = state
        .songs
        .find_by_id(song_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Song", song_id))?;

    let path = validate_file_path(&song.file_path, state.uploads.audio_dir()).await?;

    let metadata = tokio::fs::metadata(&path).await.map_err(|e| {
        tracing::error!(error = %e, path = %path.display(), "Failed to read audio file metadata");
        ApiError::AudioFileNotFound(song.file_path.clone())
    })?;

    let size = metadata.len();
    let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);

    Ok(AudioFile {
        content_type: content_type_for_path(&path),
        etag: generate_etag(size, modified),
        last_modified: format_http_date(modified),
        path,
        size,
        modified,
    })
}

fn finish(builder: Builder, body: Body) -> ApiResult<Response> {
    builder
        .body(body)
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}

/// Stream an uploaded audio file
///
/// # Response
/// - 200 OK: full file
/// - 206 Partial Content: requested range
/// - 304 Not Modified: cache still valid
/// - 403 Forbidden: path escapes the audio directory
/// - 404 Not Found: unknown song or missing file
/// - 416 Range Not Satisfiable: range starts past the end
async fn stream_song(
    State(state): State<AppState>,
    Path(song_id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let audio = resolve_audio(&state, song_id).await?;

    if is_cache_valid(&headers, &audio.etag, audio.modified) {
        return finish(audio.response(StatusCode::NOT_MODIFIED), Body::empty());
    }

    let mut file = File::open(&audio.path).await.map_err(|e| {
        tracing::error!(error = %e, path = %audio.path.display(), "Failed to open audio file");
        ApiError::AudioFileNotFound(audio.path.display().to_string())
    })?;

    let range = headers.get(header::RANGE).and_then(|h| h.to_str().ok());

    match range {
        Some(range) => {
            let (start, end) = parse_range_header(range, audio.size)?;
            let content_length = end - start + 1;

            file.seek(SeekFrom::Start(start)).await?;
            let body = Body::from_stream(ReaderStream::new(file.take(content_length)));

            finish(
                audio
                    .response(StatusCode::PARTIAL_CONTENT)
                    .header(header::CONTENT_TYPE, audio.content_type)
                    .header(header::CONTENT_LENGTH, content_length)
                    .header(header::ACCEPT_RANGES, "bytes")
                    .header(
                        header::CONTENT_RANGE,
                        format!("bytes {}-{}/{}", start, end, audio.size),
                    ),
                body,
            )
        }
        None => finish(
            audio
                .response(StatusCode::OK)
                .header(header::CONTENT_TYPE, audio.content_type)
                .header(header::CONTENT_LENGTH, audio.size)
                .header(header::ACCEPT_RANGES, "bytes"),
            Body::from_stream(ReaderStream::new(file)),
        ),
    }
}

/// Headers of [`stream_song`] without the body
async fn head_song(
    State(state): State<AppState>,
    Path(song_id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let audio = resolve_audio(&state, song_id).await?;

    if is_cache_valid(&headers, &audio.etag, audio.modified) {
        return finish(audio.response(StatusCode::NOT_MODIFIED), Body::empty());
    }

    finish(
        audio
            .response(StatusCode::OK)
            .header(header::CONTENT_TYPE, audio.content_type)
            .header(header::CONTENT_LENGTH, audio.size)
            .header(header::ACCEPT_RANGES, "bytes"),
        Body::empty(),
    )
}

/// Parse a single-range `Range` header
///
/// Supports `bytes=START-END`, `bytes=START-` and `bytes=-SUFFIX`.
fn parse_range_header(range_header: &str, file_size: u64) -> Result<(u64, u64), ApiError> {
    let spec = range_header
        .trim()
        .strip_prefix("bytes=")
        .ok_or_else(|| ApiError::InvalidRange("Invalid range unit".to_string()))?;

    if spec.contains(',') {
        return Err(ApiError::InvalidRange(
            "Multiple ranges not supported".to_string(),
        ));
    }

    let (first, last) = spec
        .split_once('-')
        .ok_or_else(|| ApiError::InvalidRange("Invalid range format".to_string()))?;
    let last_byte = file_size.saturating_sub(1);

    let parse = |value: &str, what: &str| {
        value
            .trim()
            .parse::<u64>()
            .map_err(|_| ApiError::InvalidRange(format!("Invalid {}", what)))
    };

    let (start, end) = match (first.trim().is_empty(), last.trim().is_empty()) {
        (false, false) => (parse(first, "start position")?, parse(last, "end position")?),
        (false, true) => (parse(first, "start position")?, last_byte),
        (true, false) => {
            let suffix = parse(last, "suffix length")?;
            (file_size.saturating_sub(suffix), last_byte)
        }
        (true, true) => return Err(ApiError::InvalidRange("Empty range".to_string())),
    };

    if start >= file_size {
        return Err(ApiError::RangeNotSatisfiable { file_size });
    }

    let end = end.min(last_byte);
    if start > end {
        return Err(ApiError::InvalidRange(
            "Start position greater than end".to_string(),
        ));
    }

    Ok((start, end))
}

/// MIME type for the upload allow-list extensions
fn content_type_for_path(path: &StdPath) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        _ => "application/octet-stream",
    }
}

/// `"{size}-{mtime_secs}"`
fn generate_etag(file_size: u64, modified: SystemTime) -> String {
    let mtime_secs = modified
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("\"{}-{}\"", file_size, mtime_secs)
}

fn format_http_date(time: SystemTime) -> String {
    httpdate::fmt_http_date(time)
}

/// Whether the client's cached copy is still fresh
///
/// `If-None-Match` takes precedence over `If-Modified-Since`.
fn is_cache_valid(headers: &HeaderMap, etag: &str, modified: SystemTime) -> bool {
    if let Some(value) = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
    {
        let ours = etag.strip_prefix("W/").unwrap_or(etag);
        return value.split(',').map(str::trim).any(|theirs| {
            theirs == "*" || theirs.strip_prefix("W/").unwrap_or(theirs) == ours
        });
    }

    let since = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| httpdate::parse_http_date(v).ok());

    match since {
        // Dates in the future are ignored
        Some(since) if since <= SystemTime::now() => modified
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(d.as_secs()) <= since)
            .unwrap_or(false),
        _ => false,
    }
}

/// Resolve `file_path` under `audio_dir`, refusing anything outside it
async fn validate_file_path(file_path: &str, audio_dir: &StdPath) -> ApiResult<PathBuf> {
    let file_path = file_path.to_string();
    let audio_dir = audio_dir.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let input = StdPath::new(&file_path);

        // Checked before touching the filesystem so traversal attempts can't
        // check existence
        if input.is_absolute()
            || input
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            tracing::warn!(file_path = %file_path, "Path traversal attempt blocked");
            return Err(ApiError::Forbidden("Access denied".to_string()));
        }

        let canonical = audio_dir.join(input).canonicalize().map_err(|_| {
            tracing::warn!(file_path = %file_path, "Audio file not found or inaccessible");
            ApiError::AudioFileNotFound(file_path.clone())
        })?;

        let canonical_dir = audio_dir.canonicalize().map_err(|e| {
            tracing::error!(error = %e, path = %audio_dir.display(), "Invalid audio directory");
            ApiError::AudioFileNotFound(file_path.clone())
        })?;

        if !canonical.starts_with(&canonical_dir) {
            tracing::warn!(
                file_path = %file_path,
                canonical = %canonical.display(),
                "Symlink escape blocked"
            );
            return Err(ApiError::Forbidden("Access denied".to_string()));
        }

        Ok(canonical)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Path validation task failed: {}", e)))?
}
