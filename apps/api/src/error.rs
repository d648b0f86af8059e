//! Error handling for the TuneHub API
//!
//! This module provides a unified error type using thiserror, with HTTP
//! status code mapping via Axum's IntoResponse trait. Every error renders as
//! `{"success": false, "error": "<message>", "code": "<CODE>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tunehub_deezer_client::DeezerError;

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always false, mirrors the `success` flag of successful mutations
    pub success: bool,
    /// Human-readable error message
    pub error: String,
    /// Error code for client-side handling
    pub code: &'static str,
}

/// Main API error type
#[derive(Error, Debug)]
pub enum ApiError {
    // ========== Authentication & Authorization ==========
    /// Missing, unknown or expired session
    #[error("Authentication required")]
    Unauthorized,

    /// Username/password pair did not match
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Caller is authenticated but may not touch this resource
    #[error("{0}")]
    Forbidden(String),

    // ========== Resource Errors ==========
    /// Requested resource not found
    #[error("{resource_type} not found")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Unique value already taken
    #[error("{0}")]
    Conflict(String),

    // ========== Validation Errors ==========
    /// Request validation failed
    #[error("{0}")]
    Validation(String),

    /// Rejected multipart upload
    #[error("{0}")]
    InvalidUpload(String),

    /// Upload body exceeded the configured limit
    #[error("Upload too large")]
    PayloadTooLarge,

    // ========== Database Errors ==========
    /// Database query failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed at startup
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    // ========== External Service Errors ==========
    /// Deezer request failed
    #[error("{0}")]
    ExternalService(#[from] DeezerError),

    // ========== Audio/Streaming Errors ==========
    /// Audio file referenced by a song is missing on disk
    #[error("Audio file not found")]
    AudioFileNotFound(String),

    /// Range request invalid (400 Bad Request)
    #[error("invalid range request: {0}")]
    InvalidRange(String),

    /// Range not satisfiable (416 Range Not Satisfiable)
    #[error("range not satisfiable")]
    RangeNotSatisfiable { file_size: u64 },

    // ========== Internal Errors ==========
    /// Filesystem operation failed
    #[error("io error: {0}")]
    Io(String),

    /// Internal server error (catch-all for unexpected errors)
    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,

            Self::Forbidden(_) => StatusCode::FORBIDDEN,

            Self::NotFound { .. } | Self::AudioFileNotFound(_) => StatusCode::NOT_FOUND,

            Self::Conflict(_) => StatusCode::CONFLICT,

            Self::Validation(_) | Self::InvalidUpload(_) | Self::InvalidRange(_) => {
                StatusCode::BAD_REQUEST
            }

            Self::RangeNotSatisfiable { .. } => StatusCode::RANGE_NOT_SATISFIABLE,

            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            Self::ExternalService(_)
            | Self::Database(_)
            | Self::Migration(_)
            | Self::Io(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for client-side handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidUpload(_) => "INVALID_UPLOAD",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Migration(_) => "MIGRATION_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::AudioFileNotFound(_) => "AUDIO_NOT_FOUND",
            Self::InvalidRange(_) => "INVALID_RANGE",
            Self::RangeNotSatisfiable { .. } => "RANGE_NOT_SATISFIABLE",
            Self::Io(_) => "IO_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Log the error with appropriate severity based on status code
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Server error occurred"
            );
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Authorization error"
            );
        } else {
            tracing::debug!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Client error"
            );
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status_code();
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: self.error_code(),
        };

        // RFC 7233: 416 carries the full length
        if let Self::RangeNotSatisfiable { file_size } = &self {
            return (
                status,
                [("Content-Range", format!("bytes */{}", file_size))],
                Json(body),
            )
                .into_response();
        }

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api_err) => api_err,
            Err(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::AudioFileNotFound(err.to_string()),
            std::io::ErrorKind::PermissionDenied => Self::Forbidden("File access denied".to_string()),
            _ => Self::Io(err.to_string()),
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::InvalidUpload(err.body_text())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::not_found("Song", 123).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::validation("test").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("Username already exists".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::ExternalService(DeezerError::Timeout).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::Unauthorized.error_code(), "UNAUTHORIZED");
        assert_eq!(ApiError::not_found("Song", 1).error_code(), "NOT_FOUND");
        assert_eq!(
            ApiError::InvalidUpload("Invalid file type".into()).error_code(),
            "INVALID_UPLOAD"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ApiError::not_found("Playlist", 9).to_string(), "Playlist not found");
        assert_eq!(
            ApiError::Forbidden("Unauthorized".into()).to_string(),
            "Unauthorized"
        );
    }

    #[test]
    fn test_io_not_found_maps_to_audio_not_found() {
        let err: ApiError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Audio file not found");
    }

    #[tokio::test]
    async fn test_response_body_shape() {
        let response = ApiError::Forbidden("Unauthorized".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Unauthorized");
        assert_eq!(json["code"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_range_not_satisfiable_sets_content_range() {
        let response = ApiError::RangeNotSatisfiable { file_size: 1000 }.into_response();
        assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
        assert_eq!(
            response.headers().get("Content-Range").unwrap(),
            "bytes */1000"
        );
    }
}
