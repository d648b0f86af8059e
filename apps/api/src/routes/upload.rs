//! `POST /api/upload` - multipart song upload

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::error::ApiResult;
use crate::middleware::AuthUser;
use crate::services::{UploadForm, UploadedFile};
use crate::state::AppState;

pub fn upload_router(state: AppState) -> Router {
    let limit = state.settings.max_upload_bytes;
    Router::new()
        .route("/api/upload", post(upload_song))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub song_id: i64,
}

/// Collect the multipart fields into an [`UploadForm`]
///
/// Unknown fields are skipped; a repeated field keeps its last value.
async fn read_form(mut multipart: Multipart) -> ApiResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "audio" | "cover" => {
                let file = UploadedFile {
                    file_name: field.file_name().unwrap_or_default().to_string(),
                    data: field.bytes().await?,
                };
                if name == "audio" {
                    form.audio = Some(file);
                } else {
                    form.cover = Some(file);
                }
            }
            "title" => form.title = Some(field.text().await?),
            "artist" => form.artist = Some(field.text().await?),
            "album" => form.album = Some(field.text().await?),
            "genre" => form.genre = Some(field.text().await?),
            "duration" => form.duration = Some(field.text().await?),
            "release_date" => form.release_date = Some(field.text().await?),
            other => tracing::debug!(field = other, "Ignoring unknown upload field"),
        }
    }

    Ok(form)
}

async fn upload_song(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let form = read_form(multipart).await?;
    let song_id = state.uploads.upload(form).await?;

    tracing::info!(song_id, user_id = auth.user.id, "Upload accepted");
    Ok(Json(UploadResponse {
        success: true,
        song_id,
    }))
}
