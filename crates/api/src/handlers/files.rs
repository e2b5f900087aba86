//! Handlers for the `/files` resource: media upload and download.

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use counsel_core::media::{
    content_type_for_extension, generate_image_name, reencode_image, too_large, MediaKind,
    CANONICAL_IMAGE_TYPE, VIDEO_FILE_NAME, VIDEO_MEDIA_TYPE,
};
use serde::Serialize;
use tokio_util::io::ReaderStream;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// One stored file, as reported back to the uploader.
#[derive(Debug, Serialize)]
pub struct StoredFile {
    pub name: String,
    /// Size on disk after processing.
    pub size: u64,
    #[serde(rename = "type")]
    pub media_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub files: Vec<StoredFile>,
}

/// POST /files
///
/// Every multipart part is treated as a file and classified by its declared
/// content type. Parts are processed in order; the first invalid one aborts
/// the request, and parts stored before it stay stored.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let mut stored = Vec::new();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let label = field
            .file_name()
            .or_else(|| field.name())
            .unwrap_or("unnamed")
            .to_string();
        let kind = MediaKind::classify(&label, field.content_type())?;

        let mut data = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            if (data.len() + chunk.len()) as u64 > kind.max_bytes() {
                return Err(too_large(&label, kind).into());
            }
            data.extend_from_slice(&chunk);
        }

        let file = match kind {
            MediaKind::Image => {
                let jpeg = tokio::task::spawn_blocking(move || reencode_image(&data))
                    .await
                    .map_err(|e| AppError::InternalError(format!("Image task failed: {e}")))??;
                let name = generate_image_name();
                let size = state.blobs.save(&name, &jpeg).await?;
                StoredFile {
                    name,
                    size,
                    media_type: CANONICAL_IMAGE_TYPE,
                }
            }
            MediaKind::Video => {
                let size = state.blobs.replace_video(&data).await?;
                StoredFile {
                    name: VIDEO_FILE_NAME.to_string(),
                    size,
                    media_type: VIDEO_MEDIA_TYPE,
                }
            }
        };
        tracing::info!(original = %label, name = %file.name, size = file.size, "File uploaded");
        stored.push(file);
    }

    if stored.is_empty() {
        return Err(AppError::BadRequest("No files were uploaded".into()));
    }

    let message = format!("{} file(s) uploaded successfully", stored.len());
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message,
            files: stored,
        }),
    ))
}

/// GET /files/{filename}
///
/// Streams the file from disk with a Content-Type guessed from its
/// extension.
pub async fn serve(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    let (file, size) = state.blobs.open(&filename).await?;
    let content_type = content_type_for_extension(&filename);

    let body = Body::from_stream(ReaderStream::new(file));
    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_LENGTH, size.to_string()),
        ],
        body,
    )
        .into_response())
}
