use axum::{
    extract::{multipart::Field, multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;
use crate::upload::{upload_resume, ResumeUpload, UploadRejection};

/// Multipart part that carries the resume.
pub const FILE_FIELD: &str = "file";

/// Maps a multipart read failure; a body over the route limit counts as an oversized file.
pub fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Upload(UploadRejection::TooLarge)
    } else {
        AppError::Validation(e.body_text())
    }
}

/// Reads a file part. A part with no filename and no bytes (an untouched file input)
/// yields `None`.
pub async fn read_file_field(field: Field<'_>) -> Result<Option<ResumeUpload>, AppError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(multipart_error)?;

    if file_name.is_empty() && bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(ResumeUpload {
        file_name,
        content_type,
        bytes,
    }))
}

/// POST /api/upload
/// Validates and stores a resume, returning its public URL.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(FILE_FIELD) {
            upload = read_file_field(field).await?;
        }
    }

    let upload = upload.ok_or(UploadRejection::Missing)?;
    let stored = upload_resume(state.storage.as_ref(), upload).await?;

    Ok(Json(json!({
        "success": true,
        "url": stored.url,
        "fileName": stored.file_name
    })))
}
