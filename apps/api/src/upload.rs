//! Resume upload policy and flow.
//!
//! A resume is accepted when it is a PDF, DOC or DOCX of at most 10 MiB. The check runs
//! before storage is contacted so rejected files never leave the process.

use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::storage::{ResumeStorage, StorageError};

pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;
pub const KEY_PREFIX: &str = "cv-uploads";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeKind {
    Pdf,
    Doc,
    Docx,
}

impl ResumeKind {
    pub fn mime(&self) -> &'static str {
        match self {
            ResumeKind::Pdf => "application/pdf",
            ResumeKind::Doc => "application/msword",
            ResumeKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    fn from_mime(mime: &str) -> Option<Self> {
        [ResumeKind::Pdf, ResumeKind::Doc, ResumeKind::Docx]
            .into_iter()
            .find(|kind| kind.mime().eq_ignore_ascii_case(mime))
    }

    fn from_extension(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(ResumeKind::Pdf),
            "doc" => Some(ResumeKind::Doc),
            "docx" => Some(ResumeKind::Docx),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum UploadRejection {
    #[error("No file uploaded")]
    Missing,
    #[error("Only PDF and DOC files are allowed")]
    UnsupportedType,
    #[error("File size must be less than 10MB")]
    TooLarge,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Rejected(#[from] UploadRejection),
    #[error("storage failed: {0}")]
    Storage(#[from] StorageError),
}

/// A file as received from a multipart form.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResume {
    pub url: String,
    pub file_name: String,
}

/// Checks type and size. A declared MIME type wins unless it is missing or generic,
/// in which case the extension decides.
pub fn check_resume(
    file_name: &str,
    content_type: Option<&str>,
    size: usize,
) -> Result<ResumeKind, UploadRejection> {
    if file_name.trim().is_empty() || size == 0 {
        return Err(UploadRejection::Missing);
    }

    let declared = content_type
        .map(|ct| ct.split(';').next().unwrap_or_default().trim())
        .filter(|ct| !ct.is_empty() && !ct.eq_ignore_ascii_case("application/octet-stream"));
    let kind = match declared {
        Some(mime) => ResumeKind::from_mime(mime),
        None => ResumeKind::from_extension(file_name),
    }
    .ok_or(UploadRejection::UnsupportedType)?;

    if size > MAX_RESUME_BYTES {
        return Err(UploadRejection::TooLarge);
    }
    Ok(kind)
}

/// Replaces every character outside `[A-Za-z0-9.-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn object_key(timestamp_millis: i64, sanitized_name: &str) -> String {
    format!("{KEY_PREFIX}/{timestamp_millis}-{sanitized_name}")
}

/// Validates locally, then hands the file to storage.
pub async fn upload_resume(
    storage: &dyn ResumeStorage,
    upload: ResumeUpload,
) -> Result<StoredResume, UploadError> {
    let kind = check_resume(
        &upload.file_name,
        upload.content_type.as_deref(),
        upload.bytes.len(),
    )?;

    let file_name = sanitize_file_name(&upload.file_name);
    let key = object_key(Utc::now().timestamp_millis(), &file_name);
    let url = storage.put(&key, upload.bytes, kind.mime()).await?;
    info!("Stored resume at {key}");

    Ok(StoredResume { url, file_name })
}
