use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::Bytes;

use crate::errors::AppError;

/// Request body cap for upload routes; leaves room above the per-file limits
/// so oversize files get a readable error instead of a bare 413.
pub const MAX_UPLOAD_BODY_BYTES: usize = 12 * 1024 * 1024;

#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Reads the named file field from a multipart body, enforcing `max_bytes`.
/// `too_large` is the message returned when the file exceeds the limit.
pub async fn read_file_field(
    multipart: &mut Multipart,
    field_name: &str,
    max_bytes: usize,
    too_large: &str,
) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, too_large))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::Validation(format!("'{field_name}' must be a file")))?;
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, too_large))?;

        if bytes.is_empty() {
            return Err(AppError::Validation("Select a file first.".to_string()));
        }
        if bytes.len() > max_bytes {
            return Err(AppError::Validation(too_large.to_string()));
        }

        return Ok(UploadedFile {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{field_name}'"
    )))
}

fn multipart_error(err: MultipartError, too_large: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Validation(too_large.to_string())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}
