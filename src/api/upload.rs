//! Multipart file extraction shared by the upload endpoints.

use actix_multipart::Multipart;
use futures_util::StreamExt;

use crate::error::{AppError, AppResult};

/// Form field carrying the uploaded artifact.
pub const FILE_FIELD: &str = "file";

/// A text artifact read from a multipart form.
pub struct UploadedFile {
    /// Client-supplied filename, empty when absent.
    pub filename: String,
    pub content: String,
}

/// Read the `file` field of a multipart form as UTF-8 text, rejecting
/// payloads larger than `max_size` bytes. Other fields are ignored.
pub async fn read_text_file(mut payload: Multipart, max_size: usize) -> AppResult<UploadedFile> {
    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::InvalidInput(format!("Multipart error: {}", e)))?;

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk =
                chunk.map_err(|e| AppError::InvalidInput(format!("Upload read error: {}", e)))?;
            if data.len() + chunk.len() > max_size {
                return Err(AppError::InvalidInput(format!(
                    "File exceeds maximum upload size of {} bytes",
                    max_size
                )));
            }
            data.extend_from_slice(&chunk);
        }

        let content = String::from_utf8(data)
            .map_err(|_| AppError::InvalidInput("Uploaded file is not valid UTF-8".to_string()))?;

        return Ok(UploadedFile { filename, content });
    }

    Err(AppError::InvalidInput(format!(
        "Missing multipart field '{}'",
        FILE_FIELD
    )))
}
