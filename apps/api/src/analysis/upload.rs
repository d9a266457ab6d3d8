use std::collections::HashMap;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::extract;

/// One uploaded file, read fully into memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Extracts text on the blocking pool; PDF and DOCX decoding is CPU-bound.
    pub async fn extract_text(self) -> Result<String, AppError> {
        let UploadedFile { filename, bytes } = self;
        tokio::task::spawn_blocking(move || {
            extract(&filename, &bytes).map_err(|source| AppError::Extraction { filename, source })
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?
    }
}

/// Multipart form split into file parts and plain text parts, keyed by field name.
#[derive(Debug, Default)]
pub struct UploadForm {
    files: HashMap<String, UploadedFile>,
    texts: HashMap<String, String>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, "Invalid multipart body".to_string()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match field.file_name().map(str::to_owned) {
                Some(filename) => {
                    let bytes = field.bytes().await.map_err(|e| {
                        multipart_error(e, format!("Failed to read upload '{name}'"))
                    })?;
                    // Browsers send an empty, unnamed part for an untouched file input.
                    if filename.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    debug!(field = %name, %filename, size = bytes.len(), "Received upload");
                    form.files.insert(name, UploadedFile { filename, bytes });
                }
                None => {
                    let text = field.text().await.map_err(|e| {
                        multipart_error(e, format!("Failed to read field '{name}'"))
                    })?;
                    form.texts.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    pub fn require_file(&mut self, name: &str) -> Result<UploadedFile, AppError> {
        self.take_file(name)
            .ok_or_else(|| AppError::Validation(format!("Missing required file field '{name}'")))
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    /// Text field value, treating an empty string as absent.
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.texts.remove(name).filter(|t| !t.is_empty())
    }
}

fn multipart_error(error: MultipartError, context: String) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("{context}: {}", error.body_text()))
    }
}
