//! Document text extraction for uploaded resumes, job descriptions and cover letters.
//!
//! The format is resolved once from the filename suffix and every format exposes the
//! same `extract_text` capability. Extraction is all-or-nothing: any decode failure
//! aborts the whole file.

use thiserror::Error;

pub mod docx;
pub mod pdf;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("malformed {format} document: {message}")]
    Decode {
        format: &'static str,
        message: String,
    },

    #[error("file is not valid UTF-8 text: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Supported upload formats. Anything that is not `.pdf` or `.docx` is read as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    /// Suffix match is case-sensitive: `RESUME.PDF` is treated as plain text.
    pub fn from_filename(filename: &str) -> Self {
        if filename.ends_with(".pdf") {
            DocumentFormat::Pdf
        } else if filename.ends_with(".docx") {
            DocumentFormat::Docx
        } else {
            DocumentFormat::PlainText
        }
    }

    pub fn extract_text(self, bytes: &[u8]) -> Result<String, ExtractError> {
        match self {
            DocumentFormat::Pdf => pdf::extract_text(bytes),
            DocumentFormat::Docx => docx::extract_text(bytes),
            DocumentFormat::PlainText => Ok(String::from_utf8(bytes.to_vec())?),
        }
    }
}

/// Extracts plain text from an uploaded file, dispatching on its filename.
pub fn extract(filename: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    DocumentFormat::from_filename(filename).extract_text(bytes)
}
