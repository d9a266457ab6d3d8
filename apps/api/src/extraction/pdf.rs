use std::any::Any;
use std::panic;

use super::ExtractError;

fn decode_error(message: String) -> ExtractError {
    ExtractError::Decode {
        format: "PDF",
        message,
    }
}

/// Extracts the text of every page, concatenated in page order.
///
/// `pdf-extract` panics on some structurally broken documents (a page without a
/// `/MediaBox`, for one). Those panics are reported as decode errors like any other.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(result) => result.map_err(|e| decode_error(e.to_string())),
        Err(payload) => Err(decode_error(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "document could not be parsed".to_string())
}
