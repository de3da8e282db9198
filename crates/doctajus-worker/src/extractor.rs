//! Plain-text extraction by MIME type.

use doctajus_core::error::AppError;
use doctajus_core::result::AppResult;

fn essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn is_pdf(essence: &str) -> bool {
    essence == "application/pdf"
}

/// Whether text can be pulled out of files of this MIME type.
pub fn is_supported(mime_type: &str) -> bool {
    let essence = essence(mime_type);
    is_pdf(&essence)
        || essence.starts_with("text/")
        || essence == "application/json"
        || essence == "application/xml"
        || essence.ends_with("+json")
        || essence.ends_with("+xml")
}

/// Extract text from file bytes.
///
/// Returns `Ok(None)` for unsupported types. NUL characters are dropped
/// since PostgreSQL text columns cannot hold them.
///
/// PDF parsing is CPU bound; call this from a blocking task.
pub fn extract_text(mime_type: Option<&str>, data: &[u8]) -> AppResult<Option<String>> {
    let essence = match mime_type {
        Some(mime) if is_supported(mime) => essence(mime),
        _ => return Ok(None),
    };

    let text = if is_pdf(&essence) {
        pdf_extract::extract_text_from_mem(data)
            .map_err(|e| AppError::validation(format!("Unreadable PDF: {e}")))?
    } else {
        let text = std::str::from_utf8(data)
            .map_err(|e| AppError::validation(format!("File is not valid UTF-8: {e}")))?;
        text.trim_start_matches('\u{feff}').to_string()
    };
    Ok(Some(text.replace('\0', "")))
}
