//! MIME lookup by file extension.

/// Fallback for anything not listed.
pub const OCTET_STREAM: &str = "application/octet-stream";

fn extension(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// `Content-Type` used when serving a stored upload.
///
/// Only the document and image formats users attach are mapped; everything
/// else is served as a download.
pub fn serving_content_type(file_name: &str) -> &'static str {
    match extension(file_name).as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => OCTET_STREAM,
    }
}

/// Best guess of an upload's MIME type when the client did not send one.
pub fn guess_from_name(file_name: &str) -> Option<&'static str> {
    let mime = match extension(file_name)?.as_str() {
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "xml" => "application/xml",
        "rtf" => "application/rtf",
        "odt" => "application/vnd.oasis.opendocument.text",
        "zip" => "application/zip",
        "webp" => "image/webp",
        _ => match serving_content_type(file_name) {
            OCTET_STREAM => return None,
            known => known,
        },
    };
    Some(mime)
}
