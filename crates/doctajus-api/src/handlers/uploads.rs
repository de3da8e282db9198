//! Public serving of stored uploads.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;

use doctajus_core::error::AppError;
use doctajus_storage::mime::serving_content_type;

use crate::error::ApiResult;
use crate::state::AppState;

const CACHE_CONTROL: &str = "max-age=3600";

/// GET /api/uploads/{folder}/{filename}
pub async fn serve_in_folder(
    State(state): State<AppState>,
    Path((folder, filename)): Path<(String, String)>,
) -> ApiResult<Response> {
    serve(&state, Some(&folder), &filename).await
}

/// GET /api/uploads/{filename}
pub async fn serve_root(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<Response> {
    serve(&state, None, &filename).await
}

async fn serve(state: &AppState, folder: Option<&str>, filename: &str) -> ApiResult<Response> {
    let (stream, meta) = state.uploads.open(folder, filename).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, serving_content_type(filename))
        .header(header::CONTENT_DISPOSITION, content_disposition(filename))
        .header(header::CACHE_CONTROL, CACHE_CONTROL)
        .header(header::CONTENT_LENGTH, meta.size_bytes)
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// `inline` disposition with quotes and control characters stripped from
/// the name.
fn content_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .filter(|c| *c != '"' && *c != '\\' && !c.is_control())
        .collect();
    format!("inline; filename=\"{safe}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition() {
        assert_eq!(
            content_disposition("demanda.pdf"),
            "inline; filename=\"demanda.pdf\""
        );
        assert_eq!(
            content_disposition("a\"b\r\n.pdf"),
            "inline; filename=\"ab.pdf\""
        );
    }
}
