//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use doctajus_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Numeric HTTP status.
    pub status_code: u16,
    /// Reason phrase of the status, e.g. `"Not Found"`.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<&AppError> for ApiErrorResponse {
    fn from(err: &AppError) -> Self {
        let status = status_for(err.kind);
        // Server-side failures keep their detail in the logs only.
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            err.message.clone()
        };
        Self {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
        }
    }
}

/// Newtype so the API crate can implement `IntoResponse` for the core error.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let body = ApiErrorResponse::from(&err);

        if err.is_client_error() {
            tracing::debug!(kind = %err.kind, message = %err.message, "Request rejected");
        } else {
            match &err.source {
                Some(source) => tracing::error!(
                    kind = %err.kind,
                    message = %err.message,
                    source = %source,
                    "Request failed"
                ),
                None => tracing::error!(kind = %err.kind, message = %err.message, "Request failed"),
            }
        }

        let status = StatusCode::from_u16(body.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

/// Result type returned by handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorKind::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorKind::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::Conflict), StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorKind::Database),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_body_shape() {
        let err = AppError::not_found("Documento con ID 1 no encontrado");
        let body = serde_json::to_value(ApiErrorResponse::from(&err)).unwrap();
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["message"], "Documento con ID 1 no encontrado");
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = AppError::database("connection refused on 10.0.0.5");
        let body = ApiErrorResponse::from(&err);
        assert_eq!(body.status_code, 500);
        assert_eq!(body.message, "Internal server error");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::from(AppError::forbidden("No")).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
