//! Mapping of [`FormError`] onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use formkit_core::FormError;
use serde_json::json;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// A [`FormError`] on its way out of a handler.
///
/// Validation failures render as `{"success": false, "errors": {...}}`;
/// every other error renders as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError(pub FormError);

impl ApiError {
    /// Returns the HTTP status for the wrapped error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self.0 {
            FormError::Validation(errors) => json!({"success": false, "errors": errors}),
            other => {
                if status.is_server_error() {
                    tracing::error!(error = %other, "Request failed");
                }
                json!({"error": other.to_string()})
            }
        };
        (status, Json(body)).into_response()
    }
}
