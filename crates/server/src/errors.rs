use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::recipe::RecipeError;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"error": <title>, "message": <detail>, "code": <business code>}`
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: Option<String>,
    pub code: Option<u16>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message, code: None }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = self.error, message = ?self.message, "request failed");
        }
        let body = serde_json::json!({
            "error": self.error,
            "message": self.message,
            "code": self.code,
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<RecipeError> for JsonApiError {
    fn from(e: RecipeError) -> Self {
        let (status, title) = match &e {
            _ if e.is_not_found() => (StatusCode::NOT_FOUND, "Not Found"),
            RecipeError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation Error"),
            RecipeError::Conflict(_) => (StatusCode::CONFLICT, "Conflict"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };
        Self { status, error: title, message: Some(e.to_string()), code: Some(e.code()) }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}
