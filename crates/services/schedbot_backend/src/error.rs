use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors returned to HTTP clients, always as `{"error": "<message>"}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Cannot {method} {path}")]
    NotFound { method: String, path: String },
    #[error("Method {method} not allowed for {path}")]
    MethodNotAllowed { method: String, path: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
