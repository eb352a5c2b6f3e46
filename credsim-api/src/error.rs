//! Mapping of handler failures onto HTTP responses.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use credsim_storage::StorageError;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors a request handler can return.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or invalid input (400).
    #[error("{0}")]
    BadRequest(String),

    /// Referenced identifier or CPF does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// Store-level failure (500). The detail is logged, not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "invalid_request_error",
            Self::NotFound(_) => "not_found_error",
            Self::Internal(_) => "server_error",
        }
    }
}

/// JSON body attached to every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
}

impl ErrorResponse {
    fn new(message: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                error_type: error_type.into(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Internal(detail) => {
                error!(error = %detail, "Request failed");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = Json(ErrorResponse::new(message, self.error_type()));
        (self.status(), body).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            StorageError::Duplicate(_) => Self::BadRequest(err.to_string()),
            StorageError::Database(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<credsim_types::Error> for ApiError {
    fn from(err: credsim_types::Error) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
