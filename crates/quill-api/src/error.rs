use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Typed handler errors. Validation, permission and not-found are caller
/// errors and surface as structured JSON; everything else is unexpected,
/// gets logged with its full chain, and leaves the server as a bare 500
/// with only the error's message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("{0}")]
    Permission(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn permission() -> Self {
        Self::Permission("admin access required".to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Internal(anyhow::anyhow!("blocking task failed: {e}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "value:invalid", "data": field, "message": message }),
            ),
            Self::Permission(message) => (
                StatusCode::FORBIDDEN,
                json!({ "error": "permission:forbidden", "message": message }),
            ),
            Self::NotFound(message) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "value:notfound", "message": message }),
            ),
            Self::Internal(e) => {
                error!("internal error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal:unexpected", "message": e.to_string() }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
