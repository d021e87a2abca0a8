//! Dual-format body extractor: POST bodies arrive either as JSON or as
//! form fields depending on content-type. A malformed or missing body is a
//! caller error and surfaces as a 400 validation error, never a panic.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::validation("body", "unreadable request body"))?;

        let parsed = if content_type.starts_with("application/json") {
            serde_json::from_slice(&bytes)
                .map_err(|e| ApiError::validation("body", format!("invalid json body: {e}")))?
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            serde_urlencoded::from_bytes(&bytes)
                .map_err(|e| ApiError::validation("body", format!("invalid form body: {e}")))?
        } else {
            return Err(ApiError::validation("body", "unsupported content type"));
        };

        Ok(Payload(parsed))
    }
}
