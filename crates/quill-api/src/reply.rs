//! Tagged handler results and the response-normalization layer.
//!
//! Handlers return a `Reply` naming the response shape instead of letting
//! the return value's type steer it. The variants travel through axum as a
//! response extension; `normalize` (installed with
//! `axum::middleware::map_response_with_state`) turns them into concrete
//! HTTP responses, rendering templates with the shared Tera environment.
//! A render failure becomes a plain 500 carrying the error text; the
//! normalizer itself never fails.

use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::error;

use crate::state::AppState;

#[derive(Debug, Clone)]
pub enum Reply {
    /// Render `template` with the given context and answer `text/html`.
    Rendered {
        template: &'static str,
        context: tera::Context,
    },
    /// Serialize as `application/json`, UTF-8 preserved. Redacting secrets
    /// is the handler's job before it builds the value.
    Json(serde_json::Value),
    Redirect(String),
    Raw {
        bytes: Vec<u8>,
        content_type: &'static str,
    },
    Status {
        code: StatusCode,
        message: Option<String>,
    },
    Text(String),
}

impl Reply {
    pub fn rendered(template: &'static str, context: tera::Context) -> Self {
        Self::Rendered { template, context }
    }

    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, crate::error::ApiError> {
        Ok(Self::Json(serde_json::to_value(value).map_err(anyhow::Error::from)?))
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        // A placeholder carries the reply out of the handler; outer tuple
        // impls (e.g. Set-Cookie headers) still apply to it, and
        // `normalize` folds those headers into the final response.
        let mut res = Response::new(Body::empty());
        res.extensions_mut().insert(self);
        res
    }
}

/// Response-normalization middleware. Responses that did not come from a
/// `Reply` (errors, gate redirects, static files) pass through unchanged.
pub async fn normalize(State(state): State<AppState>, mut res: Response) -> Response {
    let Some(reply) = res.extensions_mut().remove::<Reply>() else {
        return res;
    };
    let (parts, _) = res.into_parts();

    let mut out = match reply {
        Reply::Rendered { template, context } => match state.templates.render(template, &context) {
            Ok(body) => Html(body).into_response(),
            Err(e) => {
                error!("template render failed for {}: {:#}", template, e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        },
        Reply::Json(value) => axum::Json(value).into_response(),
        Reply::Redirect(target) => Redirect::to(&target).into_response(),
        Reply::Raw { bytes, content_type } => {
            ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
        Reply::Status { code, message } => match message {
            Some(message) => (code, message).into_response(),
            None => code.into_response(),
        },
        Reply::Text(body) => ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response(),
    };

    // Carry over headers set on the placeholder, Set-Cookie in particular.
    for (name, value) in &parts.headers {
        out.headers_mut().append(name, value.clone());
    }
    out
}
