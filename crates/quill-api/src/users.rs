//! Registration and sign-in.

use std::sync::LazyLock;

use axum::extract::State;
use axum::http::HeaderName;
use chrono::Utc;
use md5::{Digest, Md5};
use quill_types::api::{AuthRequest, RegisterRequest};
use quill_types::models::{User, next_id};
use regex::Regex;
use serde_json::json;
use tracing::info;

use crate::error::ApiError;
use crate::extract::Payload;
use crate::pages::session_cookie;
use crate::reply::Reply;
use crate::session::{self, REDACTED_PASSWORD};
use crate::state::AppState;

const SESSION_MAX_AGE: i64 = 86400;

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9.\-_]+@[a-z0-9\-_]+(\.[a-z0-9\-_]+){1,4}$").expect("email regex")
});

/// The client submits its own SHA1 of the plaintext, 40 hex characters.
static RE_SHA1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{40}$").expect("sha1 regex"));

fn gravatar_url(email: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(email.as_bytes());
    format!(
        "http://www.gravatar.com/avatar/{}?d=mm&s=120",
        hex::encode(hasher.finalize())
    )
}

fn signed_in_json(user: &User, token: &str) -> ([(HeaderName, String); 1], Reply) {
    let mut user = user.clone();
    user.password = REDACTED_PASSWORD.to_string();
    (
        session_cookie(token, SESSION_MAX_AGE),
        Reply::Json(json!(user)),
    )
}

/// `POST /api/users`: register, sign the new user in, return the redacted
/// user as JSON.
pub async fn register(
    State(state): State<AppState>,
    Payload(req): Payload<RegisterRequest>,
) -> Result<([(HeaderName, String); 1], Reply), ApiError> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::validation("name", "Name cannot be empty."));
    }
    if !RE_EMAIL.is_match(&req.email) {
        return Err(ApiError::validation("email", "Invalid email."));
    }
    if !RE_SHA1.is_match(&req.password) {
        return Err(ApiError::validation("password", "Invalid password."));
    }

    // Uniqueness is a pre-check query, not a database constraint.
    let db = state.clone();
    let email = req.email.clone();
    let existing = tokio::task::spawn_blocking(move || db.db.user_by_email(&email)).await??;
    if existing.is_some() {
        return Err(ApiError::validation("email", "Email is already in use."));
    }

    let uid = next_id();
    let user = User {
        id: uid.clone(),
        email: req.email.clone(),
        name,
        password: session::password_digest(&uid, &req.password),
        image: gravatar_url(&req.email),
        admin: false,
        created_at: Utc::now().timestamp_millis() as f64 / 1000.0,
    };

    let db = state.clone();
    let to_save = user.clone();
    tokio::task::spawn_blocking(move || db.db.insert(&to_save)).await??;
    info!("registered user {}", user.email);

    let token = session::encode(&user, SESSION_MAX_AGE, &state.session_secret);
    Ok(signed_in_json(&user, &token))
}

/// `POST /api/authenticate`: verify credentials and set the session cookie.
/// Bad credentials are validation errors, never a bare 500.
pub async fn authenticate(
    State(state): State<AppState>,
    Payload(req): Payload<AuthRequest>,
) -> Result<([(HeaderName, String); 1], Reply), ApiError> {
    if req.email.is_empty() {
        return Err(ApiError::validation("email", "Invalid email."));
    }
    if req.password.is_empty() {
        return Err(ApiError::validation("password", "Invalid password."));
    }

    let db = state.clone();
    let email = req.email.clone();
    let user = tokio::task::spawn_blocking(move || db.db.user_by_email(&email))
        .await??
        .ok_or_else(|| ApiError::validation("email", "Email not exist."))?;

    if user.password != session::password_digest(&user.id, &req.password) {
        return Err(ApiError::validation("password", "Invalid password."));
    }

    let token = session::encode(&user, SESSION_MAX_AGE, &state.session_secret);
    info!("user signed in: {}", user.email);
    Ok(signed_in_json(&user, &token))
}
