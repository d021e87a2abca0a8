//! Request-context middleware: session loading for every route, and the
//! admin gate layered onto the manage area.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use quill_types::models::User;
use tracing::{error, info};

use crate::session;
use crate::state::AppState;

/// The user resolved from the session cookie, if any. Inserted into request
/// extensions for every route.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

pub async fn load_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let user = match jar.get(session::COOKIE_NAME) {
        Some(cookie) => {
            let token = cookie.value().to_string();
            let state = state.clone();
            // Session lookup hits the database; run it off the async runtime.
            match tokio::task::spawn_blocking(move || {
                session::decode(&state.db, &token, &state.session_secret)
            })
            .await
            {
                Ok(user) => user,
                Err(e) => {
                    error!("session task failed: {e}");
                    None
                }
            }
        }
        None => None,
    };

    if let Some(user) = &user {
        info!("session user: {}", user.email);
    }
    req.extensions_mut().insert(CurrentUser(user));
    next.run(req).await
}

/// Short-circuits to the sign-in page unless the request carries an admin
/// session. Layered onto the `/manage` router only; no handler behind it
/// ever runs for an anonymous or non-admin caller.
pub async fn require_admin(req: Request, next: Next) -> Response {
    let is_admin = req
        .extensions()
        .get::<CurrentUser>()
        .and_then(|current| current.0.as_ref())
        .is_some_and(|user| user.admin);

    if !is_admin {
        return Redirect::to("/signin").into_response();
    }
    next.run(req).await
}
