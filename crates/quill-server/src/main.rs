mod config;
mod templates;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use quill_api::middleware::{load_session, require_admin};
use quill_api::reply::normalize;
use quill_api::state::{AppState, AppStateInner};
use quill_api::{blogs, comments, pages, users};

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                if config.debug {
                    "quill=debug,tower_http=debug".into()
                } else {
                    "quill=info".into()
                }
            }),
        )
        .init();

    let db = quill_db::Database::open(&PathBuf::from(&config.db_path))?;
    let templates = templates::build()?;

    let state: AppState = Arc::new(AppStateInner {
        db,
        templates,
        session_secret: config.session_secret.clone(),
    });

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("quill listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Assemble the full application router. Duplicate method+path
/// registrations panic here at startup; ambiguous routes never ship.
fn router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route("/", get(pages::index))
        .route("/blog/{id}", get(pages::blog_detail))
        .route("/register", get(pages::register_page))
        .route("/signin", get(pages::signin_page))
        .route("/signout", get(pages::signout));

    // The admin gate wraps only the manage area; the session loader on the
    // merged router runs first and supplies the current user.
    let manage_routes = Router::new()
        .route("/manage/blogs", get(pages::manage_blogs))
        .route("/manage/blogs/create", get(pages::manage_create_blog))
        .layer(middleware::from_fn(require_admin));

    let api_routes = Router::new()
        .route("/api/users", post(users::register))
        .route("/api/authenticate", post(users::authenticate))
        .route("/api/blogs", get(blogs::list).post(blogs::create))
        .route("/api/blogs/{id}", get(blogs::detail))
        .route("/api/blogs/{id}/comments", post(comments::create))
        .route("/api/comments", get(comments::list));

    Router::new()
        .merge(page_routes)
        .merge(manage_routes)
        .merge(api_routes)
        .layer(middleware::from_fn_with_state(state.clone(), load_session))
        .layer(middleware::map_response_with_state(state.clone(), normalize))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
