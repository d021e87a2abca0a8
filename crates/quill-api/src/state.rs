use std::sync::Arc;

use quill_db::Database;
use tera::Tera;

pub type AppState = Arc<AppStateInner>;

/// Everything handlers need, constructed once at startup. The template
/// environment and session secret live here instead of in process globals.
pub struct AppStateInner {
    pub db: Database,
    pub templates: Tera,
    pub session_secret: String,
}
