use std::env;

/// Process configuration, read once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    pub session_secret: String,
    pub debug: bool,
}

impl Config {
    /// Environment variables with development defaults. `.env` loading is
    /// the caller's job (dotenvy in main).
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("QUILL_HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port: u16 = env::var("QUILL_PORT")
            .unwrap_or_else(|_| "9000".into())
            .parse()?;
        let db_path = env::var("QUILL_DB_PATH").unwrap_or_else(|_| "quill.db".into());
        let session_secret =
            env::var("QUILL_SESSION_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
        let debug = env::var("QUILL_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            db_path,
            session_secret,
            debug,
        })
    }
}
