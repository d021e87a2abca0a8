use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

/// Create the three tables if they do not exist yet. There is no migration
/// engine; this DDL is the whole schema. The email column deliberately
/// carries no UNIQUE constraint: uniqueness is enforced by a pre-check
/// query at registration time.
pub fn bootstrap(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            email       TEXT NOT NULL,
            name        TEXT NOT NULL,
            password    TEXT NOT NULL,
            image       TEXT NOT NULL,
            admin       INTEGER NOT NULL DEFAULT 0,
            created_at  REAL NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_users_email
            ON users(email);

        CREATE TABLE IF NOT EXISTS blogs (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL,
            user_name   TEXT NOT NULL,
            user_image  TEXT NOT NULL,
            name        TEXT NOT NULL,
            summary     TEXT NOT NULL,
            content     TEXT NOT NULL,
            created_at  REAL NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_blogs_created
            ON blogs(created_at);

        CREATE TABLE IF NOT EXISTS comments (
            id          TEXT PRIMARY KEY,
            blog_id     TEXT NOT NULL,
            user_id     TEXT NOT NULL,
            user_name   TEXT NOT NULL,
            user_image  TEXT NOT NULL,
            content     TEXT NOT NULL,
            created_at  REAL NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_comments_blog
            ON comments(blog_id, created_at);
        ",
    )?;

    info!("Database schema ready");
    Ok(())
}
