//! Persisted entities. Each instance is a standalone value: reads produce
//! fresh values, writes are explicit calls, nothing tracks identity across
//! queries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a new entity id: 32 lowercase hex characters, no hyphens.
/// Session tokens are hyphen-delimited, so ids must stay hyphen-free.
pub fn next_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    /// Salted hash, never the plaintext. Redacted before leaving the server.
    pub password: String,
    pub image: String,
    pub admin: bool,
    pub created_at: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: String,
    pub user_id: String,
    // Author name/image are denormalized onto the blog to avoid a join.
    pub user_name: String,
    pub user_image: String,
    pub name: String,
    pub summary: String,
    /// Raw markdown source. HTML is computed at read time, never stored.
    pub content: String,
    pub created_at: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub blog_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_image: String,
    pub content: String,
    pub created_at: f64,
}
