//! Signed session cookie: `{user_id}-{expires}-{sha1hex}` where the digest
//! covers the user's stored password hash. Changing a password therefore
//! invalidates every outstanding session for that user.

use chrono::Utc;
use quill_db::Database;
use quill_types::models::User;
use sha1::{Digest, Sha1};
use tracing::{debug, warn};

pub const COOKIE_NAME: &str = "quillsession";

/// Placeholder written over the password hash before a user value leaves
/// the server.
pub const REDACTED_PASSWORD: &str = "******";

fn sha1_hex(input: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Server-side password hash: the client sends a 40-hex SHA1 of the
/// plaintext, and the stored value salts it with the user id.
pub fn password_digest(user_id: &str, client_hash: &str) -> String {
    sha1_hex(&format!("{user_id}:{client_hash}"))
}

fn token_digest(user_id: &str, password_hash: &str, expires: i64, secret: &str) -> String {
    sha1_hex(&format!("{user_id}:{password_hash}:{expires}:{secret}"))
}

pub fn encode(user: &User, max_age: i64, secret: &str) -> String {
    let expires = Utc::now().timestamp() + max_age;
    let digest = token_digest(&user.id, &user.password, expires, secret);
    format!("{}-{}-{}", user.id, expires, digest)
}

/// Parse a token and load its user if the token is still valid. Any
/// malformed, expired, or tampered token comes back as `None`; a database
/// failure during lookup does too, after a log line.
pub fn decode(db: &Database, token: &str, secret: &str) -> Option<User> {
    let mut parts = token.split('-');
    let (user_id, expires, digest) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let expires: i64 = expires.parse().ok()?;
    if expires < Utc::now().timestamp() {
        return None;
    }
    let user = match db.find_by_id::<User>(user_id) {
        Ok(found) => found?,
        Err(e) => {
            warn!("session lookup failed for {}: {:#}", user_id, e);
            return None;
        }
    };
    // Always compare against the computed digest value.
    if digest != token_digest(&user.id, &user.password, expires, secret) {
        debug!("session digest mismatch for {}", user_id);
        return None;
    }
    let mut user = user;
    user.password = REDACTED_PASSWORD.to_string();
    Some(user)
}
