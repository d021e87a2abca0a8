use serde::{Deserialize, Serialize};

// -- Auth --

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    /// Client-side SHA1 of the plaintext, 40 hex characters.
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

// -- Blogs --

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBlogRequest {
    pub name: String,
    pub summary: String,
    pub content: String,
}

// -- Comments --

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}
