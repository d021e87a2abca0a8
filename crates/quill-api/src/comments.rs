//! Comment APIs: creation by any signed-in user, paginated listing for the
//! manage area.

use std::collections::HashMap;

use axum::Extension;
use axum::extract::{Path, Query, State};
use chrono::Utc;
use quill_types::api::CreateCommentRequest;
use quill_types::models::{Blog, Comment, next_id};
use quill_types::page::{Page, page_index};
use serde_json::json;

use crate::error::ApiError;
use crate::extract::Payload;
use crate::middleware::CurrentUser;
use crate::reply::Reply;
use crate::state::AppState;

/// `POST /api/blogs/{id}/comments` — any signed-in user may comment on an
/// existing blog.
pub async fn create(
    State(state): State<AppState>,
    Path(blog_id): Path<String>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Payload(req): Payload<CreateCommentRequest>,
) -> Result<Reply, ApiError> {
    let user = user.ok_or_else(|| ApiError::Permission("please sign in first".to_string()))?;

    let content = req.content.trim();
    if content.is_empty() {
        return Err(ApiError::validation("content", "content cannot be empty."));
    }

    let db = state.clone();
    let id = blog_id.clone();
    let blog = tokio::task::spawn_blocking(move || db.db.find_by_id::<Blog>(&id))
        .await??
        .ok_or_else(|| ApiError::NotFound(format!("blog {blog_id} not found")))?;

    let comment = Comment {
        id: next_id(),
        blog_id: blog.id,
        user_id: user.id.clone(),
        user_name: user.name.clone(),
        user_image: user.image.clone(),
        content: content.to_string(),
        created_at: Utc::now().timestamp_millis() as f64 / 1000.0,
    };

    let db = state.clone();
    let to_save = comment.clone();
    tokio::task::spawn_blocking(move || db.db.insert(&to_save)).await??;

    Reply::json(&comment)
}

/// `GET /api/comments?page=N` — same paging semantics as the blog listing.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Reply, ApiError> {
    let index = page_index(query.get("page").map(String::as_str));

    let db = state.clone();
    let count = tokio::task::spawn_blocking(move || db.db.comment_count()).await??;

    let page = Page::new(count, index);
    if count == 0 {
        return Ok(Reply::Json(json!({ "page": page, "comments": [] })));
    }

    let db = state.clone();
    let (offset, limit) = (page.offset, page.limit);
    let comments =
        tokio::task::spawn_blocking(move || db.db.comments_page(offset, limit)).await??;

    Ok(Reply::Json(json!({ "page": page, "comments": comments })))
}
