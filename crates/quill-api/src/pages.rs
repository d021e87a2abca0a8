//! Page handlers: every route here renders a Tera template through the
//! response normalizer, except sign-out which clears the session cookie.

use std::collections::HashMap;

use axum::Extension;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderName, header};
use quill_types::models::Blog;
use quill_types::page::page_index;
use serde_json::json;

use crate::error::ApiError;
use crate::markup::{render_markdown, text_to_html};
use crate::middleware::CurrentUser;
use crate::reply::Reply;
use crate::session::COOKIE_NAME;
use crate::state::AppState;

/// `Set-Cookie` parts for the session cookie. Max-age 0 clears it.
pub fn session_cookie(token: &str, max_age: i64) -> [(HeaderName, String); 1] {
    [(
        header::SET_COOKIE,
        format!("{COOKIE_NAME}={token}; Max-Age={max_age}; Path=/; HttpOnly"),
    )]
}

fn page_context(user: &Option<quill_types::models::User>) -> tera::Context {
    let mut context = tera::Context::new();
    context.insert("user", user);
    context
}

pub async fn index(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Reply, ApiError> {
    let db = state.clone();
    let blogs = tokio::task::spawn_blocking(move || db.db.latest_blogs()).await??;

    let mut context = page_context(&user);
    context.insert("blogs", &blogs);
    Ok(Reply::rendered("blogs.html", context))
}

pub async fn blog_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Reply, ApiError> {
    let db = state.clone();
    let blog_id = id.clone();
    let (blog, comments) = tokio::task::spawn_blocking(move || {
        let blog = db.db.find_by_id::<Blog>(&blog_id)?;
        let comments = db.db.comments_for_blog(&blog_id)?;
        anyhow::Ok((blog, comments))
    })
    .await??;

    let blog = blog.ok_or_else(|| ApiError::NotFound(format!("blog {id} not found")))?;

    let comment_views: Vec<serde_json::Value> = comments
        .iter()
        .map(|c| {
            let mut value = serde_json::to_value(c).unwrap_or_else(|_| json!({}));
            value["html_content"] = json!(text_to_html(&c.content));
            value
        })
        .collect();

    let mut context = page_context(&user);
    context.insert("blog", &blog);
    context.insert("blog_html", &render_markdown(&blog.content));
    context.insert("comments", &comment_views);
    Ok(Reply::rendered("blog.html", context))
}

pub async fn register_page(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Reply, ApiError> {
    Ok(Reply::rendered("register.html", page_context(&user)))
}

pub async fn signin_page(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Reply, ApiError> {
    Ok(Reply::rendered("signin.html", page_context(&user)))
}

/// Clear the session cookie and bounce back to the referring page.
pub async fn signout(headers: HeaderMap) -> ([(HeaderName, String); 1], Reply) {
    let target = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("/")
        .to_string();
    (
        session_cookie("-deleted-", 0),
        Reply::Redirect(target),
    )
}

pub async fn manage_blogs(
    Query(query): Query<HashMap<String, String>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Reply, ApiError> {
    let mut context = page_context(&user);
    context.insert("page_index", &page_index(query.get("page").map(String::as_str)));
    Ok(Reply::rendered("manage_blogs.html", context))
}

pub async fn manage_create_blog(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Reply, ApiError> {
    let mut context = page_context(&user);
    context.insert("id", "");
    context.insert("action", "/api/blogs");
    Ok(Reply::rendered("manage_blog_edit.html", context))
}
