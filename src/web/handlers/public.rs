use crate::services::posts;
use crate::web::error::AppResult;
use crate::web::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;
use tera::Context;

fn make_context(state: &AppState) -> Context {
    let mut ctx = Context::new();
    ctx.insert("site", &state.config.site);
    ctx
}

pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let posts = posts::list_posts(&state.db)?;

    let mut ctx = make_context(&state);
    ctx.insert("posts", &posts);

    let html = state.templates.render("public/index.html", &ctx)?;
    Ok(Html(html))
}

pub async fn post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    match posts::get_post_by_slug(&state.db, &slug)? {
        Some(post) => {
            // Content is stored verbatim and sanitized here, at render time.
            let body_html = ammonia::clean(&post.content);

            let mut ctx = make_context(&state);
            ctx.insert("post", &post);
            ctx.insert("body_html", &body_html);

            let html = state.templates.render("public/post.html", &ctx)?;
            Ok(Html(html).into_response())
        }
        None => {
            let ctx = make_context(&state);
            let html = state.templates.render("public/404.html", &ctx)?;
            Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
        }
    }
}

pub async fn stylesheet(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let css = state.templates.render("css/bundle.css", &Context::new())?;
    Ok(([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css).into_response())
}
