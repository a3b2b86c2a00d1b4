use crate::models::{CreatePost, Post, UpdatePost};
use crate::services::{posts, PostError};
use crate::web::error::AppResult;
use crate::web::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;

fn make_admin_context(state: &AppState) -> Context {
    let mut ctx = Context::new();
    ctx.insert("site", &state.config.site);
    ctx
}

pub async fn posts(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let posts = posts::list_posts(&state.db)?;

    let mut ctx = make_admin_context(&state);
    ctx.insert("posts", &posts);

    let html = state.templates.render("admin/index.html", &ctx)?;
    Ok(Html(html))
}

#[derive(Deserialize)]
pub struct PostForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

fn render_form(
    state: &AppState,
    post: Option<&Post>,
    title: &str,
    content: &str,
    error: Option<String>,
) -> AppResult<Html<String>> {
    let mut ctx = make_admin_context(state);
    ctx.insert("post", &post);
    ctx.insert("title", title);
    ctx.insert("content", content);
    ctx.insert("is_new", &post.is_none());
    ctx.insert("error", &error);

    let html = state.templates.render("admin/form.html", &ctx)?;
    Ok(Html(html))
}

pub async fn new_post(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    render_form(&state, None, "", "", None)
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PostForm>,
) -> AppResult<Response> {
    let input = CreatePost {
        title: form.title.clone(),
        content: form.content.clone(),
    };

    match posts::create_post(&state.db, input) {
        Ok(post) => {
            tracing::info!("Created post '{}'", post.slug);
            Ok(Redirect::to("/admin").into_response())
        }
        Err(PostError::Validation(msg)) => Ok(render_form(
            &state,
            None,
            &form.title,
            &form.content,
            Some(msg),
        )?
        .into_response()),
        Err(err) => Err(err.into()),
    }
}

pub async fn edit_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    match posts::get_post_by_slug(&state.db, &slug)? {
        Some(post) => {
            let form = render_form(&state, Some(&post), &post.title, &post.content, None)?;
            Ok(form.into_response())
        }
        None => {
            let ctx = make_admin_context(&state);
            let html = state.templates.render("public/404.html", &ctx)?;
            Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
        }
    }
}

pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Form(form): Form<PostForm>,
) -> AppResult<Response> {
    let input = UpdatePost {
        title: form.title.clone(),
        content: form.content.clone(),
    };

    match posts::update_post(&state.db, &slug, input) {
        Ok(post) => {
            tracing::info!("Updated post '{}'", post.slug);
            Ok(Redirect::to("/admin").into_response())
        }
        Err(PostError::NotFound) => {
            let ctx = make_admin_context(&state);
            let html = state.templates.render("public/404.html", &ctx)?;
            Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
        }
        Err(PostError::Validation(msg)) => {
            let post = posts::get_post_by_slug(&state.db, &slug)?;
            Ok(render_form(
                &state,
                post.as_ref(),
                &form.title,
                &form.content,
                Some(msg),
            )?
            .into_response())
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    match posts::delete_post(&state.db, &slug) {
        Ok(()) => {
            tracing::info!("Deleted post '{}'", slug);
            Ok(Redirect::to("/admin").into_response())
        }
        Err(PostError::NotFound) => {
            let ctx = make_admin_context(&state);
            let html = state.templates.render("public/404.html", &ctx)?;
            Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}
