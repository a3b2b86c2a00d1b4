use crate::models::{CreatePost, Post, UpdatePost};
use crate::services::{posts, PostError};
use crate::web::error::ApiResult;
use crate::web::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use std::sync::Arc;

/// GET /api/posts
pub async fn list_posts(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Post>>> {
    let posts = posts::list_posts(&state.db)?;
    Ok(Json(posts))
}

/// GET /api/posts/:slug
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Post>> {
    let post = posts::get_post_by_slug(&state.db, &slug)?.ok_or(PostError::NotFound)?;
    Ok(Json(post))
}

/// POST /api/posts
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreatePost>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let post = posts::create_post(&state.db, input)?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /api/posts/:slug
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(input): Json<UpdatePost>,
) -> ApiResult<Json<Post>> {
    let post = posts::update_post(&state.db, &slug, input)?;
    Ok(Json(post))
}

/// DELETE /api/posts/:slug
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    posts::delete_post(&state.db, &slug)?;
    Ok(Json(serde_json::json!({
        "message": "Post deleted successfully"
    })))
}
