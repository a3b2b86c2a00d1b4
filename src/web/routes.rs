use super::handlers;
use super::state::AppState;
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::sync::Arc;

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/posts", get(handlers::api::list_posts))
        .route("/api/posts", post(handlers::api::create_post))
        .route("/api/posts/:slug", get(handlers::api::get_post))
        .route("/api/posts/:slug", put(handlers::api::update_post))
        .route("/api/posts/:slug", delete(handlers::api::delete_post))
}

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::public::index))
        .route("/posts/:slug", get(handlers::public::post))
        .route("/static/bundle.css", get(handlers::public::stylesheet))
}

pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin", get(handlers::admin::posts))
        .route("/admin/posts/new", get(handlers::admin::new_post))
        .route("/admin/posts", post(handlers::admin::create_post))
        .route("/admin/posts/:slug/edit", get(handlers::admin::edit_post))
        .route("/admin/posts/:slug", post(handlers::admin::update_post))
        .route(
            "/admin/posts/:slug/delete",
            post(handlers::admin::delete_post),
        )
}
