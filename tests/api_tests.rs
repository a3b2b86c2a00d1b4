use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use minipress::web::AppState;
use minipress::{web, Config, Database};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tower::util::ServiceExt;

static DB_COUNTER: AtomicU32 = AtomicU32::new(0);

fn test_app() -> Router {
    let id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    let db = Database::open_memory(&format!("api_test_db_{}", id)).unwrap();
    db.migrate().unwrap();

    let config: Config = toml::from_str(
        r#"
[site]
title = "Test Blog"
description = "A test blog"
url = "http://localhost:3000"

[database]
path = "unused.db"
"#,
    )
    .unwrap();

    let state = AppState::new(config, db).unwrap();
    web::app(Arc::new(state))
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_create_and_fetch_post() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/posts",
            serde_json::json!({"title": "My First Post", "content": "<p>Hi</p>"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    assert_eq!(created["slug"], "my-first-post");
    assert_eq!(created["title"], "My First Post");
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let response = app
        .oneshot(get_request("/api/posts/my-first-post"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let fetched = response_json(response).await;
    assert_eq!(fetched["slug"], "my-first-post");
    assert_eq!(fetched["content"], "<p>Hi</p>");
}

#[tokio::test]
async fn test_create_post_missing_fields() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/posts",
            serde_json::json!({"title": "No Content"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["error"].is_string());

    let response = app
        .oneshot(json_request("POST", "/api/posts", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_post_unusable_title() {
    let app = test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/posts",
            serde_json::json!({"title": "!!!", "content": "<p>x</p>"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_posts_sorted() {
    let app = test_app();

    for title in ["First", "Second", "Third"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/posts",
                serde_json::json!({"title": title, "content": "<p>x</p>"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(get_request("/api/posts")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let listed = response_json(response).await;
    let slugs: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn test_get_missing_post() {
    let app = test_app();

    let response = app.oneshot(get_request("/api/posts/missing")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Post not found");
}

#[tokio::test]
async fn test_update_post_changes_slug_when_base_changes() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/posts",
            serde_json::json!({"title": "My First Post", "content": "<p>Hi</p>"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/posts/my-first-post",
            serde_json::json!({"title": "My First Post (Updated)!", "content": "<p>Hi</p>"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated = response_json(response).await;
    assert_eq!(updated["slug"], "my-first-post-updated");

    // The old permalink is gone, the new one resolves.
    let response = app
        .clone()
        .oneshot(get_request("/api/posts/my-first-post"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(get_request("/api/posts/my-first-post-updated"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_missing_post() {
    let app = test_app();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/posts/missing",
            serde_json::json!({"title": "Title", "content": "<p>x</p>"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_post() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/posts",
            serde_json::json!({"title": "Doomed", "content": "<p>x</p>"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/posts/doomed")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Post deleted successfully");

    let response = app
        .oneshot(get_request("/api/posts/doomed"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_post() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/posts/missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_pages_render() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/posts",
            serde_json::json!({"title": "Readable", "content": "<p>Body text</p>"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.clone().oneshot(get_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Readable"));
    assert!(html.contains("/posts/readable"));

    let response = app
        .clone()
        .oneshot(get_request("/posts/readable"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Body text"));

    let response = app.oneshot(get_request("/posts/missing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_rendering_sanitizes_content() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/posts",
            serde_json::json!({
                "title": "Spicy",
                "content": "<p>ok</p><script>alert(1)</script>"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Stored verbatim, visible through the API...
    let response = app
        .clone()
        .oneshot(get_request("/api/posts/spicy"))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert!(body["content"].as_str().unwrap().contains("<script>"));

    // ...but stripped from the rendered page.
    let response = app.oneshot(get_request("/posts/spicy")).await.unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("<p>ok</p>"));
}

#[tokio::test]
async fn test_admin_pages_render() {
    let app = test_app();

    let response = app.clone().oneshot(get_request("/admin")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/admin/posts/new"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/posts")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("title=Form+Post&content=%3Cp%3Ehello%3C%2Fp%3E"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .oneshot(get_request("/api/posts/form-post"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
