use serde::{Deserialize, Serialize};

/// A published blog post. The slug is the public lookup key and is
/// unique across all posts; `content` is stored exactly as submitted
/// and sanitized by the rendering layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for POST /api/posts. Fields default to empty strings so a
/// missing field is reported as a validation failure instead of a
/// deserialization error.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Payload for PUT /api/posts/:slug. Both fields are required; the
/// slug is never supplied by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}
