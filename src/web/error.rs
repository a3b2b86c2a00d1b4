use crate::services::PostError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

/// Error wrapper for the JSON API. Service outcomes map onto status
/// codes here; storage details are logged, never exposed.
pub struct ApiError(PostError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            PostError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            PostError::NotFound => (StatusCode::NOT_FOUND, "Post not found".to_string()),
            PostError::Conflict => (StatusCode::CONFLICT, self.0.to_string()),
            PostError::Storage(err) => {
                tracing::error!("Storage error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        Self(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Error wrapper for the HTML-rendering handlers: anything that escapes
/// them is a 500.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Application error: {:?}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
