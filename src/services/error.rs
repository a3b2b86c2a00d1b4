use thiserror::Error;

/// Outcome classification for every post operation. The web layer maps
/// these onto status codes and never inspects storage errors itself.
#[derive(Debug, Error)]
pub enum PostError {
    /// Missing or empty title/content, an over-long title, or a title
    /// that strips down to an empty slug.
    #[error("{0}")]
    Validation(String),

    #[error("post not found")]
    NotFound,

    /// Two concurrent writes resolved to the same slug and the retry
    /// also lost the race.
    #[error("slug is already in use")]
    Conflict,

    #[error("storage failure: {0}")]
    Storage(#[source] anyhow::Error),
}

impl From<rusqlite::Error> for PostError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.into())
    }
}

impl From<r2d2::Error> for PostError {
    fn from(err: r2d2::Error) -> Self {
        Self::Storage(err.into())
    }
}

pub type PostResult<T> = Result<T, PostError>;
