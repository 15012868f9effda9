// GoNext Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoNextError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported on this platform: {0}")]
    Unsupported(&'static str),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for GoNextError {
    fn from(err: anyhow::Error) -> Self {
        GoNextError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GoNextError>;
