//! Content source error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or querying content.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Invalid JSON in `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("Content directory `{0}` does not exist")]
    MissingDir(PathBuf),

    #[error("Failed to walk content directory")]
    Walk(#[from] walkdir::Error),

    #[error("Unknown cursor `{0}`")]
    UnknownCursor(String),
}
