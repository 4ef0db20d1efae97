use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error while processing {}: {source}", .path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("invalid model: {0}")]
    InvalidModel(String),
    /// Decoding needs at least one token.
    #[error("cannot decode an empty token sequence")]
    EmptySequence,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a json object in {0:?}")]
    NotAnObject(PathBuf),
}

impl Error {
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }
}
