//! Error types for datapack-fetch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid source URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("network error: {0}")]
    Network(String),

    #[error(
        "integrity check failed: expected SHA-256 {expected}, got {actual}. \
         The download may be corrupted, please try again."
    )]
    Integrity { expected: String, actual: String },

    #[error("download cancelled")]
    Cancelled,

    #[error("file I/O error on {path}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    pub fn is_integrity(&self) -> bool { matches!(self, FetchError::Integrity { .. }) }

    pub fn is_cancelled(&self) -> bool { matches!(self, FetchError::Cancelled) }

    pub(crate) fn io(path: &std::path::Path) -> impl FnOnce(io::Error) -> FetchError {
        let path = path.to_path_buf();
        move |source| FetchError::Io { path, source }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
