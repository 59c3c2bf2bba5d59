use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("invalid timestamp {0:?}")]
    InvalidTimestamp(String),

    #[error("failed to parse metadata document {path}: {source}")]
    Parse {
        path:   PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode metadata document: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Fs(#[from] datapack_fs::Error),

    #[error("metadata store lock poisoned")]
    Poisoned,

    #[error("metadata backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StateError>;
