use std::fmt;
use std::path::PathBuf;

use datapack_fetch::{DownloadSource, FetchError};
use datapack_state::{RecordId, StateError};
use thiserror::Error;

use crate::queue::QueueError;

/// Headline of the error raised when every mirror failed.
pub const NO_WORKING_SOURCES: &str = "No working sources found for this data pack.";

/// Failure to copy a verified file into the content store.
#[derive(Debug, Error)]
pub enum PlaceError {
    #[error(transparent)]
    Fs(#[from] datapack_fs::Error),

    #[error("background task failed: {0}")]
    Task(String),
}

/// Why one mirror attempt failed. Never fatal on its own.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to place pack in content store: {0}")]
    Place(#[from] PlaceError),
}

#[derive(Debug)]
pub struct SourceFailure {
    pub source: DownloadSource,
    pub error:  AttemptError,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}: {}", self.source.name, self.error) }
}

fn exhausted_message(failures: &[SourceFailure]) -> String {
    let mut message = NO_WORKING_SOURCES.to_string();
    for failure in failures {
        message.push_str("\n\n");
        message.push_str(&failure.to_string());
    }
    message
}

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("no sources available")]
    NoSources,

    /// Every mirror failed; the message lists each one, a paragraph apiece.
    #[error("{}", exhausted_message(.0))]
    Exhausted(Vec<SourceFailure>),

    #[error("catalog entry {0:?} not found")]
    EntryNotFound(String),

    #[error("catalog entry {0:?} has no active data pack")]
    NoActiveData(String),

    #[error("content record {0} not found")]
    RecordNotFound(RecordId),

    #[error(
        "integrity check failed: expected SHA-256 {expected}, got {actual}. \
         The file may be corrupted."
    )]
    Integrity { expected: String, actual: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to place pack in content store: {0}")]
    Place(#[from] datapack_fs::Error),

    #[error("metadata update failed: {0}")]
    Metadata(#[from] StateError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("background task failed: {0}")]
    Task(String),
}

impl InstallError {
    /// Whether retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            InstallError::Exhausted(_)
            | InstallError::Place(_)
            | InstallError::Metadata(_)
            | InstallError::Queue(_)
            | InstallError::Task(_)
            | InstallError::Read { .. } => true,
            InstallError::NoSources
            | InstallError::EntryNotFound(_)
            | InstallError::NoActiveData(_)
            | InstallError::RecordNotFound(_)
            | InstallError::Integrity { .. } => false,
        }
    }

    /// Per-mirror failures, when every mirror failed.
    pub fn source_failures(&self) -> &[SourceFailure] {
        match self {
            InstallError::Exhausted(failures) => failures,
            _ => &[],
        }
    }
}

impl From<PlaceError> for InstallError {
    fn from(e: PlaceError) -> Self {
        match e {
            PlaceError::Fs(e) => InstallError::Place(e),
            PlaceError::Task(e) => InstallError::Task(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, InstallError>;
