//! Immutable data types for fetch operations.

pub mod options;
pub mod progress;
pub mod sources;

pub use options::{FetchOptions, FetchPhase};
pub use progress::{DownloadDetails, Progress};
pub use sources::DownloadSource;
