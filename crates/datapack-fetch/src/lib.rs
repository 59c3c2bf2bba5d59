//! Mirror resolution and streaming, digest-verified HTTP downloads.
//!
//! # Architecture
//!
//! - [`data`] - options, progress, and mirror descriptions
//! - [`core`] - pure naming rules for pack files
//! - [`effects`] - the HTTP seam and the verifying fetcher
//!
//! A download is streamed to a `.temp` file while its SHA-256 digest is
//! computed; the caller receives a [`VerifiedFile`] only when the digest
//! matches. Retry across mirrors is the caller's policy.

pub mod core;
pub mod data;
pub mod effects;
mod error;
pub mod mock;

pub use crate::core::{TEMP_SUFFIX, pack_file_name, temp_path_for};
pub use data::{DownloadDetails, DownloadSource, FetchOptions, FetchPhase, Progress};
pub use datapack_verify::VerifiedFile;
pub use effects::{BoxStream, Fetcher, HttpBody, HttpClient};
pub use error::{FetchError, Result};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use tokio_util::sync::CancellationToken;
