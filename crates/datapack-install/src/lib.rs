//! Data pack installation with mirror fallback.
//!
//! [`PackInstaller`] downloads a pack from the first working mirror, checks
//! its SHA-256 digest, copies it into the content store under a stable name,
//! and records it as present. Metadata writes from concurrent installs are
//! serialized through a shared [`WriteQueue`], and [`InstallEvents`]
//! listeners are told once the write has landed.
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use datapack_fetch::{DownloadSource, ReqwestClient};
//! use datapack_install::{InstallOptions, PackInstaller, WriteQueue};
//! use datapack_state::JsonStore;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(JsonStore::open("metadata.json")?);
//! let installer = PackInstaller::new(ReqwestClient::new()?, store);
//! let sources = [DownloadSource::new("Primary", "https://packs.example.net/")];
//! let options = InstallOptions::default().write_queue(WriteQueue::new());
//!
//! let record = installer
//!     .install_content_pack("entry-1", Path::new("Data/Packs"), &sources, &options)
//!     .await?;
//! println!("installed {:?}", record.path);
//! # Ok(())
//! # }
//! ```

mod error;
mod events;
mod installer;
mod pipeline;
mod queue;

pub use error::{AttemptError, InstallError, NO_WORKING_SOURCES, PlaceError, Result, SourceFailure};
pub use events::{InstallEvents, InstallListener, ListenerId};
pub use installer::{Installer, PlacedPack};
pub use pipeline::{ImportOptions, InstallOptions, PackInstaller};
pub use queue::{JobHandle, QueueError, WriteQueue};
