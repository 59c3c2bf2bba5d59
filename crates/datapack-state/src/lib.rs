//! Content record model and metadata store contract.
//!
//! The install pipeline treats the catalog database as an external
//! collaborator reached through [`MetadataStore`]. Two stores ship with the
//! crate: [`MemoryStore`] for embedding and tests, [`JsonStore`] for the
//! command-line tool.

mod error;
mod json;
mod memory;
mod record;
mod store;
mod timestamp;

pub use error::{Result, StateError};
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use record::{CatalogEntry, ContentRecord, DEFAULT_PACK_TITLE, LaunchOverrides, RecordId};
pub use store::MetadataStore;
pub use timestamp::parse_timestamp;
