//! Filesystem primitives for placing data packs in a content store.
//!
//! - [`copy_then_remove`]: promote a verified temp file into the store,
//!   tolerating source and destination on different volumes.
//! - [`atomic_write`]: replace small metadata documents without torn reads.
//! - [`remove_if_exists`]: idempotent cleanup of `.temp` leftovers.

mod error;
mod primitives;

pub use error::{Error, Result};
pub use primitives::{
    AtomicWriteOptions, PromoteOptions, atomic_read, atomic_write, copy_then_remove, ensure_dir, is_same_file,
    remove_if_exists, reserve,
};
