pub mod atomic_write;
pub mod cleanup;
pub mod promote;

pub use atomic_write::{AtomicWriteOptions, atomic_read, atomic_write};
pub use cleanup::{ensure_dir, remove_if_exists};
pub use promote::{PromoteOptions, copy_then_remove, is_same_file, reserve};
