//! Pure naming rules shared by the fetcher and the installer.

mod naming;

pub use naming::{TEMP_SUFFIX, pack_file_name, temp_path_for};
