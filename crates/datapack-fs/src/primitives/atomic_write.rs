use crate::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

const TMP_PREFIX: &str = ".";
const TMP_SUFFIX: &str = ".tmp";

#[derive(Clone, Copy, Debug)]
pub struct AtomicWriteOptions {
    sync: bool,
}

impl Default for AtomicWriteOptions {
    fn default() -> Self { Self::new() }
}

impl AtomicWriteOptions {
    pub fn new() -> Self {
        Self { sync: true }
    }

    /// Whether to fsync the temp file before the rename.
    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }
}

/// Write `content` to a sibling temp file, then rename it over `path`.
///
/// Readers observe either the old file or the complete new one.
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8], options: AtomicWriteOptions) -> Result<()> {
    let path = path.as_ref();
    let parent = path.parent().ok_or_else(|| Error::NoParent(path.to_path_buf()))?;
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let tmp_path = parent.join(format!("{TMP_PREFIX}{file_name}{TMP_SUFFIX}"));

    let write = |tmp: &Path| -> std::io::Result<()> {
        let mut file = fs::File::create(tmp)?;
        file.write_all(content)?;
        if options.sync {
            file.sync_all()?;
        }
        Ok(())
    };

    write(&tmp_path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        Error::Write {
            path: tmp_path.clone(),
            source: e,
        }
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        Error::Write {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

pub fn atomic_read(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        atomic_write(&path, b"hello world", AtomicWriteOptions::new()).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"hello world");
        assert!(!dir.path().join(".state.json.tmp").exists());
    }

    #[test]
    fn test_atomic_write_replaces_without_sync() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, b"old").unwrap();
        atomic_write(&path, b"data", AtomicWriteOptions::new().sync(false)).unwrap();
        assert_eq!(atomic_read(&path).unwrap(), b"data");
    }

    #[test]
    fn test_atomic_read_missing() {
        let dir = tempdir().unwrap();
        let err = atomic_read(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
