use crate::{Error, Result, ensure_dir};
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Clone, Copy, Debug)]
pub struct PromoteOptions {
    keep_source: bool,
}

impl Default for PromoteOptions {
    fn default() -> Self { Self::new() }
}

impl PromoteOptions {
    pub fn new() -> Self { Self { keep_source: false } }

    /// Leave the source file in place after copying.
    pub fn keep_source(mut self, keep_source: bool) -> Self {
        self.keep_source = keep_source;
        self
    }
}

/// Whether both paths resolve to the same existing file.
pub fn is_same_file(a: impl AsRef<Path>, b: impl AsRef<Path>) -> bool {
    match (a.as_ref().canonicalize(), b.as_ref().canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Create `path` empty, failing quietly if it already exists.
///
/// Returns whether the file was created. Used to claim a name before
/// copying into it, so two writers never pick the same destination.
pub fn reserve(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(source) => Err(Error::Write {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Copy `src` to `dest`, then remove `src`.
///
/// A plain copy is used instead of `rename` so the source may live on a
/// different volume than the destination. Between the copy and the removal
/// both files exist. If the copy fails, a partially written `dest` is removed.
/// When `src` already is `dest`, nothing is copied or removed.
/// Returns the size of `dest`.
pub fn copy_then_remove(src: impl AsRef<Path>, dest: impl AsRef<Path>, options: PromoteOptions) -> Result<u64> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    if is_same_file(src, dest) {
        tracing::debug!(path = %dest.display(), "file already in place");
        return std::fs::metadata(dest).map(|m| m.len()).map_err(|e| Error::Read {
            path:   dest.to_path_buf(),
            source: e,
        });
    }

    if let Some(parent) = dest.parent() {
        ensure_dir(parent)?;
    }

    let copied = std::fs::copy(src, dest).map_err(|e| {
        let _ = std::fs::remove_file(dest);
        Error::Copy {
            from:   src.to_path_buf(),
            to:     dest.to_path_buf(),
            source: e,
        }
    })?;

    if !options.keep_source {
        std::fs::remove_file(src).map_err(|e| Error::Remove {
            path:   src.to_path_buf(),
            source: e,
        })?;
    }

    tracing::debug!(from = %src.display(), to = %dest.display(), bytes = copied, "promoted file");
    Ok(copied)
}
