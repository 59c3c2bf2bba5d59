use std::path::{Path, PathBuf};

use crate::{Result, VerificationError, digests_match, hash_file};

/// A file whose SHA-256 digest has been checked against an expected value.
///
/// Only constructed through a successful comparison, so holding one is proof
/// the bytes at `path` matched when the check ran.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedFile {
    path:   PathBuf,
    sha256: String,
    size:   u64,
}

impl VerifiedFile {
    /// Accept a digest computed while the file was written.
    pub fn check(path: impl Into<PathBuf>, size: u64, expected: &str, actual: String) -> Result<Self> {
        if !digests_match(expected, &actual) {
            return Err(VerificationError::Mismatch {
                expected: expected.to_string(),
                actual,
            });
        }
        Ok(Self {
            path: path.into(),
            sha256: actual,
            size,
        })
    }

    /// Hash the file at `path` and compare it with `expected`.
    pub fn hash(path: impl Into<PathBuf>, expected: &str) -> Result<Self> {
        let path = path.into();
        let (actual, size) = hash_file(&path)?;
        Self::check(path, size, expected, actual)
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Uppercase hex digest of the verified bytes.
    pub fn sha256(&self) -> &str { &self.sha256 }

    pub fn size(&self) -> u64 { self.size }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_rejects_mismatch() {
        let err = VerifiedFile::check("x", 1, "AB", "CD".into()).unwrap_err();
        assert!(matches!(err, VerificationError::Mismatch { .. }));
    }

    #[test]
    fn test_hash_verifies_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pack.zip");
        std::fs::write(&path, b"hello world").unwrap();

        let verified = VerifiedFile::hash(
            &path,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9",
        )
        .unwrap();

        assert_eq!(verified.path(), path.as_path());
        assert_eq!(verified.size(), 11);
        assert_eq!(
            verified.sha256(),
            "B94D27B9934D3E08A52E52D7DA7DABFAC484EFE37A5380EE9088F7ACE2EFCDE9"
        );
    }
}
