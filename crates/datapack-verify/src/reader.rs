use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::{Hasher, Result, Sha256Hasher, VerificationError, digests_match, to_hex_upper};

/// Streaming reader that hashes data as it passes through.
pub struct VerifiedReader<R, H> {
    reader: R,
    hasher: H,
    bytes_read: u64,
}

impl<R, H> VerifiedReader<R, H> {
    pub fn new(reader: R, hasher: H) -> Self {
        Self {
            reader,
            hasher,
            bytes_read: 0,
        }
    }

    pub fn bytes_read(&self) -> u64 { self.bytes_read }
}

impl<R: Read, H: Hasher> Read for VerifiedReader<R, H> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        if n > 0 {
            self.hasher.update(&buf[..n]);
            self.bytes_read += n as u64;
        }
        Ok(n)
    }
}

impl<R: Read, H: Hasher> VerifiedReader<R, H> {
    /// Finalize against an expected hex digest and return the actual one.
    pub fn finish(self, expected: &str) -> Result<String> {
        let actual = to_hex_upper(&self.hasher.finalize());
        if digests_match(expected, &actual) {
            Ok(actual)
        } else {
            Err(VerificationError::Mismatch {
                expected: expected.to_string(),
                actual,
            })
        }
    }

    pub fn finish_hex(self) -> String { to_hex_upper(&self.hasher.finalize()) }
}

/// Digest of a file on disk, read in a single streaming pass.
///
/// Returns the uppercase hex digest and the number of bytes hashed.
pub fn hash_file(path: impl AsRef<Path>) -> Result<(String, u64)> {
    let file = File::open(path.as_ref())?;
    let mut reader = VerifiedReader::new(BufReader::new(file), Sha256Hasher::new());
    io::copy(&mut reader, &mut io::sink())?;
    let size = reader.bytes_read();
    Ok((reader.finish_hex(), size))
}
