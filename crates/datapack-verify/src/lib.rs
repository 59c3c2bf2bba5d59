//! Content verification primitives for downloaded data packs.
//!
//! Provides incremental SHA-256 hashing so a pack can be verified while it
//! streams to disk, plus the hex conventions used on content records:
//! digests are rendered uppercase and compared case-insensitively.
//!
//! # Example
//!
//! ```
//! use std::io::Read;
//! use datapack_verify::{Sha256Hasher, VerifiedReader, to_hex_upper};
//!
//! let data = b"hello world";
//! let expected = to_hex_upper(&Sha256Hasher::digest(data));
//!
//! let mut reader = VerifiedReader::new(&data[..], Sha256Hasher::new());
//! let mut buffer = Vec::new();
//! reader.read_to_end(&mut buffer).unwrap();
//!
//! reader.finish(&expected).unwrap();
//! ```

pub use self::error::{Result, VerificationError};
pub use self::hasher::{Hasher, Sha256Hasher, digests_match, to_hex_upper};
pub use self::reader::{VerifiedReader, hash_file};
pub use self::verified::VerifiedFile;

mod error;
mod hasher;
mod reader;
mod verified;
