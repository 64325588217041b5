//! Content fingerprinting.
//!
//! A fingerprint is the first 8 hex characters of the SHA-256 digest of a
//! file's byte content. Content-based rather than mtime-based so it survives
//! `git checkout` (which resets modification times) and is stable across
//! platforms. Eight hex characters (32 bits) is plenty for cache-busting —
//! the goal is that a changed file gets a new URL, not cryptographic
//! integrity.

use sha2::{Digest, Sha256};
use std::io;
use std::path::Path;

/// Number of hex characters kept from the digest.
pub const FINGERPRINT_LEN: usize = 8;

/// Fingerprint of a byte slice: first 8 hex chars of its SHA-256 digest.
///
/// Deterministic: the same bytes always produce the same fingerprint.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let hex = format!("{:x}", digest);
    hex[..FINGERPRINT_LEN].to_string()
}

/// Fingerprint of a file's current contents.
///
/// Read errors propagate — a file that vanishes or turns unreadable
/// mid-run aborts its pipeline step rather than producing a bogus entry.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(hash_bytes(&bytes))
}
