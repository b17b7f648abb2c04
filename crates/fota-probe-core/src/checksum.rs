//! Checksums of a downloaded artifact.
//!
//! Computed after the transfer finishes, not inline with it.

use crate::error::{ProbeError, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Digests reported after a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDigest {
    /// SHA-256 as lowercase hex.
    pub sha256: String,
    /// Sum of every byte value; the checksum the firmware update tooling prints.
    pub byte_sum: u64,
    /// File size in bytes.
    pub size: u64,
}

/// Reads `path` once and computes both digests.
pub fn digest_path(path: &Path) -> Result<ArtifactDigest> {
    let mut f = File::open(path).map_err(|e| ProbeError::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut byte_sum = 0u64;
    let mut size = 0u64;
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = f.read(&mut buf).map_err(|e| ProbeError::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        byte_sum = buf[..n]
            .iter()
            .fold(byte_sum, |acc, b| acc.wrapping_add(u64::from(*b)));
        size += n as u64;
    }
    Ok(ArtifactDigest {
        sha256: hex::encode(hasher.finalize()),
        byte_sum,
        size,
    })
}
