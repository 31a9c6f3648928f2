//! Hash policy and SHA-256 digests of media files.

use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::ReleaseError;

/// How the configured size threshold maps to a hashing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashPolicy {
    /// Hash every file (threshold `0`).
    Always,
    /// Never hash (negative threshold).
    Never,
    /// Hash files no larger than this many bytes.
    UpTo(u64),
}

impl From<i64> for HashPolicy {
    fn from(max_size: i64) -> Self {
        match max_size {
            0 => HashPolicy::Always,
            n if n < 0 => HashPolicy::Never,
            n => HashPolicy::UpTo(n as u64),
        }
    }
}

/// Outcome of [`should_hash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashDecision {
    pub hash: bool,
    /// Size seen while deciding; `None` when the policy needed no stat.
    pub file_size: Option<u64>,
}

/// Decides whether `path` should be hashed under `max_size`.
///
/// Only the size-limited policy touches the filesystem, so only it can fail.
pub fn should_hash(path: &Path, max_size: i64) -> std::io::Result<HashDecision> {
    match HashPolicy::from(max_size) {
        HashPolicy::Always => Ok(HashDecision {
            hash: true,
            file_size: None,
        }),
        HashPolicy::Never => Ok(HashDecision {
            hash: false,
            file_size: None,
        }),
        HashPolicy::UpTo(limit) => {
            let size = std::fs::metadata(path)?.len();
            Ok(HashDecision {
                hash: size <= limit,
                file_size: Some(size),
            })
        }
    }
}

/// Streams a file through SHA-256 and returns the lowercase hex digest.
pub fn calculate_sha256(path: &Path) -> Result<String, ReleaseError> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
