//! Manifest digesting for mutation detection.
//!
//! Digests taken immediately before and after a job are the runner's
//! evidence of whether the tool touched the manifest: a dry-run must
//! leave them equal, and an apply against an already-minimal manifest
//! must too.

use std::path::Path;

use sha2::{Digest, Sha256};

use trimgate_core::ManifestDigest;

/// Compute the SHA-256 digest of a byte buffer.
///
/// # Complexity
/// O(n) in the buffer length.
#[must_use]
pub fn digest_bytes(bytes: &[u8]) -> ManifestDigest {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    ManifestDigest::new(hasher.finalize().into())
}

/// Read `path` and digest its contents.
///
/// # Errors
/// Propagates the underlying I/O error if the file cannot be read.
pub async fn digest_file(path: &Path) -> Result<ManifestDigest, std::io::Error> {
    let bytes = tokio::fs::read(path).await?;
    Ok(digest_bytes(&bytes))
}
