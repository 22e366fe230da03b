//! Content-addressed cache entry key generation.

use sha2::{Digest, Sha256};

/// Compute a content-addressed key for a cached response.
///
/// The key covers the bucket name so the same URL cached under two cache
/// generations never collides.
pub fn compute_entry_key(bucket: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bucket.as_bytes());
    hasher.update(b"\n");
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}
