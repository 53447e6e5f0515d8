//! Cache key derivation.

use sha2::{Digest, Sha256};

/// Content address for a compile request: hex SHA-256 over the document
/// source, a NUL separator and the engine name.
///
/// Any change to the document or the engine yields a new key, so cached
/// artifacts never need explicit invalidation.
pub fn cache_key(source: &str, engine: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hasher.update([0u8]);
    hasher.update(engine.as_bytes());
    hex::encode(hasher.finalize())
}
