use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Length of the truncated content digest in hex characters
const DIGEST_LEN: usize = 16;

/// Hashes normalized page content to a compact digest
///
/// SHA-256 truncated to 16 hex characters. The truncation trades collision
/// resistance for compactness; at corpus scale (hundreds to thousands of
/// pages) accidental collisions are negligible and nothing security-relevant
/// depends on the digest.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..DIGEST_LEN].to_string()
}

/// Content-hash set preventing duplicate pages from being stored twice
///
/// Dedup is strictly content-based: two URLs serving identical normalized
/// text collapse to the first-seen record.
#[derive(Debug, Default)]
pub struct DedupIndex {
    seen: HashSet<String>,
}

impl DedupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a digest; returns true the first time it is seen
    pub fn accept(&mut self, digest: &str) -> bool {
        self.seen.insert(digest.to_string())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
