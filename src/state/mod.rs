//! Crawl-run state
//!
//! The frontier queue, visited set, and content-hash index are owned
//! exclusively by the crawl coordinator; other components report results
//! and the coordinator applies the state transitions.

mod dedup;
mod frontier;

pub use dedup::{content_hash, DedupIndex};
pub use frontier::Frontier;
