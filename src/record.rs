//! Page record data model
//!
//! A [`PageRecord`] is one accepted page of the corpus. Records are created
//! by the content extractor, immutable afterwards, and serialized both to
//! per-page JSON files and to the aggregate array consumed by the chunking
//! pipeline.

use serde::{Deserialize, Serialize};

/// Minimum number of words for a page to be accepted into the corpus.
///
/// Pages below this are treated as non-content (menus, stubs, redirect
/// shells) and are neither stored nor hashed.
pub const MIN_CONTENT_WORDS: usize = 30;

/// One discovered, accepted page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Canonical URL, unique key within a run
    pub url: String,

    /// Page title, may be empty
    pub title: String,

    /// Meta description (or Open Graph description), may be empty
    pub description: String,

    /// Normalized plain text of the main content region
    pub content: String,

    /// Number of whitespace-separated words in `content`
    pub word_count: usize,
}

impl PageRecord {
    /// Builds a record from extracted parts, deriving the word count
    pub fn new(url: String, title: String, description: String, content: String) -> Self {
        let word_count = content.split_whitespace().count();
        Self {
            url,
            title,
            description,
            content,
            word_count,
        }
    }

    /// Whether this record meets the minimum-content invariant
    pub fn meets_minimum(&self) -> bool {
        self.word_count >= MIN_CONTENT_WORDS
    }
}
