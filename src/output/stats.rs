//! Run statistics

use crate::record::PageRecord;
use serde::{Deserialize, Serialize};

/// Summary statistics for one crawl run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlStats {
    /// Accepted records in the corpus
    pub total_pages: usize,

    /// Sum of word counts across accepted records
    pub total_words: usize,

    /// URLs dequeued and processed, whether or not they produced a record
    pub urls_visited: usize,

    /// Mean words per accepted record; 0 when nothing was accepted
    pub average_words_per_page: f64,
}

impl CrawlStats {
    /// Computes statistics from the accumulated records of a run
    pub fn from_run(records: &[PageRecord], urls_visited: usize) -> Self {
        let total_words: usize = records.iter().map(|r| r.word_count).sum();
        let average_words_per_page = if records.is_empty() {
            0.0
        } else {
            total_words as f64 / records.len() as f64
        };

        Self {
            total_pages: records.len(),
            total_words,
            urls_visited,
            average_words_per_page,
        }
    }
}

/// Prints a run summary to stdout
pub fn print_stats(stats: &CrawlStats) {
    println!("=== Crawl Summary ===");
    println!("  Pages collected:  {}", stats.total_pages);
    println!("  Total words:      {}", stats.total_words);
    println!("  URLs visited:     {}", stats.urls_visited);
    println!(
        "  Avg words/page:   {:.1}",
        stats.average_words_per_page
    );
}
