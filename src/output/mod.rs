//! Output artifacts
//!
//! Three JSON artifacts per run: one file per accepted page (written as the
//! crawl progresses), the aggregate array of all records, and the run
//! statistics object. The aggregate and stats are written at finish,
//! including early-termination and error exits.

pub mod stats;

pub use stats::{print_stats, CrawlStats};

use crate::config::OutputConfig;
use crate::record::PageRecord;
use crate::{LecternError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum length of a per-page filename key (before the `.json` suffix)
const MAX_KEY_LEN: usize = 200;

/// Writer for the run's JSON artifacts
#[derive(Debug)]
pub struct OutputWriter {
    pages_dir: PathBuf,
    aggregate_path: PathBuf,
    stats_path: PathBuf,
}

impl OutputWriter {
    /// Creates the writer, preparing all output locations
    ///
    /// Failure here is fatal: a run that cannot persist anything should not
    /// start fetching.
    pub fn new(config: &OutputConfig) -> Result<Self> {
        ensure_dir(&config.pages_dir)?;
        if let Some(parent) = config.aggregate_path.parent() {
            ensure_dir(parent)?;
        }
        if let Some(parent) = config.stats_path.parent() {
            ensure_dir(parent)?;
        }

        Ok(Self {
            pages_dir: config.pages_dir.clone(),
            aggregate_path: config.aggregate_path.clone(),
            stats_path: config.stats_path.clone(),
        })
    }

    /// Writes one accepted record to its own file
    pub fn save_page(&self, record: &PageRecord) -> Result<()> {
        let path = self
            .pages_dir
            .join(format!("{}.json", page_file_key(&record.url)));
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json)?;
        Ok(())
    }

    /// Writes the aggregate array of all accepted records
    pub fn write_aggregate(&self, records: &[PageRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.aggregate_path, json)?;
        tracing::info!(
            "Wrote {} records to {}",
            records.len(),
            self.aggregate_path.display()
        );
        Ok(())
    }

    /// Writes the run statistics object
    pub fn write_stats(&self, stats: &CrawlStats) -> Result<()> {
        let json = serde_json::to_string_pretty(stats)?;
        fs::write(&self.stats_path, json)?;
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|source| LecternError::OutputSetup {
        path: path.to_path_buf(),
        source,
    })
}

/// Derives a filesystem-safe filename key from a record URL
///
/// `://` becomes `_`, path separators become `__`, and the result is
/// truncated to a bounded length so deep URLs cannot overflow filename
/// limits.
pub fn page_file_key(url: &str) -> String {
    url.replace("://", "_")
        .replace('/', "__")
        .chars()
        .take(MAX_KEY_LEN)
        .collect()
}
