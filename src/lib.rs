//! Lectern: a polite single-site corpus crawler
//!
//! This crate crawls the public pages of one web site (breadth-first, within
//! a page budget), extracts the main content of each page, deduplicates by
//! content hash, and writes JSON page records for a downstream
//! chunking/indexing pipeline.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;
pub mod robots;
pub mod state;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors for Lectern operations
///
/// Per-page failures are never fatal; they are represented by [`FetchError`]
/// and [`RenderError`] and recovered inside the crawl loop. This enum covers
/// the conditions that abort a run: bad configuration, output locations that
/// cannot be prepared, and final artifact writes.
#[derive(Debug, Error)]
pub enum LecternError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to prepare output location {}: {source}", .path.display())]
    OutputSetup {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {message}")]
    Var { name: String, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// A failed static fetch
///
/// Always recovered locally: the fetch strategy treats any of these as "no
/// content" for the page and the loop moves on. Nothing is retried within a
/// run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),
}

/// A failed rendered fetch
///
/// Recovered locally: the strategy falls back to whatever the static fetch
/// produced, possibly nothing.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Page load timed out after {0}s")]
    NavigationTimeout(u64),

    #[error("Browser error: {0}")]
    Driver(#[from] chromiumoxide::error::CdpError),

    #[error("No browser session available")]
    Unavailable,
}

/// Result type alias for Lectern operations
pub type Result<T> = std::result::Result<T, LecternError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::record::{PageRecord, MIN_CONTENT_WORDS};
pub use crate::url::{normalize_url, same_domain};
