//! Configuration module
//!
//! Lectern is configured through the environment (every variable optional,
//! with defaults matching a polite crawl of a mid-sized site), optionally
//! overridden by CLI flags. See [`types`] for the variable list.

mod env;
mod types;
mod validation;

pub use env::from_env;
pub use types::{Config, CrawlConfig, FetchConfig, OutputConfig, RenderConfig};
pub use validation::validate;

use crate::ConfigResult;

/// Loads configuration from the environment and validates it
pub fn load_config() -> ConfigResult<Config> {
    let config = from_env()?;
    validate(&config)?;
    Ok(config)
}
