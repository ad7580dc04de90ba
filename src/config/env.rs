use crate::config::types::Config;
use crate::{ConfigError, ConfigResult};
use std::fmt::Display;
use std::str::FromStr;

/// Builds a configuration from the process environment
///
/// Every variable is optional; unset variables keep their defaults. A set
/// but unparseable variable is an error rather than a silent fallback.
pub fn from_env() -> ConfigResult<Config> {
    from_lookup(|name| std::env::var(name).ok())
}

/// Builds a configuration from an arbitrary variable lookup
///
/// The lookup seam exists so tests can exercise parsing without mutating
/// the process environment.
pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Config> {
    let mut config = Config::default();

    if let Some(v) = lookup("LECTERN_BASE_URL") {
        config.crawl.base_url = v;
    }
    config.crawl.max_pages = parse_var(&lookup, "LECTERN_MAX_PAGES", config.crawl.max_pages)?;
    config.crawl.request_delay_ms = parse_var(
        &lookup,
        "LECTERN_REQUEST_DELAY_MS",
        config.crawl.request_delay_ms,
    )?;

    if let Some(v) = lookup("LECTERN_USER_AGENT") {
        config.fetch.user_agent = v;
    }
    config.fetch.request_timeout_secs = parse_var(
        &lookup,
        "LECTERN_REQUEST_TIMEOUT_SECS",
        config.fetch.request_timeout_secs,
    )?;

    config.render.enabled = parse_flag(&lookup, "LECTERN_RENDER", config.render.enabled)?;
    config.render.headless = parse_flag(&lookup, "LECTERN_HEADLESS", config.render.headless)?;
    config.render.min_static_bytes = parse_var(
        &lookup,
        "LECTERN_MIN_STATIC_BYTES",
        config.render.min_static_bytes,
    )?;
    if let Some(v) = lookup("LECTERN_DYNAMIC_MARKERS") {
        config.render.dynamic_markers = v
            .split(',')
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();
    }

    if let Some(v) = lookup("LECTERN_PAGES_DIR") {
        config.output.pages_dir = v.into();
    }
    if let Some(v) = lookup("LECTERN_AGGREGATE_PATH") {
        config.output.aggregate_path = v.into();
    }
    if let Some(v) = lookup("LECTERN_STATS_PATH") {
        config.output.stats_path = v.into();
    }

    Ok(config)
}

/// Parses a numeric variable, keeping `default` when unset
fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Var {
            name: name.to_string(),
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Parses a boolean variable ("1"/"0"/"true"/"false", case-insensitive)
fn parse_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: bool,
) -> ConfigResult<bool> {
    match lookup(name) {
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            other => Err(ConfigError::Var {
                name: name.to_string(),
                message: format!("expected a boolean, got '{}'", other),
            }),
        },
        None => Ok(default),
    }
}
