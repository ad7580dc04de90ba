use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let base = Url::parse(&config.crawl.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("base_url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base_url must be http or https, got '{}'",
            base.scheme()
        )));
    }

    if base.host_str().is_none() {
        return Err(ConfigError::Validation(
            "base_url must have a host".to_string(),
        ));
    }

    if config.crawl.max_pages == 0 {
        return Err(ConfigError::Validation(
            "max_pages must be >= 1".to_string(),
        ));
    }

    if config.fetch.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.fetch.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.render.enabled && config.render.page_load_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "page_load_timeout_secs must be >= 1 when rendering is enabled".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_bad_base_url() {
        let mut config = Config::default();
        config.crawl.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_non_http_scheme() {
        let mut config = Config::default();
        config.crawl.base_url = "ftp://example.edu".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_budget() {
        let mut config = Config::default();
        config.crawl.max_pages = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = Config::default();
        config.fetch.request_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_user_agent() {
        let mut config = Config::default();
        config.fetch.user_agent = "  ".to_string();
        assert!(validate(&config).is_err());
    }
}
