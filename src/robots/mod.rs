//! Robots.txt politeness gate
//!
//! The policy for the crawl's base domain is loaded once at startup and is
//! read-only afterwards. Loading can never fail the run: any error degrades
//! to a permissive allow-all policy, logged rather than raised, so a crawl
//! never hangs or aborts just because robots.txt is missing.

use reqwest::Client;
use robotstxt::DefaultMatcher;
use url::Url;

/// Parsed robots directives for the crawl domain
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    /// Raw robots.txt body; `None` means allow everything
    body: Option<String>,

    /// User agent the policy is evaluated for
    user_agent: String,
}

impl RobotsPolicy {
    /// Loads robots.txt for the base URL's origin
    ///
    /// Fetches `{origin}/robots.txt` with the run's HTTP client. Any failure
    /// (transport error, timeout, status >= 400, undecodable body) degrades
    /// to [`RobotsPolicy::allow_all`].
    pub async fn load(client: &Client, base: &Url, user_agent: &str) -> Self {
        let robots_url = match base.join("/robots.txt") {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!("Cannot derive robots.txt URL from {}: {}", base, e);
                return Self::allow_all(user_agent);
            }
        };

        match client.get(robots_url.clone()).send().await {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(body) => {
                    tracing::info!("Loaded robots.txt from {}", robots_url);
                    Self::from_content(&body, user_agent)
                }
                Err(e) => {
                    tracing::warn!("Failed to read robots.txt body: {}", e);
                    Self::allow_all(user_agent)
                }
            },
            Ok(resp) => {
                tracing::warn!(
                    "robots.txt at {} returned {}, allowing all",
                    robots_url,
                    resp.status()
                );
                Self::allow_all(user_agent)
            }
            Err(e) => {
                tracing::warn!("Failed to load robots.txt: {}", e);
                Self::allow_all(user_agent)
            }
        }
    }

    /// Creates a permissive policy that allows every URL
    pub fn allow_all(user_agent: &str) -> Self {
        Self {
            body: None,
            user_agent: user_agent.to_string(),
        }
    }

    /// Creates a policy from raw robots.txt content
    pub fn from_content(body: &str, user_agent: &str) -> Self {
        Self {
            body: Some(body.to_string()),
            user_agent: user_agent.to_string(),
        }
    }

    /// Checks whether the configured user agent may fetch `url`
    pub fn can_fetch(&self, url: &str) -> bool {
        let body = match &self.body {
            Some(body) if !body.trim().is_empty() => body,
            _ => return true,
        };

        // DefaultMatcher keeps per-query state, so build a fresh one each call
        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(body, &self.user_agent, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_all() {
        let policy = RobotsPolicy::allow_all("TestBot");
        assert!(policy.can_fetch("https://example.edu/anything"));
        assert!(policy.can_fetch("https://example.edu/admin"));
    }

    #[test]
    fn test_empty_content_allows() {
        let policy = RobotsPolicy::from_content("", "TestBot");
        assert!(policy.can_fetch("https://example.edu/page"));
    }

    #[test]
    fn test_disallow_prefix() {
        let policy = RobotsPolicy::from_content("User-agent: *\nDisallow: /admin", "TestBot");
        assert!(policy.can_fetch("https://example.edu/page"));
        assert!(!policy.can_fetch("https://example.edu/admin"));
        assert!(!policy.can_fetch("https://example.edu/admin/users"));
    }

    #[test]
    fn test_disallow_everything() {
        let policy = RobotsPolicy::from_content("User-agent: *\nDisallow: /", "TestBot");
        assert!(!policy.can_fetch("https://example.edu/"));
        assert!(!policy.can_fetch("https://example.edu/page"));
    }

    #[test]
    fn test_allow_overrides_within_disallowed() {
        let policy = RobotsPolicy::from_content(
            "User-agent: *\nDisallow: /private\nAllow: /private/public",
            "TestBot",
        );
        assert!(!policy.can_fetch("https://example.edu/private"));
        assert!(policy.can_fetch("https://example.edu/private/public"));
    }

    #[test]
    fn test_specific_agent_group() {
        let policy = RobotsPolicy::from_content(
            "User-agent: BadBot\nDisallow: /\n\nUser-agent: *\nAllow: /",
            "GoodBot",
        );
        assert!(policy.can_fetch("https://example.edu/page"));

        let bad = RobotsPolicy::from_content(
            "User-agent: BadBot\nDisallow: /\n\nUser-agent: *\nAllow: /",
            "BadBot",
        );
        assert!(!bad.can_fetch("https://example.edu/page"));
    }

    #[test]
    fn test_garbage_content_allows() {
        let policy = RobotsPolicy::from_content("not a robots file {{{", "TestBot");
        assert!(policy.can_fetch("https://example.edu/page"));
    }
}
