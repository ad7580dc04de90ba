//! Fetch strategy: static first, rendered when the static result is suspect
//!
//! Most pages of a university site are static; spinning up a browser
//! navigation for every page would dominate the crawl's cost. Escalation is
//! therefore content-triggered: only pages whose static HTML is missing,
//! suspiciously small, or carrying dynamic-content markers get the rendered
//! treatment.

use crate::config::{Config, RenderConfig};
use crate::crawler::fetcher::{build_http_client, fetch_static};
use crate::crawler::renderer::Renderer;
use crate::LecternError;
use reqwest::Client;

/// Decides whether static HTML warrants escalation to a rendered fetch
///
/// True when the HTML is shorter than the configured minimum size or
/// contains any configured dynamic-content marker (case-insensitive). The
/// marker list is configuration, not hidden logic; see
/// [`RenderConfig::dynamic_markers`].
pub fn needs_render(html: &str, config: &RenderConfig) -> bool {
    if html.len() < config.min_static_bytes {
        return true;
    }
    let lower = html.to_lowercase();
    config
        .dynamic_markers
        .iter()
        .any(|marker| lower.contains(marker.as_str()))
}

/// Per-page fetch selection over the two fetchers
///
/// Owns the shared HTTP client and, when rendering is enabled and the
/// browser launched, the run's renderer.
pub struct FetchStrategy {
    client: Client,
    renderer: Option<Renderer>,
    render_config: RenderConfig,
}

impl FetchStrategy {
    /// Builds the strategy, launching the browser session if rendering is
    /// enabled
    ///
    /// A browser that fails to launch degrades the run to static-only
    /// fetching rather than aborting it.
    pub async fn new(config: &Config) -> Result<Self, LecternError> {
        let client = build_http_client(&config.fetch)?;

        let renderer = if config.render.enabled {
            match Renderer::launch(&config.render, &config.fetch.user_agent).await {
                Ok(renderer) => Some(renderer),
                Err(e) => {
                    tracing::warn!("Browser launch failed ({}), continuing static-only", e);
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            client,
            renderer,
            render_config: config.render.clone(),
        })
    }

    /// The HTTP client shared with the robots loader
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Whether a rendered fetch is available for escalation
    pub fn rendering_available(&self) -> bool {
        self.renderer.is_some()
    }

    /// Fetches a page, escalating per the selection heuristic
    ///
    /// Static fetch always runs first. If rendering is available and the
    /// static result is absent or judged insufficient by [`needs_render`],
    /// a rendered fetch is attempted; on success it replaces the static
    /// result, on failure the static result (possibly nothing) stands.
    pub async fn fetch(&self, url: &str) -> Option<String> {
        let static_html = match fetch_static(&self.client, url).await {
            Ok(html) => Some(html),
            Err(e) => {
                tracing::debug!("Static fetch failed for {}: {}", url, e);
                None
            }
        };

        let escalate = self.renderer.is_some()
            && static_html
                .as_deref()
                .map_or(true, |html| needs_render(html, &self.render_config));

        if escalate {
            if let Some(renderer) = &self.renderer {
                match renderer.fetch(url).await {
                    Ok(html) => {
                        tracing::debug!("Rendered fetch replaced static result for {}", url);
                        return Some(html);
                    }
                    Err(e) => {
                        tracing::debug!("Rendered fetch failed for {}: {}", url, e);
                    }
                }
            }
        }

        static_html
    }

    /// Releases the browser session, if one was launched
    ///
    /// Idempotent; the session is closed at most once.
    pub async fn shutdown(&mut self) {
        if let Some(renderer) = self.renderer.take() {
            renderer.shutdown().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn render_config() -> RenderConfig {
        RenderConfig::default()
    }

    fn static_only_config(base_url: &str) -> Config {
        let mut config = Config::default();
        config.crawl.base_url = base_url.to_string();
        config.render.enabled = false;
        config
    }

    fn large_clean_html() -> String {
        format!(
            "<html><body>{}</body></html>",
            "static page content ".repeat(100)
        )
    }

    #[test]
    fn test_small_html_needs_render() {
        assert!(needs_render("<html></html>", &render_config()));
    }

    #[test]
    fn test_large_clean_html_stands() {
        assert!(!needs_render(&large_clean_html(), &render_config()));
    }

    #[test]
    fn test_marker_triggers_render() {
        let html = format!(
            "<html><body>{}<button>Load More</button></body></html>",
            "x".repeat(1000)
        );
        assert!(needs_render(&html, &render_config()));
    }

    #[test]
    fn test_marker_match_is_case_insensitive() {
        let html = format!("{}<div>INFINITE scroll</div>", "x".repeat(1000));
        assert!(needs_render(&html, &render_config()));
    }

    #[test]
    fn test_ajax_endpoint_markers() {
        for marker in ["admin-ajax", "wp-json"] {
            let html = format!("{}<script src=\"/{}/feed.js\"></script>", "x".repeat(1000), marker);
            assert!(needs_render(&html, &render_config()), "marker {}", marker);
        }
    }

    #[test]
    fn test_custom_marker_list() {
        let mut config = render_config();
        config.dynamic_markers = vec!["data-lazy".to_string()];
        let html = format!("{}<div data-lazy=\"1\"></div>", "x".repeat(1000));
        assert!(needs_render(&html, &config));

        let clean = format!("{}<button>load more</button>", "x".repeat(1000));
        assert!(!needs_render(&clean, &config));
    }

    #[tokio::test]
    async fn test_static_result_stands_when_rendering_disabled() {
        // A marker page with rendering disabled must come back as-is
        let server = MockServer::start().await;
        let body = format!("{}<button>load more</button>", "x".repeat(1000));
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body.clone()))
            .mount(&server)
            .await;

        let strategy = FetchStrategy::new(&static_only_config(&server.uri()))
            .await
            .unwrap();
        assert!(!strategy.rendering_available());

        let fetched = strategy.fetch(&format!("{}/page", server.uri())).await;
        assert_eq!(fetched, Some(body));
    }

    #[tokio::test]
    async fn test_failed_static_fetch_is_none_when_rendering_disabled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let strategy = FetchStrategy::new(&static_only_config(&server.uri()))
            .await
            .unwrap();
        let fetched = strategy.fetch(&format!("{}/gone", server.uri())).await;
        assert_eq!(fetched, None);
    }
}
