//! Link discovery
//!
//! Collects in-domain navigational links from a fetched page. Everything
//! that leaves the crawl domain, uses a non-navigational scheme, or points
//! at known non-content paths is dropped here, so the frontier only ever
//! sees candidate content URLs.

use crate::url::{normalize_url, same_domain};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Schemes that never lead to crawlable pages
const SKIP_SCHEMES: &[&str] = &["mailto:", "tel:", "javascript:"];

/// Path substrings of URLs that are never content pages (admin panels,
/// asset directories, syndication feeds, search result pages)
const NON_CONTENT_PATTERNS: &[&str] = &["/wp-admin", "/wp-content/", "/feed", "/?s="];

/// Extracts in-domain links from a page
///
/// Targets are resolved against `source_url`, normalized, filtered to the
/// domain of `base_url` (host equal or subdomain), stripped of known
/// non-content paths, and de-duplicated preserving first-seen order.
pub fn extract_links(html: &str, source_url: &str, base_url: &str) -> Vec<String> {
    let source = match Url::parse(source_url) {
        Ok(url) => url,
        Err(_) => return Vec::new(),
    };

    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    for element in document.select(&selector) {
        let href = match element.value().attr("href") {
            Some(href) => href.trim(),
            None => continue,
        };

        if href.is_empty() || href.starts_with('#') {
            continue;
        }

        let lower = href.to_lowercase();
        if SKIP_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
            continue;
        }

        let normalized = normalize_url(href, &source);
        if !same_domain(&normalized, base_url) {
            continue;
        }
        if is_non_content(&normalized) {
            continue;
        }

        if seen.insert(normalized.clone()) {
            links.push(normalized);
        }
    }

    links
}

/// Checks a canonical URL against the non-content path patterns
fn is_non_content(url: &str) -> bool {
    let lower = url.to_lowercase();
    NON_CONTENT_PATTERNS.iter().any(|p| lower.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "https://x.edu/news/index";
    const BASE: &str = "https://x.edu";

    fn links_of(html: &str) -> Vec<String> {
        extract_links(html, SOURCE, BASE)
    }

    #[test]
    fn test_relative_and_absolute() {
        let html = r#"<html><body>
            <a href="/events">Events</a>
            <a href="story">Story</a>
            <a href="https://x.edu/contact">Contact</a>
            </body></html>"#;
        assert_eq!(
            links_of(html),
            vec![
                "https://x.edu/events".to_string(),
                "https://x.edu/news/story".to_string(),
                "https://x.edu/contact".to_string(),
            ]
        );
    }

    #[test]
    fn test_subdomain_kept_offdomain_dropped() {
        let html = r#"<html><body>
            <a href="https://cs.x.edu/faculty">Faculty</a>
            <a href="https://elsewhere.org/page">External</a>
            </body></html>"#;
        assert_eq!(links_of(html), vec!["https://cs.x.edu/faculty".to_string()]);
    }

    #[test]
    fn test_skip_schemes() {
        let html = r#"<html><body>
            <a href="mailto:admissions@x.edu">Mail</a>
            <a href="tel:+15551234">Call</a>
            <a href="javascript:void(0)">Menu</a>
            <a href="/real">Real</a>
            </body></html>"#;
        assert_eq!(links_of(html), vec!["https://x.edu/real".to_string()]);
    }

    #[test]
    fn test_skip_fragment_only() {
        let html = r##"<html><body><a href="#top">Top</a></body></html>"##;
        assert!(links_of(html).is_empty());
    }

    #[test]
    fn test_fragment_stripped_from_target() {
        let html = r##"<html><body><a href="/page#section">P</a></body></html>"##;
        assert_eq!(links_of(html), vec!["https://x.edu/page".to_string()]);
    }

    #[test]
    fn test_non_content_paths_dropped() {
        let html = r#"<html><body>
            <a href="/wp-admin/options.php">Admin</a>
            <a href="/wp-content/uploads/doc.pdf">Upload</a>
            <a href="/news/feed">Feed</a>
            <a href="/?s=query">Search</a>
            <a href="/kept">Kept</a>
            </body></html>"#;
        assert_eq!(links_of(html), vec!["https://x.edu/kept".to_string()]);
    }

    #[test]
    fn test_deduplicated_in_order() {
        let html = r#"<html><body>
            <a href="/a">A</a>
            <a href="/b">B</a>
            <a href="/a/">A again, trailing slash</a>
            <a href="/a#frag">A again, fragment</a>
            </body></html>"#;
        assert_eq!(
            links_of(html),
            vec!["https://x.edu/a".to_string(), "https://x.edu/b".to_string()]
        );
    }

    #[test]
    fn test_tracking_params_collapse() {
        let html = r#"<html><body>
            <a href="/p?utm_source=newsletter&id=5">One</a>
            <a href="/p?id=5&utm_campaign=fall">Two</a>
            </body></html>"#;
        assert_eq!(links_of(html), vec!["https://x.edu/p?id=5".to_string()]);
    }

    #[test]
    fn test_malformed_source_yields_nothing() {
        assert!(extract_links("<a href=\"/x\">x</a>", "not a url", BASE).is_empty());
    }

    #[test]
    fn test_no_links() {
        assert!(links_of("<html><body>No anchors here</body></html>").is_empty());
    }
}
