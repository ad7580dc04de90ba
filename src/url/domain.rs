use url::Url;

/// Extracts the lowercase host of a URL string
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .map(|h| h.to_lowercase())
}

/// Checks whether `url` belongs to the crawl domain rooted at `base`
///
/// True when the URL's host equals the base host or is a subdomain of it.
/// Malformed input on either side is treated as off-domain.
///
/// # Examples
///
/// ```
/// use lectern::url::same_domain;
///
/// assert!(same_domain("https://sub.x.edu/p", "https://x.edu"));
/// assert!(!same_domain("https://notx.edu", "https://x.edu"));
/// ```
pub fn same_domain(url: &str, base: &str) -> bool {
    match (host_of(url), host_of(base)) {
        (Some(host), Some(base_host)) => {
            host == base_host || host.ends_with(&format!(".{}", base_host))
        }
        _ => false,
    }
}
