use url::Url;

/// Query parameter names removed during normalization
const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid", "trk"];

/// Query parameter prefixes removed during normalization
const TRACKING_PREFIXES: &[&str] = &["utm_"];

/// Normalizes a URL to its canonical form
///
/// Relative input is resolved against `base`. Canonicalization:
///
/// 1. Strip the fragment
/// 2. Drop tracking query parameters (`utm_*`, `fbclid`, `gclid`, `trk`,
///    case-insensitive)
/// 3. Re-encode surviving query parameters in sorted key order
/// 4. Trim trailing slashes from the path; the root path stays `/`
///
/// A URL with no scheme resolves against the (https) base and so picks up
/// the secure scheme; an explicit `http` scheme is preserved.
///
/// Best-effort: malformed input is returned unchanged rather than failing,
/// so callers never have to handle a normalization error.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use lectern::url::normalize_url;
///
/// let base = Url::parse("https://example.edu/").unwrap();
/// assert_eq!(
///     normalize_url("https://example.edu/p/?utm_source=a&id=5#top", &base),
///     "https://example.edu/p?id=5"
/// );
/// ```
pub fn normalize_url(raw: &str, base: &Url) -> String {
    match parse_with_base(raw, base) {
        Some(url) => canonicalize(url),
        None => raw.to_string(),
    }
}

/// Parses `raw` as absolute, falling back to resolution against `base`
fn parse_with_base(raw: &str, base: &Url) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match Url::parse(trimmed) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => base.join(trimmed).ok(),
        Err(_) => None,
    }
}

fn canonicalize(mut url: Url) -> String {
    url.set_fragment(None);

    if url.query().is_some() {
        let mut kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| !is_tracking_param(key))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        kept.sort();

        if kept.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut()
                .clear()
                .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
    }

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            url.set_path("/");
        } else {
            url.set_path(&trimmed);
        }
    }

    url.to_string()
}

/// Checks if a query parameter is a tracking parameter
fn is_tracking_param(key: &str) -> bool {
    let key = key.to_lowercase();
    TRACKING_PARAMS.contains(&key.as_str())
        || TRACKING_PREFIXES.iter().any(|p| key.starts_with(p))
}
