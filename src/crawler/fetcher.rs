//! Static HTTP fetching
//!
//! One shared `reqwest::Client` serves the whole run: it carries the
//! configured user agent, request timeout, and compression settings. A
//! static fetch either yields decoded body text or a [`FetchError`] that the
//! strategy treats as "no content"; nothing here is retried or escalated.

use crate::config::FetchConfig;
use crate::FetchError;
use chardetng::EncodingDetector;
use reqwest::header::HeaderMap;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Charset labels that servers commonly send as a default rather than a
/// measurement; bodies declared this way get re-detected
const LATIN_FALLBACK_LABELS: &[&str] = &["iso-8859-1", "latin-1", "latin1"];

/// Builds the HTTP client shared by all static fetches (and the robots load)
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(5))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a plain GET and returns the decoded body
///
/// Statuses of 400 and above are failures. The body is decoded with the
/// declared charset when one is present and trustworthy; a missing or
/// generic-Latin declaration falls back to byte-level detection, matching
/// how mislabelled legacy CMS pages actually decode.
pub async fn fetch_static(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if status.as_u16() >= 400 {
        return Err(FetchError::Status(status.as_u16()));
    }

    let declared = declared_charset(response.headers());
    let bytes = response.bytes().await?;
    Ok(decode_body(&bytes, declared.as_deref()))
}

/// Extracts the charset parameter of the Content-Type header, lowercased
fn declared_charset(headers: &HeaderMap) -> Option<String> {
    let content_type = headers
        .get(reqwest::header::CONTENT_TYPE)?
        .to_str()
        .ok()?;

    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"').to_lowercase())
        } else {
            None
        }
    })
}

/// Decodes a response body, preferring the declared charset unless it is
/// absent, unknown, or a generic Latin fallback
fn decode_body(bytes: &[u8], declared: Option<&str>) -> String {
    if let Some(label) = declared {
        if !LATIN_FALLBACK_LABELS.contains(&label) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(label.as_bytes()) {
                let (text, _, _) = encoding.decode(bytes);
                return text.into_owned();
            }
        }
    }
    detect_and_decode(bytes)
}

fn detect_and_decode(bytes: &[u8]) -> String {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}
