//! Content extraction
//!
//! Turns raw HTML into a [`PageRecord`]: boilerplate subtrees are skipped,
//! a main-content region is selected by priority, and its visible text is
//! flattened to whitespace-normalized plain text.

use crate::record::PageRecord;
use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose subtrees never contribute visible content
const STRIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "header", "footer", "nav", "aside",
];

/// Main-region candidates, tried in priority order; `body` is the fallback
const MAIN_REGION_SELECTORS: &[&str] = &[
    "main",
    "[role=\"main\"]",
    "article",
    "div.content",
    "div#content",
    "body",
];

/// Extracts a page record from raw HTML
///
/// Returns `None` when no visible text survives cleaning. The caller is
/// responsible for the minimum-word-count acceptance check; a short record
/// is still a record here.
pub fn extract_content(html: &str, url: &str) -> Option<PageRecord> {
    let document = Html::parse_document(html);

    let content = select_main_region(&document)
        .map(visible_text)
        .unwrap_or_default();
    if content.is_empty() {
        return None;
    }

    let title = extract_title(&document);
    let description = extract_description(&document);

    Some(PageRecord::new(
        url.to_string(),
        title,
        description,
        content,
    ))
}

/// Picks the main content region by trying selectors in priority order
///
/// The first region *present* wins, even if it turns out to be empty; an
/// empty `<main>` means the page has no main content, not that the
/// navigation chrome should be promoted to content.
fn select_main_region(document: &Html) -> Option<ElementRef<'_>> {
    for selector_str in MAIN_REGION_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(region) = document.select(&selector).next() {
                return Some(region);
            }
        }
    }
    None
}

/// Collects the visible text of a region, skipping boilerplate subtrees
///
/// Text chunks are joined with single spaces and whitespace runs collapsed,
/// so element boundaries become exactly one separator.
fn visible_text(region: ElementRef<'_>) -> String {
    let mut pieces: Vec<String> = Vec::new();

    // Depth-first in document order; children pushed reversed so the stack
    // pops them front-to-back
    let mut stack: Vec<_> = region.children().rev().collect();
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    pieces.push(collapse_whitespace(trimmed));
                }
            }
            Node::Element(element) => {
                if !STRIP_TAGS.contains(&element.name()) {
                    for child in node.children().rev() {
                        stack.push(child);
                    }
                }
            }
            _ => {}
        }
    }

    pieces.join(" ")
}

fn extract_title(document: &Html) -> String {
    Selector::parse("title")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default()
}

/// Meta description, preferring `name=description` over `og:description`
fn extract_description(document: &Html) -> String {
    for selector_str in [
        "meta[name=\"description\"]",
        "meta[property=\"og:description\"]",
    ] {
        if let Ok(selector) = Selector::parse(selector_str) {
            let content = document
                .select(&selector)
                .next()
                .and_then(|el| el.value().attr("content"))
                .map(str::trim)
                .unwrap_or_default();
            if !content.is_empty() {
                return content.to_string();
            }
        }
    }
    String::new()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_extraction() {
        let html = r#"<html>
            <head>
                <title>  Admissions  </title>
                <meta name="description" content="How to apply">
            </head>
            <body><main>Apply   by
            June.</main></body></html>"#;
        let record = extract_content(html, "https://x.edu/admissions").unwrap();
        assert_eq!(record.url, "https://x.edu/admissions");
        assert_eq!(record.title, "Admissions");
        assert_eq!(record.description, "How to apply");
        assert_eq!(record.content, "Apply by June.");
        assert_eq!(record.word_count, 3);
    }

    #[test]
    fn test_boilerplate_stripped() {
        let html = r#"<html><body>
            <nav>Home About Contact</nav>
            <header>Site header</header>
            <main>Real content here</main>
            <script>var x = 1;</script>
            <style>.a { color: red }</style>
            <footer>Copyright</footer>
            <aside>Related links</aside>
            </body></html>"#;
        let record = extract_content(html, "https://x.edu/p").unwrap();
        assert_eq!(record.content, "Real content here");
    }

    #[test]
    fn test_region_priority_main_over_article() {
        let html = r#"<html><body>
            <article>Article text</article>
            <main>Main text</main>
            </body></html>"#;
        let record = extract_content(html, "https://x.edu/p").unwrap();
        assert_eq!(record.content, "Main text");
    }

    #[test]
    fn test_role_main_region() {
        let html = r#"<html><body>
            <div role="main">Role main text</div>
            <div>Other text</div>
            </body></html>"#;
        let record = extract_content(html, "https://x.edu/p").unwrap();
        assert_eq!(record.content, "Role main text");
    }

    #[test]
    fn test_content_class_and_id_regions() {
        let by_class = r#"<html><body><div class="content">Class text</div><p>noise</p></body></html>"#;
        let record = extract_content(by_class, "https://x.edu/p").unwrap();
        assert_eq!(record.content, "Class text");

        let by_id = r#"<html><body><div id="content">Id text</div><p>noise</p></body></html>"#;
        let record = extract_content(by_id, "https://x.edu/p").unwrap();
        assert_eq!(record.content, "Id text");
    }

    #[test]
    fn test_body_fallback() {
        let html = r#"<html><body><p>Just</p><p>paragraphs</p></body></html>"#;
        let record = extract_content(html, "https://x.edu/p").unwrap();
        assert_eq!(record.content, "Just paragraphs");
    }

    #[test]
    fn test_empty_main_region_yields_no_record() {
        // An empty <main> must not fall back to surrounding chrome
        let html = r#"<html><body><div>visible elsewhere</div><main></main></body></html>"#;
        assert!(extract_content(html, "https://x.edu/p").is_none());
    }

    #[test]
    fn test_empty_page_yields_no_record() {
        assert!(extract_content("<html><body></body></html>", "https://x.edu/p").is_none());
        assert!(extract_content("", "https://x.edu/p").is_none());
    }

    #[test]
    fn test_missing_title_and_description_are_empty() {
        let html = r#"<html><body><main>Some words</main></body></html>"#;
        let record = extract_content(html, "https://x.edu/p").unwrap();
        assert_eq!(record.title, "");
        assert_eq!(record.description, "");
    }

    #[test]
    fn test_og_description_fallback() {
        let html = r#"<html><head>
            <meta property="og:description" content="From open graph">
            </head><body><main>words</main></body></html>"#;
        let record = extract_content(html, "https://x.edu/p").unwrap();
        assert_eq!(record.description, "From open graph");
    }

    #[test]
    fn test_meta_description_preferred_over_og() {
        let html = r#"<html><head>
            <meta name="description" content="Plain meta">
            <meta property="og:description" content="From open graph">
            </head><body><main>words</main></body></html>"#;
        let record = extract_content(html, "https://x.edu/p").unwrap();
        assert_eq!(record.description, "Plain meta");
    }

    #[test]
    fn test_element_boundaries_become_single_spaces() {
        let html = r#"<html><body><main><p>One</p><p>Two</p><span>Three</span></main></body></html>"#;
        let record = extract_content(html, "https://x.edu/p").unwrap();
        assert_eq!(record.content, "One Two Three");
    }

    #[test]
    fn test_nested_strip_tag_inside_main() {
        let html = r#"<html><body><main>
            Keep this
            <script>drop("this")</script>
            and this
            </main></body></html>"#;
        let record = extract_content(html, "https://x.edu/p").unwrap();
        assert_eq!(record.content, "Keep this and this");
    }

    #[test]
    fn test_word_count_29_vs_30() {
        let make = |n: usize| {
            let words = (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
            format!("<html><body><main>{}</main></body></html>", words)
        };
        let record = extract_content(&make(29), "https://x.edu/p").unwrap();
        assert!(!record.meets_minimum());
        let record = extract_content(&make(30), "https://x.edu/p").unwrap();
        assert!(record.meets_minimum());
    }
}
