//! Client-side search index.
//!
//! The index is a JSON array written to `static/js/search-index.json`,
//! one entry per page, for a search script to load in the browser.

use std::sync::LazyLock;

use quick_xml::escape::unescape;
use regex::Regex;
use serde::Serialize;

/// Where the index is written, relative to the output directory.
pub const SEARCH_INDEX_PATH: &str = "static/js/search-index.json";

/// Number of characters of page text kept per entry.
const CONTENT_LIMIT: usize = 500;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// A single named, decimal or hex character reference.
static ENTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);").unwrap()
});

/// One page in the search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    pub title: String,
    pub url: String,
    /// Leading plain text of the page content
    pub content: String,
    pub description: String,
}

impl SearchEntry {
    /// Create an entry from a page's rendered content HTML.
    pub fn new(title: &str, url: &str, content_html: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            content: html_to_text(content_html)
                .chars()
                .take(CONTENT_LIMIT)
                .collect(),
            description: description.to_string(),
        }
    }
}

/// Serialize entries as the pretty-printed index file contents.
pub fn render_search_index(entries: &[SearchEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(entries)
}

/// Strip tags and decode entities.
///
/// Each entity is decoded on its own; one quick-xml cannot decode (an
/// HTML-only name such as `&nbsp;`) is kept as written.
pub fn html_to_text(html: &str) -> String {
    let stripped = TAG_PATTERN.replace_all(html, "");
    ENTITY_PATTERN
        .replace_all(&stripped, |caps: &regex::Captures<'_>| {
            let entity = &caps[0];
            match unescape(entity) {
                Ok(decoded) => decoded.into_owned(),
                Err(_) => entity.to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text() {
        assert_eq!(
            html_to_text("<h2 id=\"a\">Intro</h2>\n<p>Fish &amp; <em>chips</em></p>"),
            "Intro\nFish & chips"
        );
    }

    #[test]
    fn test_html_to_text_unknown_entity_kept() {
        assert_eq!(html_to_text("<p>a&nbsp;b</p>"), "a&nbsp;b");
    }

    #[test]
    fn test_unknown_entity_does_not_block_known_ones() {
        assert_eq!(
            html_to_text("<p>&nbsp;Fish &amp; chips &lt;3 &#233;&#x41;</p>"),
            "&nbsp;Fish & chips <3 éA"
        );
    }

    #[test]
    fn test_bare_ampersand_left_alone() {
        assert_eq!(html_to_text("<p>R&D &amp; more</p>"), "R&D & more");
    }

    #[test]
    fn test_entry_content_truncated_by_characters() {
        let html = format!("<p>{}</p>", "é".repeat(600));
        let entry = SearchEntry::new("T", "/t/", &html, "");
        assert_eq!(entry.content.chars().count(), 500);
    }

    #[test]
    fn test_render_search_index() {
        let entries = vec![SearchEntry::new("Home", "/", "<p>Welcome ✓</p>", "Start here")];
        let json = render_search_index(&entries).unwrap();
        assert!(json.contains("\n  {"));
        assert!(json.contains("Welcome ✓"));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "title": "Home",
                "url": "/",
                "content": "Welcome ✓",
                "description": "Start here"
            }])
        );
    }
}
