use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::paths::{output_path_for_source, url_for_output};
use crate::util::title_case;

#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

// =============================================================================
// Documents
// =============================================================================

/// A Markdown page loaded from the content directory.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path relative to the content directory (e.g., "guides/setup.md")
    pub source_path: PathBuf,
    /// Path relative to the output directory (e.g., "guides/setup/index.html")
    pub output_path: PathBuf,
    /// The URL the page is served at (e.g., "/guides/setup/")
    pub url: String,
    /// Front matter with defaults filled in
    pub metadata: PageMetadata,
    /// Markdown body without the front matter block
    pub body: String,
}

impl Document {
    /// Read and parse a document.
    ///
    /// `today` is used as the date of pages whose front matter has none.
    pub fn load(content_dir: &Path, source_path: &Path, today: &str) -> Result<Self, DocumentError> {
        let full_path = content_dir.join(source_path);
        let raw = std::fs::read_to_string(&full_path).map_err(|source| DocumentError::Read {
            path: full_path.clone(),
            source,
        })?;
        Ok(Self::from_source(source_path, &raw, today))
    }

    /// Build a document from already-read file content.
    pub fn from_source(source_path: &Path, raw: &str, today: &str) -> Self {
        let parsed = parse_front_matter(raw);
        let metadata = PageMetadata::with_defaults(parsed.front_matter, source_path, today);
        let output_path = output_path_for_source(source_path);
        let url = url_for_output(&output_path);

        Self {
            source_path: source_path.to_path_buf(),
            output_path,
            url,
            metadata,
            body: parsed.content,
        }
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }
}

// =============================================================================
// Front matter
// =============================================================================

/// Front matter metadata as written in the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrontMatter {
    #[serde(default, deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub description: Option<String>,
    /// Additional arbitrary metadata
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Page metadata with defaults applied, as seen by templates (`page.metadata`).
#[derive(Debug, Clone, Serialize)]
pub struct PageMetadata {
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl PageMetadata {
    fn with_defaults(front_matter: FrontMatter, source_path: &Path, today: &str) -> Self {
        let title = front_matter.title.unwrap_or_else(|| {
            source_path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(title_case)
                .unwrap_or_else(|| "Untitled".to_string())
        });

        Self {
            title,
            date: front_matter.date.unwrap_or_else(|| today.to_string()),
            description: front_matter.description.unwrap_or_default(),
            extra: front_matter.extra,
        }
    }
}

/// Accept any YAML scalar (`date: 2024-01-05`, `title: 1999`) as a string.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => Ok(None),
        serde_yaml::Value::String(s) => Ok(Some(s)),
        serde_yaml::Value::Number(n) => Ok(Some(n.to_string())),
        serde_yaml::Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!(
            "expected a string, found {other:?}"
        ))),
    }
}

/// Result of parsing front matter from markdown content.
#[derive(Debug)]
pub struct ParsedContent {
    /// The parsed front matter (empty if none found)
    pub front_matter: FrontMatter,
    /// The markdown content without the front matter block
    pub content: String,
}

/// Parse front matter from markdown content.
///
/// Front matter is a YAML block delimited by `---` lines at the start of
/// the file. Invalid YAML is reported and treated as empty front matter.
pub fn parse_front_matter(content: &str) -> ParsedContent {
    let Some((yaml, body)) = split_front_matter(content) else {
        return ParsedContent {
            front_matter: FrontMatter::default(),
            content: content.to_string(),
        };
    };

    let front_matter = if yaml.trim().is_empty() {
        FrontMatter::default()
    } else {
        match serde_yaml::from_str(yaml) {
            Ok(fm) => fm,
            Err(e) => {
                warn!(error = %e, "failed to parse front matter, ignoring it");
                FrontMatter::default()
            }
        }
    };

    ParsedContent {
        front_matter,
        content: body.to_string(),
    }
}

/// Split off the YAML between the opening and closing delimiter lines.
fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let mut lines = content.split_inclusive('\n');
    let opening = lines.next()?;
    if !is_delimiter(opening) {
        return None;
    }

    let yaml_start = opening.len();
    let mut offset = yaml_start;
    for line in lines {
        if is_delimiter(line) {
            return Some((&content[yaml_start..offset], &content[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// A delimiter is a line of exactly `---`, ignoring trailing whitespace.
fn is_delimiter(line: &str) -> bool {
    line.trim_end() == "---"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_defaults() {
        let doc = Document::from_source(
            Path::new("guides/getting-started.md"),
            "# Hello\n",
            "2024-03-01",
        );
        assert_eq!(doc.title(), "Getting Started");
        assert_eq!(doc.metadata.date, "2024-03-01");
        assert_eq!(doc.metadata.description, "");
        assert_eq!(doc.output_path, PathBuf::from("guides/getting-started/index.html"));
        assert_eq!(doc.url, "/guides/getting-started/");
        assert_eq!(doc.body, "# Hello\n");
    }

    #[test]
    fn test_document_front_matter_overrides() {
        let source = "---\ntitle: Welcome\ndate: 2023-12-24\ndescription: Intro page\nauthor: Sam\n---\nBody\n";
        let doc = Document::from_source(Path::new("index.md"), source, "2024-03-01");
        assert_eq!(doc.title(), "Welcome");
        assert_eq!(doc.metadata.date, "2023-12-24");
        assert_eq!(doc.metadata.description, "Intro page");
        assert!(doc.metadata.extra.contains_key("author"));
        assert_eq!(doc.url, "/");
        assert_eq!(doc.body, "Body\n");
    }

    #[test]
    fn test_parse_front_matter_basic() {
        let content = r#"---
title: My Page
description: A test page
---

# Hello World
"#;
        let parsed = parse_front_matter(content);
        assert_eq!(parsed.front_matter.title, Some("My Page".to_string()));
        assert_eq!(parsed.front_matter.description, Some("A test page".to_string()));
        assert_eq!(parsed.content, "\n# Hello World\n");
    }

    #[test]
    fn test_parse_front_matter_scalar_values() {
        let parsed = parse_front_matter("---\ntitle: 1999\ndate: 2024-01-05\n---\n");
        assert_eq!(parsed.front_matter.title, Some("1999".to_string()));
        assert_eq!(parsed.front_matter.date, Some("2024-01-05".to_string()));
        assert_eq!(parsed.content, "");
    }

    #[test]
    fn test_parse_front_matter_no_front_matter() {
        let content = "# Just Markdown\n\nNo front matter here.";
        let parsed = parse_front_matter(content);
        assert_eq!(parsed.front_matter.title, None);
        assert_eq!(parsed.content, content);
    }

    #[test]
    fn test_parse_front_matter_empty_front_matter() {
        let parsed = parse_front_matter("---\n---\n# Content");
        assert_eq!(parsed.front_matter.title, None);
        assert_eq!(parsed.content, "# Content");
    }

    #[test]
    fn test_parse_front_matter_invalid_yaml() {
        let parsed = parse_front_matter("---\ntitle: [unclosed\n---\nBody");
        assert_eq!(parsed.front_matter.title, None);
        assert_eq!(parsed.content, "Body");
    }

    #[test]
    fn test_unclosed_front_matter_is_content() {
        let content = "---\ntitle: x\nno closing";
        let parsed = parse_front_matter(content);
        assert_eq!(parsed.front_matter.title, None);
        assert_eq!(parsed.content, content);
    }

    #[test]
    fn test_longer_dash_runs_are_not_delimiters() {
        let content = "----\ntitle: Nope\n----\nBody";
        let parsed = parse_front_matter(content);
        assert!(parsed.front_matter.title.is_none());
        assert_eq!(parsed.content, content);
    }

    #[test]
    fn test_delimiter_must_be_whole_line() {
        let content = "---foo\ntitle: Nope\n---\nBody";
        let parsed = parse_front_matter(content);
        assert!(parsed.front_matter.title.is_none());
        assert_eq!(parsed.content, content);

        let content = "---\ntitle: Nope\n---bar\nBody";
        let parsed = parse_front_matter(content);
        assert!(parsed.front_matter.title.is_none());
        assert_eq!(parsed.content, content);

        let parsed = parse_front_matter("---\r\ntitle: Yes\r\n---  \r\nBody");
        assert_eq!(parsed.front_matter.title.as_deref(), Some("Yes"));
        assert_eq!(parsed.content, "Body");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::load(dir.path(), Path::new("nope.md"), "2024-01-01").unwrap_err();
        assert!(err.to_string().contains("nope.md"));
    }
}
