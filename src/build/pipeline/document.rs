//! Document types for pipeline processing.

use crate::build::document::Document;
use crate::build::markdown::TocEntry;

/// A document being processed through the pipeline.
///
/// Wraps the loaded `Document` with state that evolves through the
/// pipeline stages:
///
/// 1. Initially: `content` = markdown body, `toc` = empty
/// 2. After shortcode: `content` = markdown with shortcodes expanded
/// 3. After markdown: `content` = HTML fragment, `toc` = populated
/// 4. After template: `output_html` = final page HTML
#[derive(Debug)]
pub struct ProcessingDocument {
    /// The loaded document (metadata and markdown body)
    pub doc: Document,

    /// Content being processed.
    pub content: String,

    /// Table of contents extracted during markdown rendering.
    pub toc: Vec<TocEntry>,

    /// Final HTML output after template rendering.
    pub output_html: Option<String>,
}

impl ProcessingDocument {
    pub fn new(doc: Document) -> Self {
        let content = doc.body.clone();
        Self {
            doc,
            content,
            toc: Vec::new(),
            output_html: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.doc.url
    }

    pub fn title(&self) -> &str {
        self.doc.title()
    }
}
