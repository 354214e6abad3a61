//! Markdown rendering with syntax highlighting and TOC extraction.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use quick_xml::escape::escape;
use serde::Serialize;

use super::highlight::SyntaxHighlighter;
use crate::config::MarkdownConfig;
use crate::util::slugify;

#[derive(thiserror::Error, Debug)]
pub enum MarkdownError {
    #[error("invalid markdown extension: {0}")]
    InvalidExtension(String),
}

/// A table of contents entry for the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// The heading text
    pub text: String,
    /// The heading id (for anchor links)
    pub id: String,
    /// The heading level (1-6)
    pub level: u8,
}

/// Result of rendering markdown, containing both HTML and table of contents.
#[derive(Debug, Clone)]
pub struct MarkdownOutput {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Converts expanded Markdown into HTML.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> Result<MarkdownOutput, MarkdownError>;
}

/// Markdown renderer backed by pulldown-cmark.
///
/// Headings get unique slug ids and a permalink anchor, and fenced code
/// blocks are syntax highlighted.
pub struct PulldownMarkdown {
    options: Options,
    highlighter: SyntaxHighlighter,
    toc_levels: RangeInclusive<u8>,
}

impl PulldownMarkdown {
    pub fn new(config: &MarkdownConfig, highlighter: SyntaxHighlighter) -> Result<Self, MarkdownError> {
        Ok(Self {
            options: parse_extensions(&config.extensions)?,
            highlighter,
            toc_levels: config.toc_min_level..=config.toc_max_level,
        })
    }
}

fn parse_extensions(extensions: &[String]) -> Result<Options, MarkdownError> {
    let mut options = Options::empty();
    for extension in extensions {
        match extension.as_str() {
            "definition_lists" => options.insert(Options::ENABLE_DEFINITION_LIST),
            "footnotes" => options.insert(Options::ENABLE_FOOTNOTES),
            "gfm" => options.insert(Options::ENABLE_GFM),
            "heading_attributes" => options.insert(Options::ENABLE_HEADING_ATTRIBUTES),
            "smart_punctuation" => options.insert(Options::ENABLE_SMART_PUNCTUATION),
            "strikethrough" => options.insert(Options::ENABLE_STRIKETHROUGH),
            "tables" => options.insert(Options::ENABLE_TABLES),
            "tasklists" => options.insert(Options::ENABLE_TASKLISTS),
            other => return Err(MarkdownError::InvalidExtension(other.to_string())),
        }
    }
    Ok(options)
}

/// A heading whose events are buffered until its end tag.
struct PendingHeading<'a> {
    level: HeadingLevel,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
    events: Vec<Event<'a>>,
}

impl MarkdownRenderer for PulldownMarkdown {
    fn render(&self, markdown: &str) -> Result<MarkdownOutput, MarkdownError> {
        let parser = Parser::new_ext(markdown, self.options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(String, String)> = None;
        let mut heading: Option<PendingHeading> = None;
        let mut used_ids: HashSet<String> = HashSet::new();
        let mut toc: Vec<TocEntry> = Vec::new();

        for event in parser {
            if let Some((language, content)) = code_block.as_mut() {
                match event {
                    Event::Text(text) => content.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        let highlighted = self.highlighter.highlight(content, language);
                        events.push(Event::Html(highlighted.into()));
                        code_block = None;
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let language = match kind {
                        CodeBlockKind::Fenced(lang) => lang.to_string(),
                        CodeBlockKind::Indented => String::new(),
                    };
                    code_block = Some((language, String::new()));
                }
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => {
                    heading = Some(PendingHeading {
                        level,
                        id: id.map(|id| id.to_string()),
                        classes: classes.iter().map(|c| c.to_string()).collect(),
                        attrs: attrs
                            .iter()
                            .map(|(k, v)| (k.to_string(), v.as_ref().map(|v| v.to_string())))
                            .collect(),
                        events: Vec::new(),
                    });
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(pending) = heading.take() {
                        let (html, entry) = finish_heading(pending, &mut used_ids);
                        if self.toc_levels.contains(&entry.level) {
                            toc.push(entry);
                        }
                        events.push(Event::Html(html.into()));
                    }
                }
                other => match heading.as_mut() {
                    Some(pending) => pending.events.push(other),
                    None => events.push(other),
                },
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(MarkdownOutput {
            html: html_output,
            toc,
        })
    }
}

/// Render a buffered heading with an id and permalink.
fn finish_heading(pending: PendingHeading<'_>, used_ids: &mut HashSet<String>) -> (String, TocEntry) {
    let text: String = pending
        .events
        .iter()
        .filter_map(|event| match event {
            Event::Text(t) | Event::Code(t) => Some(t.as_ref()),
            _ => None,
        })
        .collect();

    let id = match pending.id {
        Some(id) => id,
        None => unique_id(&text, used_ids),
    };
    used_ids.insert(id.clone());

    let mut inner = String::new();
    html::push_html(&mut inner, pending.events.into_iter());

    let class_attr = if pending.classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", escape(&pending.classes.join(" ")))
    };

    let extra_attrs: String = pending
        .attrs
        .iter()
        .map(|(k, v)| match v {
            Some(val) => format!(" {}=\"{}\"", escape(k), escape(val)),
            None => format!(" {}", escape(k)),
        })
        .collect();

    let level = pending.level as u8;
    let id_attr = escape(&id);
    let html = format!(
        "<h{level} id=\"{id_attr}\"{class_attr}{extra_attrs}>{inner} <a class=\"header-anchor\" href=\"#{id_attr}\" aria-label=\"Link to this heading\">#</a></h{level}>\n"
    );

    (html, TocEntry { text, id, level })
}

fn unique_id(text: &str, used_ids: &HashSet<String>) -> String {
    let mut base = slugify(text);
    if base.is_empty() {
        base = "section".to_string();
    }
    let mut id = base.clone();
    let mut suffix = 1;
    while used_ids.contains(&id) {
        id = format!("{base}-{suffix}");
        suffix += 1;
    }
    id
}
