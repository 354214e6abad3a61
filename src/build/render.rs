use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera, Value};
use tracing::debug;

use super::document::{Document, PageMetadata};
use super::highlight::SyntaxHighlighter;
use super::markdown::TocEntry;
use super::shortcode::{ComponentDescriptor, ComponentError, ComponentRenderer, ParamSet};
use crate::config::{SiteConfig, ThemeSettings};
use crate::theme;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("templates directory not found: {0}")]
    TemplatesNotFound(String),
}

/// The template renderer, wrapping Tera.
///
/// Holds the page templates and the component templates used by
/// shortcodes. Built-in templates are used for any name the configured
/// templates directory does not provide.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Create a renderer from the built-in templates, overridden by the
    /// templates in `templates_dir` if given.
    pub fn new(
        templates_dir: Option<&Path>,
        highlighter: &SyntaxHighlighter,
    ) -> Result<Self, RenderError> {
        let mut tera = match templates_dir {
            Some(dir) => {
                if !dir.is_dir() {
                    return Err(RenderError::TemplatesNotFound(dir.display().to_string()));
                }
                let glob = dir.join("**/*.html");
                // Parse only: overrides may extend built-in templates that are added below
                Tera::parse(&glob.to_string_lossy())?
            }
            None => Tera::default(),
        };

        let overridden: HashSet<String> = tera.get_template_names().map(str::to_string).collect();
        if !overridden.is_empty() {
            debug!(templates = ?overridden, "using template overrides");
        }
        let builtin: Vec<(&str, &str)> = theme::TEMPLATES
            .iter()
            .filter(|(name, _)| !overridden.contains(*name))
            .copied()
            .collect();
        tera.add_raw_templates(builtin)?;

        tera.register_filter("from_json", from_json);
        let highlighter = highlighter.clone();
        tera.register_filter(
            "highlight",
            move |value: &Value, args: &HashMap<String, Value>| {
                let code = value
                    .as_str()
                    .ok_or_else(|| tera::Error::msg("highlight: value must be a string"))?;
                let lang = args.get("lang").and_then(Value::as_str).unwrap_or("");
                Ok(Value::String(highlighter.highlight(code, lang)))
            },
        );

        Ok(Self { tera })
    }

    /// Render a content page.
    pub fn render_page(&self, context: &PageContext) -> Result<String, RenderError> {
        self.render_template("page.html", context)
    }

    /// Render the site index listing.
    pub fn render_index(&self, context: &IndexContext) -> Result<String, RenderError> {
        self.render_template("index.html", context)
    }

    /// Render the component catalog.
    pub fn render_pattern_library(
        &self,
        context: &PatternLibraryContext,
    ) -> Result<String, RenderError> {
        self.render_template("pattern-library.html", context)
    }

    fn render_template<T: Serialize>(&self, name: &str, context: &T) -> Result<String, RenderError> {
        let context = Context::from_serialize(context)?;
        Ok(self.tera.render(name, &context)?)
    }
}

impl ComponentRenderer for Renderer {
    fn render(&self, template_id: &str, params: &ParamSet) -> Result<String, ComponentError> {
        let context = Context::from_serialize(params).map_err(|e| ComponentError::from_error(&e))?;
        self.tera
            .render(template_id, &context)
            .map_err(|e| ComponentError::from_error(&e))
    }
}

/// Parse a JSON string, e.g. the `tabs` parameter of the tabs component.
fn from_json(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    match value {
        Value::String(s) => serde_json::from_str(s)
            .map_err(|e| tera::Error::msg(format!("from_json: invalid JSON: {e}"))),
        other => Ok(other.clone()),
    }
}

// =============================================================================
// Template contexts
// =============================================================================

/// Site-level information, available to every page template as `site`.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub name: String,
    pub description: String,
    pub url: String,
    pub theme: ThemeSettings,
}

impl From<&SiteConfig> for SiteContext {
    fn from(config: &SiteConfig) -> Self {
        Self {
            name: config.site_name.clone(),
            description: config.site_description.clone(),
            url: config.site_url.clone(),
            theme: config.theme.clone(),
        }
    }
}

/// Context passed to `page.html`.
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    pub site: &'a SiteContext,
    pub page: PageInfo<'a>,
    pub content: &'a str,
    /// Table of contents for the current page
    pub toc: &'a [TocEntry],
}

/// Information about a page.
#[derive(Debug, Clone, Serialize)]
pub struct PageInfo<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub date: &'a str,
    pub description: &'a str,
    /// All front matter, including custom fields (`page.metadata.author`)
    pub metadata: &'a PageMetadata,
}

impl<'a> From<&'a Document> for PageInfo<'a> {
    fn from(doc: &'a Document) -> Self {
        Self {
            title: &doc.metadata.title,
            url: &doc.url,
            date: &doc.metadata.date,
            description: &doc.metadata.description,
            metadata: &doc.metadata,
        }
    }
}

/// Context passed to `index.html`.
#[derive(Debug, Serialize)]
pub struct IndexContext<'a> {
    pub site: &'a SiteContext,
    /// Pages, newest first
    pub pages: Vec<PageInfo<'a>>,
}

/// Context passed to `pattern-library.html`.
#[derive(Debug, Serialize)]
pub struct PatternLibraryContext<'a> {
    pub site: &'a SiteContext,
    pub components: Vec<CatalogEntry<'a>>,
}

/// A component with its example rendered.
#[derive(Debug, Serialize)]
pub struct CatalogEntry<'a> {
    #[serde(flatten)]
    pub component: &'a ComponentDescriptor,
    /// The example expanded to HTML
    pub preview: String,
}
