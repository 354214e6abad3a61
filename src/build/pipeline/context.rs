//! Pipeline context for sharing state across stages.

use std::path::Path;

use crate::build::highlight::SyntaxHighlighter;
use crate::build::markdown::MarkdownRenderer;
use crate::build::render::{Renderer, SiteContext};
use crate::build::shortcode::ShortcodeEngine;
use crate::config::SiteConfig;

/// The shortcode engine used during a build, rendering components with
/// the site's template renderer.
pub type SiteShortcodes<'a> = ShortcodeEngine<&'a Renderer>;

/// Shared context for pipeline stages.
///
/// Everything here is read-only while the pipeline runs, so stages may
/// process documents in parallel.
pub struct PipelineContext<'a> {
    /// Directory where output files are written
    pub output_dir: &'a Path,

    /// Site configuration
    pub config: &'a SiteConfig,

    /// Site metadata passed to page templates
    pub site: &'a SiteContext,

    /// Template renderer for pages and components
    pub renderer: &'a Renderer,

    /// Shortcode expansion engine
    pub shortcodes: &'a SiteShortcodes<'a>,

    /// Markdown to HTML conversion
    pub markdown: &'a dyn MarkdownRenderer,

    /// Syntax highlighter (also provides the code stylesheet)
    pub highlighter: &'a SyntaxHighlighter,
}
