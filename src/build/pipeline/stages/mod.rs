//! Default pipeline stages.
//!
//! The standard document processing pipeline consists of:
//!
//! 1. **ShortcodeStage** - Expand component shortcodes in markdown
//! 2. **MarkdownStage** - Convert markdown to HTML with syntax highlighting
//! 3. **TemplateStage** - Wrap content in the page template
//! 4. **WriteStage** - Write final HTML to output directory
//!
//! Followed once per build by the site-wide finalize stages: index page,
//! pattern library, static assets, highlight CSS, search index, sitemap.

mod assets;
mod index;
mod markdown;
mod pattern_library;
mod search;
mod shortcode;
mod sitemap;
mod template;
mod write;

pub use assets::{HighlightCssStage, StaticAssetsStage};
pub use index::IndexPageStage;
pub use markdown::MarkdownStage;
pub use pattern_library::PatternLibraryStage;
pub use search::SearchIndexStage;
pub use shortcode::ShortcodeStage;
pub use sitemap::SitemapStage;
pub use template::TemplateStage;
pub use write::WriteStage;
