mod builder;
mod document;
mod highlight;
mod markdown;
mod paths;
pub mod pipeline;
mod render;
mod search;
pub mod shortcode;
mod sitemap;
mod source;

pub use builder::Builder;
pub use highlight::SyntaxHighlighter;
pub use pipeline::SiteShortcodes;
pub use render::Renderer;
