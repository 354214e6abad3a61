//! Configuration type definitions.
//!
//! These types are pure data. Every field has a default, so an empty or
//! missing config file yields a working site.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// =============================================================================
// Site configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_name: String,
    pub site_description: String,
    /// Absolute base URL, used for sitemap entries
    pub site_url: String,
    /// Appearance settings passed to page templates as `config.theme`
    pub theme: ThemeSettings,
    pub markdown: MarkdownConfig,
    /// Syntax highlighting theme used to generate the code CSS
    pub highlight_theme: String,
    /// Directory of `*.html` templates that replace the built-in ones by name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
    /// Directory copied to `<output>/static` when it exists
    pub static_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "My Static Site".to_string(),
            site_description: "A static site built from Markdown".to_string(),
            site_url: "https://example.com".to_string(),
            theme: ThemeSettings::default(),
            markdown: MarkdownConfig::default(),
            highlight_theme: "dracula".to_string(),
            templates_dir: None,
            static_dir: PathBuf::from("static"),
        }
    }
}

// =============================================================================
// Theme settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// `light` or `dark`
    pub default_mode: String,
    pub primary_color: String,
    pub secondary_color: String,
    /// Any other settings, available to templates unchanged
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            default_mode: "light".to_string(),
            primary_color: "#0d6efd".to_string(),
            secondary_color: "#6c757d".to_string(),
            extra: HashMap::new(),
        }
    }
}

// =============================================================================
// Markdown configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Extensions to enable for markdown processing
    pub extensions: Vec<String>,
    /// Shallowest heading level listed in the table of contents
    pub toc_min_level: u8,
    /// Deepest heading level listed in the table of contents
    pub toc_max_level: u8,
}

fn default_markdown_extensions() -> Vec<String> {
    vec![
        "definition_lists".to_string(),
        "footnotes".to_string(),
        "heading_attributes".to_string(),
        "strikethrough".to_string(),
        "tables".to_string(),
        "tasklists".to_string(),
    ]
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: default_markdown_extensions(),
            toc_min_level: 2,
            toc_max_level: 4,
        }
    }
}
