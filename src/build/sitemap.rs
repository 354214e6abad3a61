//! XML sitemap generation.

use quick_xml::escape::escape;

/// Where the sitemap is written, relative to the output directory.
pub const SITEMAP_PATH: &str = "sitemap.xml";

/// A page listed in the sitemap.
#[derive(Debug, Clone, Copy)]
pub struct SitemapEntry<'a> {
    /// Site-relative URL, starting with `/`
    pub url: &'a str,
    /// `YYYY-MM-DD`
    pub lastmod: &'a str,
}

/// Render a sitemap for the given pages.
///
/// Page URLs are joined to `base_url` with any trailing `/` removed.
pub fn render_sitemap(base_url: &str, entries: &[SitemapEntry]) -> String {
    let base_url = base_url.trim_end_matches('/');

    let mut lines = vec![
        r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string(),
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#.to_string(),
    ];
    for entry in entries {
        let loc = format!("{}{}", base_url, entry.url);
        lines.push("  <url>".to_string());
        lines.push(format!("    <loc>{}</loc>", escape(&loc)));
        lines.push(format!("    <lastmod>{}</lastmod>", escape(entry.lastmod)));
        lines.push("  </url>".to_string());
    }
    lines.push("</urlset>".to_string());

    lines.join("\n")
}
