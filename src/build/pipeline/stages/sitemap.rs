//! Sitemap stage.

use std::path::Path;

use crate::build::paths::write_output;
use crate::build::pipeline::{FinalizeStage, PipelineContext, PipelineError, ProcessingDocument};
use crate::build::sitemap::{SITEMAP_PATH, SitemapEntry, render_sitemap};

/// Writes `sitemap.xml` listing every page under the configured site URL.
pub struct SitemapStage;

impl FinalizeStage for SitemapStage {
    fn name(&self) -> &'static str {
        "sitemap"
    }

    fn finalize(
        &self,
        docs: &[ProcessingDocument],
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        let entries: Vec<SitemapEntry> = docs
            .iter()
            .map(|doc| SitemapEntry {
                url: doc.url(),
                lastmod: &doc.doc.metadata.date,
            })
            .collect();

        let xml = render_sitemap(&ctx.config.site_url, &entries);
        let path = Path::new(SITEMAP_PATH);
        write_output(ctx.output_dir, path, &xml)
            .map_err(|e| PipelineError::write(path, e))?;

        Ok(())
    }
}
