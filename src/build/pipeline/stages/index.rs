//! Site index stage.

use std::path::Path;

use tracing::warn;

use crate::build::paths::write_output;
use crate::build::pipeline::{FinalizeStage, PipelineContext, PipelineError, ProcessingDocument};
use crate::build::render::{IndexContext, PageInfo};

/// Writes the site's `index.html`, listing every page newest first.
///
/// The listing replaces any content page rendered at `/`.
pub struct IndexPageStage;

impl FinalizeStage for IndexPageStage {
    fn name(&self) -> &'static str {
        "index"
    }

    fn finalize(
        &self,
        docs: &[ProcessingDocument],
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        if let Some(root) = docs.iter().find(|doc| doc.url() == "/") {
            warn!(
                source = %root.doc.source_path.display(),
                "page at / is replaced by the generated index"
            );
        }

        let mut pages: Vec<PageInfo> = docs.iter().map(|doc| PageInfo::from(&doc.doc)).collect();
        // Stable, so pages with equal dates keep discovery order
        pages.sort_by(|a, b| b.date.cmp(a.date));

        let html = ctx.renderer.render_index(&IndexContext {
            site: ctx.site,
            pages,
        })?;
        let path = Path::new("index.html");
        write_output(ctx.output_dir, path, &html)
            .map_err(|e| PipelineError::write(path, e))?;

        Ok(())
    }
}
