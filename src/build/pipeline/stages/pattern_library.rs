//! Component catalog stage.

use std::path::Path;

use crate::build::paths::write_output;
use crate::build::pipeline::{FinalizeStage, PipelineContext, PipelineError, ProcessingDocument};
use crate::build::render::{CatalogEntry, PatternLibraryContext};

/// Writes `/pattern-library/`, documenting every registered component
/// with a live preview of its example.
pub struct PatternLibraryStage;

impl FinalizeStage for PatternLibraryStage {
    fn name(&self) -> &'static str {
        "pattern-library"
    }

    fn finalize(
        &self,
        _docs: &[ProcessingDocument],
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        let components = ctx
            .shortcodes
            .describe_all()
            .iter()
            .map(|component| CatalogEntry {
                component,
                preview: ctx.shortcodes.expand(&component.example),
            })
            .collect();

        let html = ctx.renderer.render_pattern_library(&PatternLibraryContext {
            site: ctx.site,
            components,
        })?;
        let path = Path::new("pattern-library/index.html");
        write_output(ctx.output_dir, path, &html)
            .map_err(|e| PipelineError::write(path, e))?;

        Ok(())
    }
}
