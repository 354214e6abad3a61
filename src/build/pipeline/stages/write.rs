//! File writing stage.

use crate::build::paths::write_output;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that writes rendered documents to the output directory,
/// creating any necessary parent directories.
pub struct WriteStage;

impl Stage for WriteStage {
    fn name(&self) -> &'static str {
        "write"
    }

    fn process(
        &self,
        docs: &mut [ProcessingDocument],
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        for doc in docs {
            let html = doc.output_html.as_ref().ok_or_else(|| {
                PipelineError::stage(
                    "write",
                    format!(
                        "document '{}' has no output HTML (was template stage run?)",
                        doc.url()
                    ),
                )
            })?;

            let path = write_output(ctx.output_dir, &doc.doc.output_path, html)
                .map_err(|e| PipelineError::write(&doc.doc.output_path, e))?;
            tracing::debug!(path = %path.display(), "wrote page");
        }

        Ok(())
    }
}
