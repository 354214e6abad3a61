//! Shortcode expansion stage.
//!
//! Replaces `{{< component ... />}}` invocations in the markdown body with
//! the HTML of the component, before the markdown is rendered.

use rayon::prelude::*;

use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that expands shortcodes in document content.
///
/// Documents are expanded in parallel. Expansion never fails: unknown
/// components and render errors are left as placeholders in the page.
pub struct ShortcodeStage;

impl Stage for ShortcodeStage {
    fn name(&self) -> &'static str {
        "shortcode"
    }

    fn process(
        &self,
        docs: &mut [ProcessingDocument],
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        docs.par_iter_mut().for_each(|doc| {
            doc.content = ctx.shortcodes.expand(&doc.content);
        });
        Ok(())
    }
}
