//! Markdown rendering stage.

use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that renders markdown content to HTML.
///
/// After this stage, `doc.content` contains HTML and `doc.toc`
/// contains the extracted headings.
pub struct MarkdownStage;

impl Stage for MarkdownStage {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn process(
        &self,
        docs: &mut [ProcessingDocument],
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        for doc in docs {
            let output = ctx
                .markdown
                .render(&doc.content)
                .map_err(|source| PipelineError::Markdown {
                    url: doc.url().to_string(),
                    source,
                })?;
            doc.content = output.html;
            doc.toc = output.toc;
        }

        Ok(())
    }
}
