//! Page template rendering stage.
//!
//! Wraps rendered HTML content in the page template.

use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};
use crate::build::render::{PageContext, PageInfo};

/// Stage that applies `page.html` to rendered content.
///
/// After this stage, `doc.output_html` contains the complete HTML page.
pub struct TemplateStage;

impl Stage for TemplateStage {
    fn name(&self) -> &'static str {
        "template"
    }

    fn process(
        &self,
        docs: &mut [ProcessingDocument],
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        for doc in docs {
            let page_context = PageContext {
                site: ctx.site,
                page: PageInfo::from(&doc.doc),
                content: &doc.content,
                toc: &doc.toc,
            };

            let html = ctx.renderer.render_page(&page_context)?;
            doc.output_html = Some(html);
        }

        Ok(())
    }
}
