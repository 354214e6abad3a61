//! Search index stage.

use std::path::Path;

use crate::build::paths::write_output;
use crate::build::pipeline::{FinalizeStage, PipelineContext, PipelineError, ProcessingDocument};
use crate::build::search::{SEARCH_INDEX_PATH, SearchEntry, render_search_index};

/// Writes the client-side search index from each page's content HTML.
pub struct SearchIndexStage;

impl FinalizeStage for SearchIndexStage {
    fn name(&self) -> &'static str {
        "search-index"
    }

    fn finalize(
        &self,
        docs: &[ProcessingDocument],
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        let entries: Vec<SearchEntry> = docs
            .iter()
            .map(|doc| {
                SearchEntry::new(
                    doc.title(),
                    doc.url(),
                    &doc.content,
                    &doc.doc.metadata.description,
                )
            })
            .collect();

        let json = render_search_index(&entries)?;
        let path = Path::new(SEARCH_INDEX_PATH);
        write_output(ctx.output_dir, path, &json)
            .map_err(|e| PipelineError::write(path, e))?;

        Ok(())
    }
}
