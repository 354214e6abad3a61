//! Build pipeline for document processing.
//!
//! The pipeline transforms documents through a series of stages:
//! 1. Shortcode expansion (components in markdown)
//! 2. Markdown rendering (to HTML with TOC)
//! 3. Template rendering (page template wrapper)
//! 4. File writing (output to disk)
//!
//! Custom stages can be inserted before or after any named stage.
//! Build-wide stages run after all documents are processed: the index
//! page, the pattern library, static assets, the search index and the
//! sitemap.

mod context;
mod document;
mod error;
mod stages;

pub use context::{PipelineContext, SiteShortcodes};
pub use document::ProcessingDocument;
pub use error::PipelineError;

use stages::{
    HighlightCssStage, IndexPageStage, MarkdownStage, PatternLibraryStage, SearchIndexStage,
    ShortcodeStage, SitemapStage, StaticAssetsStage, TemplateStage, WriteStage,
};

/// A stage in the document processing pipeline.
///
/// Stages transform documents sequentially. Each stage receives all documents
/// and can modify them in place before passing to the next stage.
pub trait Stage: Send + Sync {
    /// Unique name for this stage (used for insertion points).
    fn name(&self) -> &'static str;

    /// Process documents through this stage.
    fn process(
        &self,
        docs: &mut [ProcessingDocument],
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError>;
}

/// A stage that runs once after all documents are processed.
pub trait FinalizeStage: Send + Sync {
    /// Unique name for this stage.
    fn name(&self) -> &'static str;

    /// Run after every document has been processed and written.
    fn finalize(&self, docs: &[ProcessingDocument], ctx: &PipelineContext)
    -> Result<(), PipelineError>;
}

/// The document processing pipeline.
///
/// The default pipeline includes: shortcode → markdown → template → write,
/// followed by the site-wide finalize stages.
///
/// # Extension Points
///
/// ```ignore
/// pipeline.insert_after("shortcode", MyCustomStage);
/// pipeline.add_finalize_stage(RssFeedStage::new(config));
/// ```
pub struct Pipeline {
    /// Document processing stages (run for each document batch)
    stages: Vec<Box<dyn Stage>>,
    /// Build-wide stages (run once after all documents)
    finalize_stages: Vec<Box<dyn FinalizeStage>>,
}

impl Pipeline {
    /// Create an empty pipeline with no stages.
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            finalize_stages: Vec::new(),
        }
    }

    /// Create the default pipeline with standard stages.
    pub fn default_pipeline() -> Self {
        let mut pipeline = Self::new();
        pipeline
            .add_stage(ShortcodeStage)
            .add_stage(MarkdownStage)
            .add_stage(TemplateStage)
            .add_stage(WriteStage);
        pipeline
            .add_finalize_stage(IndexPageStage)
            .add_finalize_stage(PatternLibraryStage)
            .add_finalize_stage(StaticAssetsStage)
            .add_finalize_stage(HighlightCssStage)
            .add_finalize_stage(SearchIndexStage)
            .add_finalize_stage(SitemapStage);
        pipeline
    }

    /// Add a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Insert a stage before the named stage.
    ///
    /// # Panics
    ///
    /// Panics if no stage with the given name exists.
    #[allow(dead_code)]
    pub fn insert_before<S: Stage + 'static>(&mut self, name: &str, stage: S) -> &mut Self {
        let pos = self.position(name);
        self.stages.insert(pos, Box::new(stage));
        self
    }

    /// Insert a stage after the named stage.
    ///
    /// # Panics
    ///
    /// Panics if no stage with the given name exists.
    #[allow(dead_code)]
    pub fn insert_after<S: Stage + 'static>(&mut self, name: &str, stage: S) -> &mut Self {
        let pos = self.position(name);
        self.stages.insert(pos + 1, Box::new(stage));
        self
    }

    fn position(&self, name: &str) -> usize {
        self.stages
            .iter()
            .position(|s| s.name() == name)
            .unwrap_or_else(|| panic!("stage '{}' not found in pipeline", name))
    }

    /// Add a finalize stage (runs after all documents are processed).
    pub fn add_finalize_stage<S: FinalizeStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.finalize_stages.push(Box::new(stage));
        self
    }

    /// Run the pipeline on a set of documents.
    pub fn run(
        &self,
        docs: &mut [ProcessingDocument],
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        for stage in &self.stages {
            tracing::debug!(stage = stage.name(), documents = docs.len(), "running stage");
            stage.process(docs, ctx)?;
        }

        for stage in &self.finalize_stages {
            tracing::debug!(stage = stage.name(), "running finalize stage");
            stage.finalize(docs, ctx)?;
        }

        Ok(())
    }

    /// Get the names of all stages in order.
    #[allow(dead_code)]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Get the names of all finalize stages in order.
    #[allow(dead_code)]
    pub fn finalize_stage_names(&self) -> Vec<&'static str> {
        self.finalize_stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopStage;

    impl Stage for NoopStage {
        fn name(&self) -> &'static str {
            "noop"
        }

        fn process(
            &self,
            _docs: &mut [ProcessingDocument],
            _ctx: &PipelineContext,
        ) -> Result<(), PipelineError> {
            Ok(())
        }
    }

    #[test]
    fn test_default_stage_order() {
        let pipeline = Pipeline::default_pipeline();
        assert_eq!(
            pipeline.stage_names(),
            vec!["shortcode", "markdown", "template", "write"]
        );
        assert_eq!(
            pipeline.finalize_stage_names(),
            vec![
                "index",
                "pattern-library",
                "static",
                "highlight-css",
                "search-index",
                "sitemap"
            ]
        );
    }

    #[test]
    fn test_insert_before_and_after() {
        let mut pipeline = Pipeline::default_pipeline();
        pipeline.insert_after("shortcode", NoopStage);
        assert_eq!(
            pipeline.stage_names(),
            vec!["shortcode", "noop", "markdown", "template", "write"]
        );

        let mut pipeline = Pipeline::default_pipeline();
        pipeline.insert_before("shortcode", NoopStage);
        assert_eq!(pipeline.stage_names()[0], "noop");
    }

    #[test]
    #[should_panic(expected = "stage 'missing' not found")]
    fn test_insert_unknown_stage_panics() {
        Pipeline::new().insert_after("missing", NoopStage);
    }
}
