use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::SiteConfig;

use super::document::{Document, DocumentError};
use super::highlight::SyntaxHighlighter;
use super::markdown::{MarkdownError, PulldownMarkdown};
use super::pipeline::{Pipeline, PipelineContext, PipelineError, ProcessingDocument, SiteShortcodes};
use super::render::{RenderError, Renderer, SiteContext};
use super::shortcode::RegistryError;
use super::source::{SourceError, discover_documents};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("markdown error: {0}")]
    Markdown(#[from] MarkdownError),

    #[error("component registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct BuildResult {
    pub output_dir: PathBuf,
    pub documents: usize,
}

pub struct Builder {
    config: SiteConfig,
    /// Directory of Markdown sources
    content_dir: PathBuf,
    /// Directory the site is written to
    output_dir: PathBuf,
}

impl Builder {
    pub fn new(config: SiteConfig, content_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            config,
            content_dir,
            output_dir,
        }
    }

    pub fn build(&self) -> Result<BuildResult, BuildError> {
        self.build_with(&Pipeline::default_pipeline())
    }

    /// Build the site through a custom pipeline.
    pub fn build_with(&self, pipeline: &Pipeline) -> Result<BuildResult, BuildError> {
        // Step 1: Discover and load documents
        let sources = discover_documents(&self.content_dir)?;
        println!(
            "Found {} Markdown file(s) in {}",
            sources.len(),
            self.content_dir.display()
        );

        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let documents = sources
            .iter()
            .map(|path| Document::load(&self.content_dir, path, &today))
            .collect::<Result<Vec<_>, _>>()?;
        warn_on_collisions(&documents);

        // Step 2: Set up rendering
        let highlighter = SyntaxHighlighter::new(&self.config.highlight_theme);
        let renderer = Renderer::new(self.config.templates_dir.as_deref(), &highlighter)?;
        let shortcodes: SiteShortcodes = SiteShortcodes::new(&renderer)?;
        let markdown = PulldownMarkdown::new(&self.config.markdown, highlighter.clone())?;
        let site = SiteContext::from(&self.config);

        // Step 3: Run the pipeline
        std::fs::create_dir_all(&self.output_dir)?;
        let ctx = PipelineContext {
            output_dir: &self.output_dir,
            config: &self.config,
            site: &site,
            renderer: &renderer,
            shortcodes: &shortcodes,
            markdown: &markdown,
            highlighter: &highlighter,
        };

        let mut docs: Vec<ProcessingDocument> =
            documents.into_iter().map(ProcessingDocument::new).collect();
        pipeline.run(&mut docs, &ctx)?;

        info!(documents = docs.len(), output = %self.output_dir.display(), "build complete");

        Ok(BuildResult {
            output_dir: self.output_dir.clone(),
            documents: docs.len(),
        })
    }
}

/// Warn when two sources render to the same file; the later one wins.
fn warn_on_collisions(documents: &[Document]) {
    let mut seen: HashMap<&Path, &Path> = HashMap::new();
    for doc in documents {
        if let Some(previous) = seen.insert(&doc.output_path, &doc.source_path) {
            warn!(
                output = %doc.output_path.display(),
                first = %previous.display(),
                second = %doc.source_path.display(),
                "two pages render to the same output file"
            );
        }
    }
}
