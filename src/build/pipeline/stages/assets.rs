//! Static asset stages.

use std::path::Path;

use tracing::{debug, warn};

use crate::build::paths::{copy_dir, write_output};
use crate::build::pipeline::{FinalizeStage, PipelineContext, PipelineError, ProcessingDocument};
use crate::theme;

/// Output directory for static assets, relative to the site root.
const STATIC_OUTPUT: &str = "static";

const HIGHLIGHT_CSS_PATH: &str = "static/css/highlight.css";

/// Populates `<output>/static`, replacing whatever was there.
///
/// The theme's scripts are written first, then the configured static
/// directory is copied over them, so a site file at the same path wins.
pub struct StaticAssetsStage;

impl FinalizeStage for StaticAssetsStage {
    fn name(&self) -> &'static str {
        "static"
    }

    fn finalize(
        &self,
        _docs: &[ProcessingDocument],
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        let dest = ctx.output_dir.join(STATIC_OUTPUT);
        if dest.exists() {
            std::fs::remove_dir_all(&dest)?;
        }

        for (asset, contents) in theme::ASSETS {
            let path = Path::new(STATIC_OUTPUT).join(asset);
            write_output(ctx.output_dir, &path, contents)
                .map_err(|e| PipelineError::write(&path, e))?;
        }
        debug!(files = theme::ASSETS.len(), "wrote theme assets");

        let source = &ctx.config.static_dir;
        if !source.is_dir() {
            debug!(path = %source.display(), "no static directory, skipping");
            return Ok(());
        }

        let copied = copy_dir(source, &dest)?;
        debug!(files = copied, "copied static files");

        Ok(())
    }
}

/// Writes the stylesheet for highlighted code blocks.
pub struct HighlightCssStage;

impl FinalizeStage for HighlightCssStage {
    fn name(&self) -> &'static str {
        "highlight-css"
    }

    fn finalize(
        &self,
        _docs: &[ProcessingDocument],
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        let Some(css) = ctx.highlighter.css() else {
            warn!(
                theme = ctx.highlighter.theme_name(),
                "unknown highlight theme, code blocks will be unstyled"
            );
            return Ok(());
        };

        let path = Path::new(HIGHLIGHT_CSS_PATH);
        write_output(ctx.output_dir, path, &css)
            .map_err(|e| PipelineError::write(path, e))?;
        Ok(())
    }
}
