use std::path::{Path, PathBuf};

use tracing::debug;

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("content path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("content path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read directory entry in {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Find every Markdown file below `content_dir`.
///
/// Returns paths relative to `content_dir`, sorted. Hidden files and
/// directories are skipped.
pub fn discover_documents(content_dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    if !content_dir.exists() {
        return Err(SourceError::PathNotFound(content_dir.to_path_buf()));
    }
    if !content_dir.is_dir() {
        return Err(SourceError::NotADirectory(content_dir.to_path_buf()));
    }

    let mut documents = Vec::new();
    walk_directory(content_dir, &PathBuf::new(), &mut documents)?;
    documents.sort();
    debug!(count = documents.len(), dir = %content_dir.display(), "discovered documents");
    Ok(documents)
}

/// Recursively walk a directory and collect markdown files.
fn walk_directory(
    dir: &Path,
    relative_path: &Path,
    documents: &mut Vec<PathBuf>,
) -> Result<(), SourceError> {
    let entries = std::fs::read_dir(dir).map_err(|e| SourceError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| SourceError::ReadEntry {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        let file_name = entry.file_name();
        if file_name.to_string_lossy().starts_with('.') {
            continue;
        }

        let item_relative_path = relative_path.join(&file_name);

        if path.is_dir() {
            walk_directory(&path, &item_relative_path, documents)?;
        } else if path.is_file() && is_markdown(&path) {
            documents.push(item_relative_path);
        }
    }

    Ok(())
}

fn is_markdown(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("md")
}
