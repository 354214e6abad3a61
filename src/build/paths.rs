//! Path and URL conversion utilities.
//!
//! This module handles conversions between:
//! - Source file paths (relative to the content directory)
//! - Output file paths (relative to the output directory)
//! - URL paths (where pages are served)

use std::path::{Component, Path, PathBuf};

/// Convert a markdown file path to its output path.
///
/// Index files render in place; every other page gets its own directory so
/// URLs stay extension-free.
///
/// # Examples
/// ```ignore
/// output_path_for_source("index.md") => "index.html"
/// output_path_for_source("guides/index.md") => "guides/index.html"
/// output_path_for_source("guides/setup.md") => "guides/setup/index.html"
/// ```
pub fn output_path_for_source(source_path: &Path) -> PathBuf {
    let parent = source_path.parent().unwrap_or(Path::new(""));
    match source_path.file_stem().and_then(|s| s.to_str()) {
        Some("index") | None => parent.join("index.html"),
        Some(stem) => parent.join(stem).join("index.html"),
    }
}

/// Convert an output path to the URL of its directory.
///
/// # Examples
/// ```ignore
/// url_for_output("index.html") => "/"
/// url_for_output("guides/setup/index.html") => "/guides/setup/"
/// ```
pub fn url_for_output(output_path: &Path) -> String {
    let segments: Vec<String> = output_path
        .parent()
        .into_iter()
        .flat_map(|p| p.components())
        .filter_map(|c| match c {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", segments.join("/"))
    }
}

/// Write a file below the output directory, creating parent directories.
pub fn write_output(output_dir: &Path, relative: &Path, contents: &str) -> std::io::Result<PathBuf> {
    let path = output_dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, contents)?;
    Ok(path)
}

/// Recursively copy a directory, returning the number of files copied.
pub fn copy_dir(source: &Path, dest: &Path) -> std::io::Result<usize> {
    std::fs::create_dir_all(dest)?;
    let mut copied = 0;
    for entry in std::fs::read_dir(source)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_dir(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_index() {
        assert_eq!(
            output_path_for_source(Path::new("index.md")),
            PathBuf::from("index.html")
        );
        assert_eq!(
            output_path_for_source(Path::new("guides/index.md")),
            PathBuf::from("guides/index.html")
        );
    }

    #[test]
    fn test_output_path_page() {
        assert_eq!(
            output_path_for_source(Path::new("about.md")),
            PathBuf::from("about/index.html")
        );
        assert_eq!(
            output_path_for_source(Path::new("guides/deep/setup.md")),
            PathBuf::from("guides/deep/setup/index.html")
        );
    }

    #[test]
    fn test_url_for_output() {
        assert_eq!(url_for_output(Path::new("index.html")), "/");
        assert_eq!(url_for_output(Path::new("about/index.html")), "/about/");
        assert_eq!(
            url_for_output(Path::new("guides/setup/index.html")),
            "/guides/setup/"
        );
    }

    #[test]
    fn test_write_output_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_output(dir.path(), Path::new("a/b/index.html"), "<p>x</p>").unwrap();
        assert_eq!(path, dir.path().join("a/b/index.html"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<p>x</p>");
    }

    #[test]
    fn test_copy_dir_recursive() {
        let src = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(src.path().join("css")).unwrap();
        std::fs::write(src.path().join("app.js"), "js").unwrap();
        std::fs::write(src.path().join("css/site.css"), "css").unwrap();

        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("static");
        assert_eq!(copy_dir(src.path(), &dest).unwrap(), 2);
        assert_eq!(std::fs::read_to_string(dest.join("css/site.css")).unwrap(), "css");
    }
}
