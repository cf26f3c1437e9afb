//! Markdown file discovery.

use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;
use mdwiki_renderer::IndexError;

/// File extensions treated as Markdown pages.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Find Markdown files below `source_dir`.
///
/// Returns `(reference, path)` pairs where the reference is the path
/// relative to `source_dir` with forward slashes. Entries that cannot be
/// walked are logged and skipped.
pub(crate) fn scan(source_dir: &Path) -> Result<Vec<(String, PathBuf)>, IndexError> {
    let metadata = std::fs::metadata(source_dir).map_err(|source| IndexError::Io {
        path: source_dir.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(IndexError::Other(format!(
            "Source path is not a directory: {}",
            source_dir.display()
        )));
    }

    let walker = WalkBuilder::new(source_dir)
        .hidden(true)
        .git_ignore(true)
        .require_git(false)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read directory entry, skipping");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) || !is_markdown(entry.path()) {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(source_dir) {
            files.push((reference(relative), entry.path().to_path_buf()));
        }
    }
    Ok(files)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|md| ext.eq_ignore_ascii_case(md))
        })
}

/// Forward-slash reference for a relative path.
fn reference(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown(Path::new("guide.md")));
        assert!(is_markdown(Path::new("GUIDE.MD")));
        assert!(is_markdown(Path::new("notes.markdown")));
        assert!(!is_markdown(Path::new("image.png")));
        assert!(!is_markdown(Path::new("md")));
    }

    #[test]
    fn test_reference_uses_forward_slashes() {
        assert_eq!(reference(Path::new("a/b/c.md")), "a/b/c.md");
        assert_eq!(reference(Path::new("./a.md")), "a.md");
    }

    #[test]
    fn test_scan_file_is_not_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.md");
        fs::write(&file, "x").unwrap();
        let err = scan(&file).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_scan_nested() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/b/deep.md"), "x").unwrap();
        fs::write(dir.path().join("a/readme.txt"), "x").unwrap();

        let files = scan(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "a/b/deep.md");
        assert_eq!(files[0].1, dir.path().join("a/b/deep.md"));
    }
}
