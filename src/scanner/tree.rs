use crate::errors::CollaboratorError;
use crate::ignore_file::PatternFilter;
use anyhow::Result;
use std::path::{Component, Path};
use tracing::debug;
use walkdir::WalkDir;

/// List every regular file under `root` that could end up in the package.
///
/// Paths are relative to `root` with `/` separators, in walk order (entries
/// sorted by file name within each directory). Dotfiles and anything under a
/// dot-directory are skipped, then paths matched by `vcs_patterns` are
/// removed.
///
/// # Errors
///
/// Returns a [`CollaboratorError`] if any part of the tree cannot be read.
pub fn enumerate_files(root: &Path, vcs_patterns: &[String]) -> Result<Vec<String>> {
    let mut found = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // Never descend into dot-directories such as .git
            e.depth() == 0
                || !e
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.starts_with('.'))
        });

    for entry in walker {
        let entry = entry
            .map_err(|err| CollaboratorError::enumeration(err.io_error(), err.to_string()))?;

        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = relative_slash_path(relative);
        if is_dotfile_path(&relative) {
            continue;
        }
        found.push(relative);
    }

    let total = found.len();
    if !vcs_patterns.is_empty() {
        let filter = PatternFilter::new(root, vcs_patterns)?;
        found = filter.retain_unmatched(&found);
    }
    debug!(
        total,
        kept = found.len(),
        "enumerated working tree"
    );

    Ok(found)
}

/// Join the normal components of a relative path with `/`.
#[must_use]
pub fn relative_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether any segment of a slash-separated path starts with `.`.
#[must_use]
pub fn is_dotfile_path(path: &str) -> bool {
    path.split('/').any(|segment| segment.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, relative).unwrap();
    }

    #[test]
    fn test_enumerate_nested_files_sorted() -> Result<()> {
        let temp = TempDir::new()?;
        let root = temp.path();
        touch(root, "package.json");
        touch(root, "lib/b.js");
        touch(root, "lib/a.js");
        touch(root, "README.md");

        let found = enumerate_files(root, &[])?;
        assert_eq!(found, vec!["README.md", "lib/a.js", "lib/b.js", "package.json"]);
        Ok(())
    }

    #[test]
    fn test_skips_dotfiles_and_dot_directories() -> Result<()> {
        let temp = TempDir::new()?;
        let root = temp.path();
        touch(root, "index.js");
        touch(root, ".npmignore");
        touch(root, ".git/HEAD");
        touch(root, "lib/.hidden");
        touch(root, "lib/.cache/data");

        let found = enumerate_files(root, &[])?;
        assert_eq!(found, vec!["index.js"]);
        Ok(())
    }

    #[test]
    fn test_applies_vcs_patterns() -> Result<()> {
        let temp = TempDir::new()?;
        let root = temp.path();
        touch(root, "index.js");
        touch(root, "node_modules/dep/index.js");
        touch(root, "debug.log");

        let patterns = vec!["node_modules/".to_string(), "*.log".to_string()];
        let found = enumerate_files(root, &patterns)?;
        assert_eq!(found, vec!["index.js"]);
        Ok(())
    }

    #[test]
    fn test_directories_are_not_listed() -> Result<()> {
        let temp = TempDir::new()?;
        let root = temp.path();
        fs::create_dir_all(root.join("empty/dir"))?;

        assert!(enumerate_files(root, &[])?.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_root_is_collaborator_failure() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");

        let err = enumerate_files(&missing, &[]).unwrap_err();
        let failure = err.downcast_ref::<CollaboratorError>().unwrap();
        assert_eq!(failure.command, "find");
        assert_ne!(failure.code, 0);
    }

    #[test]
    fn test_is_dotfile_path() {
        assert!(is_dotfile_path(".env"));
        assert!(is_dotfile_path("lib/.DS_Store"));
        assert!(is_dotfile_path("a/.b/c.js"));
        assert!(!is_dotfile_path("lib/file.name.js"));
    }

    #[test]
    fn test_relative_slash_path() {
        let path = Path::new("a").join("b").join("c.txt");
        assert_eq!(relative_slash_path(&path), "a/b/c.txt");
    }
}
