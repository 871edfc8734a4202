//! Ignore files (`.gitignore`, `.npmignore`) and gitignore-style filtering.
//!
//! Parsing here is deliberately simple: `#` starts a comment anywhere on a
//! line, lines are trimmed and blank lines are dropped. Pattern semantics
//! (anchoring, `**`, negation) come from the `ignore` crate.

use anyhow::{Context, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;
use tracing::debug;

/// Parse ignore-file contents into an ordered list of patterns.
#[must_use]
pub fn parse_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| match line.find('#') {
            Some(idx) => &line[..idx],
            None => line,
        })
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read and parse an ignore file, returning `None` if it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn read_patterns(path: &Path) -> Result<Option<Vec<String>>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ignore file: {}", path.display()))?;
    let patterns = parse_patterns(&content);
    debug!(path = %path.display(), count = patterns.len(), "parsed ignore file");
    Ok(Some(patterns))
}

/// A compiled pattern list rooted at the package directory.
pub struct PatternFilter {
    /// Compiled matcher
    matcher: Gitignore,
}

impl PatternFilter {
    /// Compile `patterns` relative to `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is not a valid glob.
    pub fn new<S: AsRef<str>>(root: &Path, patterns: &[S]) -> Result<Self> {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in patterns {
            let pattern = pattern.as_ref();
            builder
                .add_line(None, pattern)
                .with_context(|| format!("Invalid ignore pattern: {pattern}"))?;
        }
        let matcher = builder
            .build()
            .context("Failed to compile ignore patterns")?;
        Ok(Self { matcher })
    }

    /// Whether a relative file path is ignored, directly or through one of
    /// its parent directories.
    #[must_use]
    pub fn is_ignored(&self, relative: &str) -> bool {
        self.matcher
            .matched_path_or_any_parents(relative, false)
            .is_ignore()
    }

    /// Keep only the paths that no pattern ignores, preserving order.
    #[must_use]
    pub fn retain_unmatched(&self, paths: &[String]) -> Vec<String> {
        paths
            .iter()
            .filter(|path| !self.is_ignored(path))
            .cloned()
            .collect()
    }
}
