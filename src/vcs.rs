//! Tracked file listing from git.
//!
//! The tracked set is whatever `git ls-tree --full-tree -r HEAD` reports for
//! the repository containing the package root. Paths are taken verbatim
//! from git, so for a package that lives in a subdirectory of its repository
//! they carry the subdirectory prefix.

use crate::errors::CollaboratorError;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Exit code used when the git binary itself cannot be found.
pub const GIT_NOT_FOUND_CODE: i32 = 127;

/// List every path in the `HEAD` tree of the repository at `root`.
///
/// # Errors
///
/// Returns a [`CollaboratorError`] if git cannot be located or `ls-tree`
/// exits non-zero, and a plain error if its output is not valid UTF-8.
pub fn tracked_files(root: &Path, git_program: &str) -> Result<HashSet<String>> {
    let git = which::which(git_program).map_err(|e| CollaboratorError {
        command: "git ls-tree",
        code: GIT_NOT_FOUND_CODE,
        detail: format!("{git_program}: {e}"),
    })?;

    let output = Command::new(&git)
        .args(["ls-tree", "--full-tree", "-r", "-z", "HEAD"])
        .current_dir(root)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("Failed to run {}", git.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CollaboratorError::ls_tree(output.status.code().unwrap_or(1), &stderr).into());
    }

    let stdout = String::from_utf8(output.stdout).context("git ls-tree output is not UTF-8")?;
    let tracked = parse_ls_tree(&stdout);
    debug!(count = tracked.len(), "listed tracked files");
    Ok(tracked)
}

/// Parse NUL-separated `git ls-tree -z` records into their paths.
///
/// Each record is `<mode> SP <type> SP <object> TAB <path>`; records without
/// a tab are skipped.
#[must_use]
pub fn parse_ls_tree(output: &str) -> HashSet<String> {
    output
        .split('\0')
        .filter_map(|record| record.split_once('\t'))
        .map(|(_, path)| path.to_string())
        .collect()
}
