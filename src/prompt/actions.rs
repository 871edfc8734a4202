use super::{Action, Host};
use crate::ignore_file::parse_patterns;
use crate::output;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::Builder;
use tracing::debug;

/// Header written above generated entries.
pub const GENERATED_HEADER: &str = "# Not checked-in to git, added by clean-publish";

/// [`Host`] backed by the package ignore file on disk.
pub struct IgnoreFileHost {
    /// Full path of the package ignore file
    path: PathBuf,
}

impl IgnoreFileHost {
    /// Act on the ignore file at `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// File name for messages.
    fn display_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }

    /// Replace the ignore file with one listing `untracked`.
    fn create(&self, untracked: &[String]) -> Result<()> {
        let entries = to_patterns(untracked);
        let mut content = format!("{GENERATED_HEADER}\n");
        for entry in &entries {
            content.push_str(entry);
            content.push('\n');
        }
        write_atomic(&self.path, &content)?;
        output::success(&format!(
            "Wrote {} pattern{} to {}",
            entries.len(),
            if entries.len() == 1 { "" } else { "s" },
            self.display_name()
        ));
        Ok(())
    }

    /// Append the entries of `untracked` that the ignore file does not list yet.
    fn merge(&self, untracked: &[String]) -> Result<()> {
        let existing = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let content = merged_content(&existing, untracked);

        match content {
            Some((content, added)) => {
                write_atomic(&self.path, &content)?;
                output::success(&format!(
                    "Added {} pattern{} to {}",
                    added,
                    if added == 1 { "" } else { "s" },
                    self.display_name()
                ));
            }
            None => {
                output::info(&format!(
                    "{} already lists every file",
                    self.display_name()
                ));
            }
        }
        Ok(())
    }
}

impl Host for IgnoreFileHost {
    fn package_ignore_exists(&self) -> bool {
        self.path.exists()
    }

    fn perform(&mut self, action: Action, untracked: &[String]) -> Result<()> {
        debug!(?action, path = %self.path.display(), "performing action");
        match action {
            Action::CreateIgnore => self.create(untracked),
            Action::MergeIgnore => self.merge(untracked),
            Action::IgnoreOnce => {
                output::info(&format!(
                    "{} left unchanged; {} file{} ignored for this run only",
                    self.display_name(),
                    untracked.len(),
                    if untracked.len() == 1 { "" } else { "s" }
                ));
                Ok(())
            }
        }
    }
}

/// Anchored, escaped ignore pattern for a relative path.
///
/// Returns `None` for paths that cannot be expressed because they contain
/// `#`, which the ignore-file reader treats as a comment.
#[must_use]
pub fn pattern_for(path: &str) -> Option<String> {
    if path.contains('#') {
        return None;
    }
    let mut pattern = String::with_capacity(path.len() + 1);
    pattern.push('/');
    for ch in path.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '\\' | '!') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    Some(pattern)
}

/// Patterns for every expressible path, warning about the rest.
fn to_patterns(untracked: &[String]) -> Vec<String> {
    untracked
        .iter()
        .filter_map(|path| {
            let pattern = pattern_for(path);
            if pattern.is_none() {
                output::warning(&format!("Cannot add '{path}': '#' starts a comment"));
            }
            pattern
        })
        .collect()
}

/// New file content after merging, and how many entries were added.
///
/// Returns `None` when every path is already listed, either as its anchored
/// pattern or verbatim.
fn merged_content(existing: &str, untracked: &[String]) -> Option<(String, usize)> {
    let listed: HashSet<String> = parse_patterns(existing).into_iter().collect();
    let additions: Vec<String> = untracked
        .iter()
        .filter(|path| !listed.contains(path.as_str()))
        .cloned()
        .collect::<Vec<_>>();
    let additions: Vec<String> = to_patterns(&additions)
        .into_iter()
        .filter(|pattern| !listed.contains(pattern))
        .collect();

    if additions.is_empty() {
        return None;
    }

    let mut content = existing.to_string();
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    if !content.is_empty() {
        content.push('\n');
    }
    content.push_str(GENERATED_HEADER);
    content.push('\n');
    for pattern in &additions {
        content.push_str(pattern);
        content.push('\n');
    }
    Some((content, additions.len()))
}

/// Write `content` to `path` through a temporary file in the same directory.
///
/// An existing file keeps its permissions. A new file gets the same mode a
/// plain create would, after the process umask.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .with_context(|| format!("{} has no parent directory", path.display()))?;
    let existing = fs::metadata(path).ok().map(|meta| meta.permissions());

    let mut builder = Builder::new();
    builder.prefix(".clean-publish").suffix(".tmp");
    if existing.is_none() {
        default_mode(&mut builder);
    }
    let mut temp = builder
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    temp.write_all(content.as_bytes())?;
    temp.flush()?;
    if let Some(permissions) = existing {
        temp.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("Failed to copy permissions of {}", path.display()))?;
    }
    temp.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Files created through `builder` get mode 0666 before the umask.
#[cfg(unix)]
fn default_mode(builder: &mut Builder<'_, '_>) {
    use std::os::unix::fs::PermissionsExt;
    builder.permissions(fs::Permissions::from_mode(0o666));
}

#[cfg(not(unix))]
fn default_mode(_builder: &mut Builder<'_, '_>) {}
