//! Found-versus-tracked reconciliation.

use crate::ignore_file::PatternFilter;
use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// What the comparison concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Every file on disk is tracked.
    Clean,
    /// Some files are untracked, but the package ignore file covers all of them.
    Covered,
    /// Untracked files would be published; the dialogue must run.
    Untracked(Vec<String>),
}

impl Verdict {
    /// Whether the check passes without asking the operator anything.
    #[must_use]
    pub const fn passes(&self) -> bool {
        matches!(self, Self::Clean | Self::Covered)
    }
}

/// `found` minus `tracked`, in `found` order.
#[must_use]
pub fn reconcile<S: std::hash::BuildHasher>(
    found: &[String],
    tracked: &HashSet<String, S>,
) -> Vec<String> {
    found
        .iter()
        .filter(|path| !tracked.contains(path.as_str()))
        .cloned()
        .collect()
}

/// Reconcile and then consult the package ignore patterns, if the package
/// ignore file exists.
///
/// The untracked list carried by [`Verdict::Untracked`] is the full list,
/// including files the package ignore file already covers.
///
/// # Errors
///
/// Returns an error if the package ignore patterns cannot be compiled.
pub fn conclude<S: std::hash::BuildHasher>(
    root: &Path,
    found: &[String],
    tracked: &HashSet<String, S>,
    package_patterns: Option<&[String]>,
) -> Result<Verdict> {
    let untracked = reconcile(found, tracked);
    debug!(
        found = found.len(),
        tracked = tracked.len(),
        untracked = untracked.len(),
        "reconciled"
    );

    if untracked.is_empty() {
        return Ok(Verdict::Clean);
    }

    if let Some(patterns) = package_patterns {
        let filter = PatternFilter::new(root, patterns)?;
        let remaining = filter.retain_unmatched(&untracked);
        debug!(remaining = remaining.len(), "applied package ignore patterns");
        if remaining.is_empty() {
            return Ok(Verdict::Covered);
        }
    }

    Ok(Verdict::Untracked(untracked))
}
