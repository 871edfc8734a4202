#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # clean-publish - Pre-publish Untracked File Guard
//!
//! clean-publish runs as a package-manager publish hook. It compares the files
//! that would be packed against the files git tracks at `HEAD` and walks the
//! operator through a short dialogue when something untracked would leak into
//! the published artifact.
//!
//! ## Architecture
//!
//! - [`ignore_file`]: ignore-file parsing and gitignore-style path filtering
//! - [`scanner`]: working tree enumeration
//! - [`vcs`]: tracked file listing from git
//! - [`reconcile`]: set difference between found and tracked files
//! - [`prompt`]: the interactive confirmation state machine
//! - [`lifecycle`]: publish lifecycle detection
//! - [`commands`]: command implementations wiring the pieces together
//! - [`config`]: configuration loading and validation
//! - [`output`]: coloured status output on stderr
//!
//! ## Example Usage
//!
//! ```no_run
//! use clean_publish::PublishContext;
//!
//! # fn main() -> anyhow::Result<()> {
//! let ctx = PublishContext::new(".".into(), None)?;
//! let stdin = std::io::stdin();
//! let code = clean_publish::commands::check::run_check(&ctx, stdin.lock(), std::io::stderr())?;
//! std::process::exit(code);
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Command implementations.
pub mod commands;

/// Configuration parsing, validation, and management.
pub mod config;

/// Typed failures of external collaborators (enumeration, git).
pub mod errors;

/// Ignore-file parsing and pattern filtering.
pub mod ignore_file;

/// Publish lifecycle detection.
pub mod lifecycle;

/// Output formatting for status lines.
pub mod output;

/// Interactive confirmation dialogue.
pub mod prompt;

/// Found-versus-tracked reconciliation.
pub mod reconcile;

/// Working tree enumeration.
pub mod scanner;

/// Tracked file listing from git.
pub mod vcs;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Current version of the clean-publish binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit code when the tool does not apply to this invocation.
pub const NOT_APPLICABLE_CODE: i32 = 0;

/// Exit code for a passing check and for every dialogue ending.
///
/// The pass path and all dialogue outcomes share this code.
pub const PASS_CODE: i32 = 1;

/// Central context for a clean-publish run.
///
/// Holds the working directory being published and the loaded configuration.
#[derive(Debug, Clone)]
pub struct PublishContext {
    /// Package root that would be published.
    pub root: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,
}

impl PublishContext {
    /// Creates a context for `root`, loading configuration from the explicit
    /// path if given, otherwise from the standard lookup locations.
    ///
    /// # Errors
    /// Returns an error if the root cannot be resolved or the configuration
    /// file exists but cannot be read or is invalid.
    pub fn new(root: PathBuf, config_path: Option<&Path>) -> Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("Failed to resolve working directory: {}", root.display()))?;
        let config = config::Config::discover(&root, config_path)?;
        Ok(Self { root, config })
    }

    /// Creates a context with an explicit configuration, for tests.
    #[must_use]
    pub fn with_config(root: PathBuf, config: config::Config) -> Self {
        Self { root, config }
    }

    /// Path of the version-control ignore file.
    #[must_use]
    pub fn vcs_ignore_path(&self) -> PathBuf {
        self.root.join(&self.config.ignore.vcs_file)
    }

    /// Path of the package-manager ignore file.
    #[must_use]
    pub fn package_ignore_path(&self) -> PathBuf {
        self.root.join(&self.config.ignore.package_file)
    }
}
