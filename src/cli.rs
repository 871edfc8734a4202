//! Command-line interface definitions for clean-publish.
//!
//! The CLI definitions are shared between the main binary and build tools
//! (like xtask) for man page generation.
//!
//! Note: Field-level documentation is provided via clap attributes,
//! so we allow missing_docs for this module to avoid redundant documentation.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for clean-publish.
#[derive(Parser, Debug)]
#[command(
    name = "clean-publish",
    version = crate::VERSION,
    about = "Warn about files that are not checked-in to git before publishing",
    long_about = "Run as a prepublish hook: lists files that would be published but are not \
                  tracked by git, and asks what to do about them"
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `check`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Package directory to check
    #[arg(short = 'C', long = "dir", global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Configuration file to use instead of the default lookup
    #[arg(long, global = true, env = "CLEAN_PUBLISH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// All available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare the files to be published against git (default)
    Check {
        /// Run even when not invoked from a publish lifecycle hook
        #[arg(short, long)]
        force: bool,
    },

    /// Print the patterns parsed from an ignore file
    Patterns {
        /// Ignore file to read (defaults to the package ignore file)
        file: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
