pub mod parser;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-package configuration file name, looked up in the package root.
pub const LOCAL_CONFIG_FILE: &str = ".clean-publish.toml";

/// User configuration path relative to the home directory.
pub const USER_CONFIG_PATH: &str = ".config/clean-publish/config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub ignore: IgnoreConfig,

    #[serde(default)]
    pub lifecycle: LifecycleConfig,

    #[serde(default)]
    pub git: GitConfig,
}

/// Names of the two ignore files, relative to the package root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct IgnoreConfig {
    #[serde(default = "default_vcs_file")]
    pub vcs_file: String,
    #[serde(default = "default_package_file")]
    pub package_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LifecycleConfig {
    /// Only run when the package manager reports a `publish` invocation
    #[serde(default = "default_require_publish")]
    pub require_publish: bool,
    /// Environment variable carrying the package manager's argv as JSON
    #[serde(default = "default_argv_env")]
    pub argv_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GitConfig {
    #[serde(default = "default_git_program")]
    pub program: String,
}

fn default_vcs_file() -> String {
    ".gitignore".to_string()
}

fn default_package_file() -> String {
    ".npmignore".to_string()
}

const fn default_require_publish() -> bool {
    true
}

fn default_argv_env() -> String {
    "npm_config_argv".to_string()
}

fn default_git_program() -> String {
    "git".to_string()
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            vcs_file: default_vcs_file(),
            package_file: default_package_file(),
        }
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            require_publish: default_require_publish(),
            argv_env: default_argv_env(),
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: default_git_program(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML,
    /// or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        parser::parse_config_file(path)
    }

    /// Find and load the configuration for a package root.
    ///
    /// An explicit path must exist. Otherwise the package-local file is tried,
    /// then the user file; if neither exists the defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit path is missing, or a discovered file
    /// cannot be parsed.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            return Self::load(path);
        }

        for candidate in Self::candidate_paths(root) {
            if candidate.is_file() {
                debug!(path = %candidate.display(), "loading configuration");
                return Self::load(&candidate);
            }
        }

        debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Lookup order for configuration files.
    fn candidate_paths(root: &Path) -> Vec<PathBuf> {
        let mut paths = vec![root.join(LOCAL_CONFIG_FILE)];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(USER_CONFIG_PATH));
        }
        paths
    }
}
