#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tempfile::TempDir;

/// Publish argv as old npm versions report it.
pub const PUBLISH_ARGV: &str = r#"{"remain":[],"cooked":["publish"],"original":["publish"]}"#;

/// Package fixture: a git repository with some committed files.
pub struct TestPackage {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestPackage {
    /// Create a repository and commit `tracked` files.
    ///
    /// Returns `None` when git is not installed.
    pub fn with_tracked(tracked: &[&str]) -> Result<Option<Self>> {
        if which::which("git").is_err() {
            return Ok(None);
        }
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().canonicalize()?;
        let package = Self { temp_dir, root };

        package.git(&["init", "-q"])?;
        for file in tracked {
            package.write(file, file)?;
        }
        package.git(&["add", "--all"])?;
        package.git(&["commit", "-q", "--allow-empty", "-m", "initial"])?;
        Ok(Some(package))
    }

    /// Write a file relative to the package root.
    pub fn write(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// The binary, run in the package with a clean npm environment.
    pub fn command(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("clean-publish")?;
        cmd.current_dir(&self.root)
            .env("HOME", self.temp_dir.path())
            .env_remove("npm_config_argv")
            .env_remove("npm_command")
            .env_remove("CLEAN_PUBLISH_CONFIG")
            .env_remove("RUST_LOG");
        Ok(cmd)
    }

    /// The binary as a publish hook would run it.
    pub fn publish_command(&self) -> Result<Command> {
        let mut cmd = self.command()?;
        cmd.env("npm_config_argv", PUBLISH_ARGV);
        Ok(cmd)
    }

    fn git(&self, args: &[&str]) -> Result<()> {
        let status = std::process::Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .env("GIT_AUTHOR_NAME", "Test")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_NAME", "Test")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        anyhow::ensure!(status.success(), "git {args:?} failed");
        Ok(())
    }
}
