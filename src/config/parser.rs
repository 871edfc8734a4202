use super::Config;
use anyhow::{Context, Result};
use std::path::Path;

pub fn parse_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

pub fn parse_config_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse TOML config")?;

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<()> {
    for (key, name) in [
        ("ignore.vcs_file", &config.ignore.vcs_file),
        ("ignore.package_file", &config.ignore.package_file),
    ] {
        if name.trim().is_empty() {
            anyhow::bail!("{key} must not be empty");
        }
        if name.contains('/') || name.contains('\\') {
            anyhow::bail!("{key} must be a file name in the package root, got '{name}'");
        }
    }

    if config.lifecycle.argv_env.trim().is_empty() {
        anyhow::bail!("lifecycle.argv_env must not be empty");
    }

    if config.git.program.trim().is_empty() {
        anyhow::bail!("git.program must not be empty");
    }

    Ok(())
}
