//! Publish lifecycle detection.
//!
//! npm exposes how it was invoked through the environment of lifecycle
//! scripts. Older npm versions set `npm_config_argv` to a JSON document whose
//! `original` array holds the command line; newer versions set
//! `npm_command` instead.

use crate::config::LifecycleConfig;
use serde::Deserialize;
use tracing::debug;

/// Environment variable newer npm versions set to the running command.
pub const NPM_COMMAND_ENV: &str = "npm_command";

/// How the package manager invoked us, as far as the environment tells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Running inside `publish`.
    Publish,
    /// Running inside some other command (`install`, `pack`, ...).
    Other(String),
    /// No usable signal: variable missing or not parseable.
    Unknown,
}

/// The part of `npm_config_argv` we care about.
#[derive(Debug, Deserialize)]
struct NpmArgv {
    /// Command line as originally typed
    #[serde(default)]
    original: Vec<String>,
}

/// Work out the invocation from environment lookups.
pub fn detect<F>(config: &LifecycleConfig, lookup: F) -> Invocation
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(&config.argv_env) {
        return match serde_json::from_str::<NpmArgv>(&raw) {
            Ok(argv) if argv.original.iter().any(|arg| arg == "publish") => Invocation::Publish,
            Ok(argv) => Invocation::Other(argv.original.join(" ")),
            Err(e) => {
                debug!(error = %e, var = %config.argv_env, "unparseable argv");
                Invocation::Unknown
            }
        };
    }

    match lookup(NPM_COMMAND_ENV) {
        Some(command) if command == "publish" => Invocation::Publish,
        Some(command) => Invocation::Other(command),
        None => Invocation::Unknown,
    }
}

/// Detect from the process environment.
#[must_use]
pub fn detect_from_env(config: &LifecycleConfig) -> Invocation {
    detect(config, |name| std::env::var(name).ok())
}

/// Whether the check should run for this invocation.
///
/// Without any signal it never runs. With a signal that is not `publish` it
/// runs only when the configuration does not require a publish.
#[must_use]
pub fn should_run(invocation: &Invocation, config: &LifecycleConfig) -> bool {
    match invocation {
        Invocation::Publish => true,
        Invocation::Other(_) => !config.require_publish,
        Invocation::Unknown => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_publish_from_argv() {
        let config = LifecycleConfig::default();
        let vars = env(&[(
            "npm_config_argv",
            r#"{"remain":[],"cooked":["publish"],"original":["publish","--tag","next"]}"#,
        )]);
        assert_eq!(detect(&config, vars), Invocation::Publish);
    }

    #[test]
    fn test_install_from_argv() {
        let config = LifecycleConfig::default();
        let vars = env(&[("npm_config_argv", r#"{"original":["install"]}"#)]);
        let invocation = detect(&config, vars);
        assert_eq!(invocation, Invocation::Other("install".to_string()));
        assert!(!should_run(&invocation, &config));
    }

    #[test]
    fn test_unparseable_argv_is_unknown() {
        let config = LifecycleConfig::default();
        let vars = env(&[("npm_config_argv", "not json")]);
        let invocation = detect(&config, vars);
        assert_eq!(invocation, Invocation::Unknown);
        assert!(!should_run(&invocation, &config));
    }

    #[test]
    fn test_missing_signal_is_unknown() {
        let config = LifecycleConfig::default();
        assert_eq!(detect(&config, env(&[])), Invocation::Unknown);
    }

    #[test]
    fn test_npm_command_fallback() {
        let config = LifecycleConfig::default();
        assert_eq!(
            detect(&config, env(&[("npm_command", "publish")])),
            Invocation::Publish
        );
        assert_eq!(
            detect(&config, env(&[("npm_command", "pack")])),
            Invocation::Other("pack".to_string())
        );
    }

    #[test]
    fn test_argv_takes_precedence_over_npm_command() {
        let config = LifecycleConfig::default();
        let vars = env(&[
            ("npm_config_argv", r#"{"original":["install"]}"#),
            ("npm_command", "publish"),
        ]);
        assert_eq!(detect(&config, vars), Invocation::Other("install".to_string()));
    }

    #[test]
    fn test_custom_argv_variable() {
        let config = LifecycleConfig {
            argv_env: "MY_ARGV".to_string(),
            ..LifecycleConfig::default()
        };
        let vars = env(&[("MY_ARGV", r#"{"original":["publish"]}"#)]);
        assert_eq!(detect(&config, vars), Invocation::Publish);
    }

    #[test]
    fn test_relaxed_config_runs_for_any_parsed_signal() {
        let config = LifecycleConfig {
            require_publish: false,
            ..LifecycleConfig::default()
        };
        assert!(should_run(&Invocation::Other("install".to_string()), &config));
        assert!(should_run(&Invocation::Publish, &config));
        assert!(!should_run(&Invocation::Unknown, &config));
    }
}
