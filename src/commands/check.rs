use crate::config::LifecycleConfig;
use crate::ignore_file::read_patterns;
use crate::lifecycle::{self, Invocation};
use crate::output;
use crate::prompt::Dialogue;
use crate::prompt::actions::IgnoreFileHost;
use crate::reconcile::{self, Verdict};
use crate::{NOT_APPLICABLE_CODE, PASS_CODE, PublishContext, scanner, vcs};
use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Execute the check - compare the files on disk against git and ask the
/// operator about anything untracked.
///
/// Returns the process exit code. Unless `force` is set, the check only runs
/// when the package manager reports a publish; otherwise it returns
/// [`NOT_APPLICABLE_CODE`] without touching anything, even when `dir` or the
/// configuration is broken.
///
/// # Errors
///
/// Returns an error if:
/// - The package directory cannot be resolved or the configuration is invalid
/// - An ignore file cannot be read or contains an invalid pattern
/// - Directory enumeration or `git ls-tree` fails (as a `CollaboratorError`)
/// - Stdin closes before the dialogue reaches a decision
/// - The package ignore file cannot be written
pub fn execute(dir: PathBuf, config_path: Option<&Path>, force: bool) -> Result<i32> {
    let ctx = PublishContext::new(dir, config_path);

    if !force {
        let lifecycle_config = ctx
            .as_ref()
            .map_or_else(|_| LifecycleConfig::default(), |ctx| ctx.config.lifecycle.clone());
        let invocation = lifecycle::detect_from_env(&lifecycle_config);
        if !applies(&invocation, &lifecycle_config, ctx.is_ok()) {
            debug!(?invocation, "not a publish, skipping");
            return Ok(NOT_APPLICABLE_CODE);
        }
    }

    let ctx = ctx?;
    let stdin = io::stdin();
    run_check(&ctx, stdin.lock(), io::stderr())
}

/// Whether the lifecycle gate lets the check through.
///
/// When the context failed to load, only an explicit publish gets through,
/// so that the error surfaces where it matters and nowhere else.
#[must_use]
pub fn applies(invocation: &Invocation, config: &LifecycleConfig, context_loaded: bool) -> bool {
    if context_loaded {
        lifecycle::should_run(invocation, config)
    } else {
        *invocation == Invocation::Publish
    }
}

/// Run the check with explicit streams for the dialogue.
///
/// # Errors
///
/// See [`execute`].
pub fn run_check<R: BufRead, W: Write>(
    ctx: &PublishContext,
    input: R,
    prompt_out: W,
) -> Result<i32> {
    let vcs_patterns = read_patterns(&ctx.vcs_ignore_path())?.unwrap_or_default();
    let package_patterns = read_patterns(&ctx.package_ignore_path())?;

    let found = scanner::enumerate_files(&ctx.root, &vcs_patterns)?;
    output::verbose(&format!("{} files would be published", found.len()));

    let tracked = vcs::tracked_files(&ctx.root, &ctx.config.git.program)?;
    output::verbose(&format!("{} files are tracked at HEAD", tracked.len()));

    let verdict = reconcile::conclude(
        &ctx.root,
        &found,
        &tracked,
        package_patterns.as_deref(),
    )?;

    if verdict.passes() {
        output::status("PASSED!");
        return Ok(PASS_CODE);
    }
    let Verdict::Untracked(untracked) = verdict else {
        return Ok(PASS_CODE);
    };

    let host = IgnoreFileHost::new(ctx.package_ignore_path());
    let outcome = Dialogue::new(
        &untracked,
        &ctx.config.ignore.package_file,
        input,
        prompt_out,
        host,
    )
    .run()?;
    debug!(state = ?outcome.state, code = outcome.code, "dialogue finished");

    Ok(outcome.code)
}
