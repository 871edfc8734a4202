use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use clean_publish::cli::{Cli, Commands};
use clean_publish::errors::CollaboratorError;
use clean_publish::output::{self, Verbosity};
use clean_publish::{PublishContext, commands};
use colored::Colorize;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            if let Some(failure) = e.downcast_ref::<CollaboratorError>() {
                output::error(&failure.to_string());
                process::exit(failure.code);
            }
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    output::set_verbosity(if cli.quiet {
        Verbosity::Quiet
    } else if cli.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    });

    match cli.command {
        Some(Commands::Completion { shell }) => {
            print_completions(shell, &mut Cli::command());
            Ok(0)
        }
        Some(Commands::Patterns { file }) => {
            let ctx = PublishContext::new(cli.dir, cli.config.as_deref())?;
            commands::patterns::execute(&ctx, file.as_deref())?;
            Ok(0)
        }
        Some(Commands::Check { force }) => {
            commands::check::execute(cli.dir, cli.config.as_deref(), force)
        }
        None => commands::check::execute(cli.dir, cli.config.as_deref(), false),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "clean_publish=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
