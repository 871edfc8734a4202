//! Development tasks for clean-publish.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "xtask")]
enum Task {
    /// Render the clean-publish(1) man page
    Man {
        /// Directory to write `clean-publish.1` into; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    match Task::parse() {
        Task::Man { output } => man(output.as_deref()),
    }
}

fn man(output_dir: Option<&Path>) -> Result<()> {
    // Subcommands are short enough to live in the one page
    let mut page = Vec::new();
    clap_mangen::Man::new(clean_publish::cli::Cli::command()).render(&mut page)?;

    let Some(dir) = output_dir else {
        io::stdout().write_all(&page)?;
        return Ok(());
    };

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    let path = dir.join("clean-publish.1");
    fs::write(&path, page).with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!("Wrote {}", path.display());
    Ok(())
}
