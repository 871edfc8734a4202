use crate::PublishContext;
use crate::ignore_file::read_patterns;
use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;

/// Print the patterns parsed from an ignore file, one per line, on stdout.
///
/// `file` is resolved against the package root and defaults to the package
/// ignore file.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be read.
pub fn execute(ctx: &PublishContext, file: Option<&Path>) -> Result<()> {
    let stdout = io::stdout();
    write_patterns(ctx, file, &mut stdout.lock())
}

/// Write the patterns of `file` to `out`.
///
/// # Errors
///
/// See [`execute`].
pub fn write_patterns<W: Write>(ctx: &PublishContext, file: Option<&Path>, out: &mut W) -> Result<()> {
    let path = file.map_or_else(|| ctx.package_ignore_path(), |f| ctx.root.join(f));
    let Some(patterns) = read_patterns(&path)? else {
        anyhow::bail!("Ignore file not found: {}", path.display());
    };

    for pattern in &patterns {
        writeln!(out, "{pattern}")?;
    }
    crate::output::verbose(&format!("{} patterns in {}", patterns.len(), path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_writes_parsed_patterns() -> Result<()> {
        let temp = TempDir::new()?;
        fs::write(temp.path().join(".npmignore"), "# c\n test/ \n\n*.log # logs\n")?;
        let ctx = PublishContext::with_config(temp.path().to_path_buf(), Config::default());

        let mut out = Vec::new();
        write_patterns(&ctx, None, &mut out)?;
        assert_eq!(String::from_utf8(out)?, "test/\n*.log\n");
        Ok(())
    }

    #[test]
    fn test_explicit_file_relative_to_root() -> Result<()> {
        let temp = TempDir::new()?;
        fs::write(temp.path().join(".gitignore"), "node_modules/\n")?;
        let ctx = PublishContext::with_config(temp.path().to_path_buf(), Config::default());

        let mut out = Vec::new();
        write_patterns(&ctx, Some(Path::new(".gitignore")), &mut out)?;
        assert_eq!(String::from_utf8(out)?, "node_modules/\n");
        Ok(())
    }

    #[test]
    fn test_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let ctx = PublishContext::with_config(temp.path().to_path_buf(), Config::default());
        let mut out = Vec::new();
        assert!(write_patterns(&ctx, None, &mut out).is_err());
    }
}
