use std::fmt;
use std::io;

/// An external collaborator (directory enumeration or git) failed.
///
/// These failures are fatal: the process prints the message and exits with
/// `code`, without retrying.
#[derive(Debug)]
pub struct CollaboratorError {
    /// Short name of the failed command, as shown to the operator
    pub command: &'static str,
    /// Exit code to propagate
    pub code: i32,
    /// Extra detail (stderr of the command, or the I/O error)
    pub detail: String,
}

impl CollaboratorError {
    /// Directory enumeration failed.
    ///
    /// The exit code comes from the OS error behind `io_err` when there is one.
    #[must_use]
    pub fn enumeration(io_err: Option<&io::Error>, detail: String) -> Self {
        Self {
            command: "find",
            code: io_err.map_or(1, exit_code_for_io),
            detail,
        }
    }

    /// `git ls-tree` could not be run or exited non-zero.
    #[must_use]
    pub fn ls_tree(code: i32, stderr: &str) -> Self {
        Self {
            command: "git ls-tree",
            code,
            detail: extract_meaningful_message(stderr),
        }
    }
}

impl fmt::Display for CollaboratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command `{}` failed", self.command)?;
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for CollaboratorError {}

/// Maps an I/O error to a non-zero exit code.
fn exit_code_for_io(err: &io::Error) -> i32 {
    match err.raw_os_error() {
        Some(code) if code > 0 && code < 256 => code,
        _ => 1,
    }
}

/// Extract the most meaningful line of a command's stderr
fn extract_meaningful_message(stderr: &str) -> String {
    stderr
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("fatal:") || line.starts_with("error:"))
        .or_else(|| stderr.lines().map(str::trim).find(|line| !line.is_empty()))
        .unwrap_or_default()
        .to_string()
}
