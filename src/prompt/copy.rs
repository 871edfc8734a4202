//! Operator-facing text for each dialogue state.

use super::Question;

/// Prefix added when the previous answer was not understood.
pub const PARDON: &str = "\n Sorry I didn't get that.";

/// Render the message for `question`.
///
/// Every message ends with a single space so the answer is typed after it.
/// The router has no message and renders as that space alone.
#[must_use]
pub fn render(question: Question, untracked: &[String], package_file: &str, pardon: bool) -> String {
    let lines = message_lines(question, untracked, package_file);
    let body = format!("{} ", lines.join("\n"));
    if pardon { format!("{PARDON}{body}") } else { body }
}

/// The lines of a state's message, before joining.
fn message_lines(question: Question, untracked: &[String], package_file: &str) -> Vec<String> {
    let single = untracked.len() == 1;
    match question {
        Question::DontPublish => {
            let mut lines = Vec::with_capacity(untracked.len() + 4);
            if single {
                lines.push(" I found a file that is not checked-in to the repository:".to_string());
            } else {
                lines.push(format!(
                    " I found {} files that are not checked-in to this repository:",
                    untracked.len()
                ));
            }
            lines.extend(untracked.iter().map(|path| format!("  - {path}")));
            lines.push(String::new());
            if single {
                lines.push(" Are you sure you want to publish this? (y/n)".to_string());
            } else {
                lines.push(" Are you sure you want to publish these? (y/n)".to_string());
            }
            lines.push(String::new());
            lines
        }
        Question::OkayMyBad => vec![" Okay, my bad.".to_string()],
        Question::HowDeal => vec![format!(
            " How do you wanna deal with it? (d: delete, i: use {package_file}, s: stop publishing)"
        )],
        Question::Abort => vec![" Okay, stopping".to_string()],
        Question::Delete => {
            let subject = if single { "The file" } else { "The files" };
            vec![format!(
                " {subject} will be lost forever. Are you sure about that? (y/n)"
            )]
        }
        Question::Ignore => Vec::new(),
        Question::Okay => vec![" Okay.".to_string()],
        Question::CreatingIgnore => vec![format!(" Creating {package_file} now.")],
        Question::IgnoreExists => vec![format!(
            " {package_file} exists already. What do you wanna do? \
             (m:merge, k: keep original and override this time, o: override forever)"
        )],
        Question::Merge => vec![format!(" Merging into {package_file} now.")],
        Question::KeepOnce => vec![format!(
            " Keeping {package_file} as it is, ignoring these files this time only."
        )],
    }
}
