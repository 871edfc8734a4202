//! # Confirmation Dialogue
//!
//! When untracked files would be published, the operator is asked what to do
//! through a small, fixed question tree:
//!
//! ```text
//! DontPublish --y--> OkayMyBad                       (exit)
//!      |
//!      n
//!      v
//!   HowDeal --s--> Abort                             (exit)
//!      |  \
//!      d   i
//!      v    \
//!   Delete   Ignore (router, no prompt)
//!   |    |      |-- ignore file exists ---> IgnoreExists --m--> Merge
//!   y    n      |                              |  \--k--> KeepOnce
//!   v    v      |                              o
//!  Okay Abort   \-- no ignore file ----------> CreatingIgnore
//! ```
//!
//! States are plain values. [`Question::transition`] is a pure function from
//! a state and a normalized answer to the next state, and [`Question::step`]
//! says what kind of node a state is. [`Dialogue`] drives the loop: it reads
//! one line, transitions, and then dispatches on the kind of the *new* state,
//! so the router is resolved before anything is printed for it.
//!
//! Side effects of action states go through the [`Host`] trait.

pub mod actions;
pub mod copy;

use crate::PASS_CODE;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::debug;

/// A node of the confirmation dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Question {
    /// Initial question: publish these untracked files anyway?
    DontPublish,
    /// Operator confirmed publishing.
    OkayMyBad,
    /// How should the untracked files be dealt with?
    HowDeal,
    /// Publishing is stopped.
    Abort,
    /// Confirm deleting the untracked files.
    Delete,
    /// Router: picks between [`Question::IgnoreExists`] and
    /// [`Question::CreatingIgnore`] from the state of the disk.
    Ignore,
    /// Deletion confirmed.
    Okay,
    /// Write a fresh package ignore file.
    CreatingIgnore,
    /// A package ignore file exists already: merge, keep, or override?
    IgnoreExists,
    /// Append the untracked files to the existing ignore file.
    Merge,
    /// Keep the ignore file untouched; ignore the files this time only.
    KeepOnce,
}

/// One accepted answer group and where it leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// Lower-case synonyms accepted for this choice
    pub tokens: &'static [&'static str],
    /// State entered when one of the tokens is given
    pub next: Question,
}

/// Side effect run by an action state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Write the package ignore file from scratch, replacing any existing one.
    CreateIgnore,
    /// Add the untracked files to the existing package ignore file.
    MergeIgnore,
    /// Leave the ignore file alone.
    IgnoreOnce,
}

/// What kind of node a [`Question`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Print the message and exit with the code.
    Terminal(i32),
    /// Print the message, run the action, and exit with the code.
    Action(Action, i32),
    /// Print the question and wait for an answer.
    Interactive(&'static [Choice]),
    /// Move on without asking anything.
    Router,
}

const DONT_PUBLISH_CHOICES: &[Choice] = &[
    Choice {
        tokens: &["y", "yes"],
        next: Question::OkayMyBad,
    },
    Choice {
        tokens: &["n", "no"],
        next: Question::HowDeal,
    },
];

const HOW_DEAL_CHOICES: &[Choice] = &[
    Choice {
        tokens: &["d", "delete"],
        next: Question::Delete,
    },
    Choice {
        tokens: &["i", "ignore"],
        next: Question::Ignore,
    },
    Choice {
        tokens: &["s", "stop"],
        next: Question::Abort,
    },
];

const DELETE_CHOICES: &[Choice] = &[
    Choice {
        tokens: &["n", "no"],
        next: Question::Abort,
    },
    Choice {
        tokens: &["y", "yes"],
        next: Question::Okay,
    },
];

const IGNORE_EXISTS_CHOICES: &[Choice] = &[
    Choice {
        tokens: &["m", "merge"],
        next: Question::Merge,
    },
    Choice {
        tokens: &["k", "keep", "once"],
        next: Question::KeepOnce,
    },
    Choice {
        tokens: &["o", "override"],
        next: Question::CreatingIgnore,
    },
];

impl Question {
    /// The kind of this node.
    #[must_use]
    pub const fn step(self) -> Step {
        match self {
            Self::DontPublish => Step::Interactive(DONT_PUBLISH_CHOICES),
            Self::HowDeal => Step::Interactive(HOW_DEAL_CHOICES),
            Self::Delete => Step::Interactive(DELETE_CHOICES),
            Self::IgnoreExists => Step::Interactive(IGNORE_EXISTS_CHOICES),
            Self::OkayMyBad | Self::Abort | Self::Okay => Step::Terminal(PASS_CODE),
            Self::CreatingIgnore => Step::Action(Action::CreateIgnore, PASS_CODE),
            Self::Merge => Step::Action(Action::MergeIgnore, PASS_CODE),
            Self::KeepOnce => Step::Action(Action::IgnoreOnce, PASS_CODE),
            Self::Ignore => Step::Router,
        }
    }

    /// Next state for a normalized answer, or `None` if the answer is not
    /// accepted here. Non-interactive states accept nothing.
    #[must_use]
    pub fn transition(self, answer: &str) -> Option<Self> {
        let Step::Interactive(choices) = self.step() else {
            return None;
        };
        choices
            .iter()
            .find(|choice| choice.tokens.iter().any(|token| *token == answer))
            .map(|choice| choice.next)
    }
}

/// Where the [`Question::Ignore`] router leads.
#[must_use]
pub const fn route_ignore(package_ignore_exists: bool) -> Question {
    if package_ignore_exists {
        Question::IgnoreExists
    } else {
        Question::CreatingIgnore
    }
}

/// Lower-case and trim an operator answer.
#[must_use]
pub fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Environment the dialogue consults and acts on.
pub trait Host {
    /// Whether the package ignore file exists right now.
    fn package_ignore_exists(&self) -> bool;

    /// Run an action state's side effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the side effect fails (for example the ignore file
    /// cannot be written).
    fn perform(&mut self, action: Action, untracked: &[String]) -> Result<()>;
}

/// How a finished dialogue ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// The final state reached
    pub state: Question,
    /// Process exit code for that state
    pub code: i32,
}

/// A running confirmation dialogue over some input and output streams.
pub struct Dialogue<'a, R, W, H> {
    /// Untracked files the dialogue is about
    untracked: &'a [String],
    /// Package ignore file name, as shown in messages
    package_file: &'a str,
    /// Operator answers, one per line
    input: R,
    /// Where prompts are written
    output: W,
    /// Disk checks and side effects
    host: H,
}

impl<'a, R: BufRead, W: Write, H: Host> Dialogue<'a, R, W, H> {
    /// Create a dialogue about `untracked`.
    pub fn new(
        untracked: &'a [String],
        package_file: &'a str,
        input: R,
        output: W,
        host: H,
    ) -> Self {
        Self {
            untracked,
            package_file,
            input,
            output,
            host,
        }
    }

    /// Run the dialogue from [`Question::DontPublish`] until a final state.
    ///
    /// Unrecognized answers re-ask the same question with an apology, as many
    /// times as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the input ends before a final state is reached,
    /// if reading or writing fails, or if an action fails.
    pub fn run(mut self) -> Result<Outcome> {
        let mut current = Question::DontPublish;
        let mut answer: Option<String> = None;

        loop {
            let mut pardon = false;
            if let Some(line) = answer.take() {
                let normalized = normalize(&line);
                match current.transition(&normalized) {
                    Some(next) => {
                        debug!(from = ?current, to = ?next, answer = %normalized, "transition");
                        current = next;
                    }
                    None => {
                        debug!(state = ?current, answer = %normalized, "unrecognized answer");
                        pardon = true;
                    }
                }
            }

            match current.step() {
                Step::Router => {
                    let exists = self.host.package_ignore_exists();
                    let next = route_ignore(exists);
                    debug!(package_ignore_exists = exists, to = ?next, "routed");
                    current = next;
                }
                Step::Terminal(code) => {
                    self.say(current)?;
                    return Ok(Outcome {
                        state: current,
                        code,
                    });
                }
                Step::Action(action, code) => {
                    self.say(current)?;
                    self.host.perform(action, self.untracked)?;
                    return Ok(Outcome {
                        state: current,
                        code,
                    });
                }
                Step::Interactive(_) => {
                    let text = copy::render(current, self.untracked, self.package_file, pardon);
                    self.output.write_all(text.as_bytes())?;
                    self.output.flush()?;
                    answer = Some(self.read_answer()?);
                }
            }
        }
    }

    /// Print a final state's message on its own line.
    fn say(&mut self, question: Question) -> Result<()> {
        let text = copy::render(question, self.untracked, self.package_file, false);
        writeln!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Block for one line of input.
    fn read_answer(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read answer")?;
        if read == 0 {
            anyhow::bail!("Input closed before a decision was made");
        }
        Ok(line)
    }
}
