//! Interactive accept / edit / regenerate / cancel loop.

pub mod editor;
pub mod terminal;

use tracing::debug;

use crate::error::ScribeError;
use crate::generate::MessageSource;
use crate::git::{Committer, StagedChangeSet};

pub use editor::{ExternalEditor, MessageEditor, strip_comment_lines};
pub use terminal::TerminalPrompter;

/// A user's answer at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Accept,
    Edit,
    Regenerate,
    Cancel,
}

impl Choice {
    /// Parse an answer, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything unrecognized.
    pub fn parse(input: &str) -> Option<Choice> {
        match input.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Some(Choice::Accept),
            "e" | "edit" => Some(Choice::Edit),
            "r" | "regenerate" => Some(Choice::Regenerate),
            "n" | "no" => Some(Choice::Cancel),
            _ => None,
        }
    }
}

/// How a run ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Committed { message: String },
    Cancelled,
}

/// Terminal I/O used by the loop.
pub trait Prompter {
    /// Display the current proposal.
    fn show(&mut self, message: &str);

    /// Read one answer. `None` means input ended (EOF or interrupt).
    fn ask(&mut self) -> Result<Option<String>, ScribeError>;

    /// Print a status line (regenerating, invalid answer, ...).
    fn notice(&mut self, text: &str);
}

/// Commit `message` after trimming, refusing empty text.
pub fn commit_message(committer: &dyn Committer, message: &str) -> Result<Outcome, ScribeError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ScribeError::EmptyMessage);
    }

    committer.commit(message)?;
    Ok(Outcome::Committed {
        message: message.to_string(),
    })
}

/// Drives one proposal through to a commit or a cancellation.
///
/// The loop never touches the change set and commits at most once.
pub struct InteractionLoop<'a> {
    source: &'a dyn MessageSource,
    committer: &'a dyn Committer,
    prompter: &'a mut dyn Prompter,
    editor: &'a dyn MessageEditor,
}

impl<'a> InteractionLoop<'a> {
    pub fn new(
        source: &'a dyn MessageSource,
        committer: &'a dyn Committer,
        prompter: &'a mut dyn Prompter,
        editor: &'a dyn MessageEditor,
    ) -> Self {
        Self {
            source,
            committer,
            prompter,
            editor,
        }
    }

    pub async fn run(&mut self, changes: &StagedChangeSet) -> Result<Outcome, ScribeError> {
        let mut message = self.source.generate(changes).await?;

        loop {
            self.prompter.show(&message);

            let choice = match self.read_choice()? {
                Some(choice) => choice,
                None => return Ok(Outcome::Cancelled),
            };
            debug!(?choice, "user choice");

            match choice {
                Choice::Accept => return commit_message(self.committer, &message),
                Choice::Edit => {
                    return match self.editor.edit(&message)? {
                        Some(edited) => commit_message(self.committer, &edited),
                        None => Ok(Outcome::Cancelled),
                    };
                }
                Choice::Regenerate => {
                    self.prompter.notice("Regenerating commit message...");
                    message = self.source.generate(changes).await?;
                }
                Choice::Cancel => return Ok(Outcome::Cancelled),
            }
        }
    }

    /// Ask until the answer is recognized. `None` when input ended.
    fn read_choice(&mut self) -> Result<Option<Choice>, ScribeError> {
        loop {
            let Some(answer) = self.prompter.ask()? else {
                return Ok(None);
            };
            match Choice::parse(&answer) {
                Some(choice) => return Ok(Some(choice)),
                None => self.prompter.notice("Please answer y, e, r or n."),
            }
        }
    }
}
