//! End-to-end flow once the staged changes are known.

use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::ScribeError;
use crate::generate::MessageSource;
use crate::git::{Committer, StagedChangeSet};
use crate::interaction::{InteractionLoop, MessageEditor, Outcome, Prompter, commit_message};

/// The interactive collaborators a run needs.
pub struct Collaborators<'a> {
    pub committer: &'a dyn Committer,
    pub prompter: &'a mut dyn Prompter,
    pub editor: &'a dyn MessageEditor,
}

/// Resolve a final message for `changes` and commit it.
///
/// With `settings.skip_generation` the literal message (or, without one, an
/// editor session) goes straight to the committer and `make_source` is never
/// called. Otherwise `make_source` builds the generator, which is where
/// provider selection happens, and the interaction loop takes over.
pub async fn run<F>(
    settings: &Settings,
    literal: Option<&str>,
    changes: &StagedChangeSet,
    collaborators: Collaborators<'_>,
    make_source: F,
) -> Result<Outcome, ScribeError>
where
    F: FnOnce() -> Result<Box<dyn MessageSource>, ScribeError>,
{
    let Collaborators {
        committer,
        prompter,
        editor,
    } = collaborators;

    if settings.skip_generation {
        debug!(literal = literal.is_some(), "generation skipped");
        let message = match literal {
            Some(message) => message.to_string(),
            None => match editor.edit("")? {
                Some(message) => message,
                None => return Ok(Outcome::Cancelled),
            },
        };
        return commit_message(committer, &message);
    }

    if literal.is_some() {
        warn!("--message is only used when SCRIBE_SKIP is set; generating instead");
    }

    let source = make_source()?;
    InteractionLoop::new(source.as_ref(), committer, prompter, editor)
        .run(changes)
        .await
}
