//! External editor sessions over a scoped temporary file.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::ScribeError;

/// Hint appended below the message; stripped again on read-back.
const EDIT_HINT: &str = "\
# Edit the commit message above. Lines starting with '#' are ignored.
# An empty message aborts the commit.
";

/// Lets the user rewrite a message.
#[cfg_attr(test, mockall::automock)]
pub trait MessageEditor {
    /// Returns the edited text, or `None` if the session was interrupted.
    fn edit(&self, initial: &str) -> Result<Option<String>, ScribeError>;
}

/// Runs the user's editor command against a temporary file.
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl MessageEditor for ExternalEditor {
    fn edit(&self, initial: &str) -> Result<Option<String>, ScribeError> {
        // Removed when `file` drops, whichever way this function returns.
        let mut file = tempfile::Builder::new()
            .prefix("SCRIBE_EDITMSG-")
            .suffix(".txt")
            .tempfile()
            .map_err(|e| ScribeError::EditorFailed(format!("Failed to create temp file: {e}")))?;

        let seeded = if initial.is_empty() {
            format!("\n{EDIT_HINT}")
        } else {
            format!("{initial}\n\n{EDIT_HINT}")
        };
        file.write_all(seeded.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| ScribeError::EditorFailed(format!("Failed to write temp file: {e}")))?;

        debug!(editor = %self.command, path = %file.path().display(), "launching editor");

        let status = {
            let _shield = InterruptShield::raise();
            shell_command(&self.command, file.path())
                .status()
                .map_err(|e| {
                    ScribeError::EditorFailed(format!("Failed to launch `{}`: {e}", self.command))
                })?
        };

        if !status.success() {
            // No exit code: the editor was killed by a signal.
            return match status.code() {
                None => Ok(None),
                Some(code) => Err(ScribeError::EditorFailed(format!(
                    "`{}` exited with code {code}",
                    self.command
                ))),
            };
        }

        let edited = std::fs::read_to_string(file.path())
            .map_err(|e| ScribeError::EditorFailed(format!("Failed to read edited message: {e}")))?;

        Ok(Some(strip_comment_lines(&edited)))
    }
}

/// While alive, SIGINT and SIGQUIT do not terminate this process.
///
/// The editor shares our process group, so a Ctrl-C meant for it reaches us
/// too. Handlers (unlike `SIG_IGN`) are reset on exec, so the editor still
/// gets the default behaviour. Shields nest; the default action returns when
/// the last one drops.
struct InterruptShield;

#[cfg(unix)]
mod shield {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex, OnceLock, PoisonError};

    use signal_hook::consts::{SIGINT, SIGQUIT};
    use tracing::warn;

    static ACTIVE: Mutex<usize> = Mutex::new(0);

    /// Flag that, when set, makes SIGINT/SIGQUIT run their default action.
    pub(super) fn default_action() -> Option<&'static Arc<AtomicBool>> {
        static FLAG: OnceLock<Option<Arc<AtomicBool>>> = OnceLock::new();
        FLAG.get_or_init(|| {
            let flag = Arc::new(AtomicBool::new(true));
            for signal in [SIGINT, SIGQUIT] {
                if let Err(e) =
                    signal_hook::flag::register_conditional_default(signal, Arc::clone(&flag))
                {
                    warn!("Failed to install handler for signal {signal}: {e}");
                    return None;
                }
            }
            Some(flag)
        })
        .as_ref()
    }

    impl super::InterruptShield {
        pub(super) fn raise() -> Self {
            let mut active = ACTIVE.lock().unwrap_or_else(PoisonError::into_inner);
            *active += 1;
            if let Some(flag) = default_action() {
                flag.store(false, Ordering::SeqCst);
            }
            Self
        }
    }

    impl Drop for super::InterruptShield {
        fn drop(&mut self) {
            let mut active = ACTIVE.lock().unwrap_or_else(PoisonError::into_inner);
            *active = active.saturating_sub(1);
            if *active == 0 {
                if let Some(flag) = default_action() {
                    flag.store(true, Ordering::SeqCst);
                }
            }
        }
    }
}

#[cfg(not(unix))]
impl InterruptShield {
    fn raise() -> Self {
        Self
    }
}

/// Build the command that runs `editor` on `path` through the shell, so
/// editor strings with arguments (`code --wait`) work as they do for git.
#[cfg(unix)]
fn shell_command(editor: &str, path: &Path) -> Command {
    let mut command = Command::new("sh");
    command
        .arg("-c")
        .arg(format!("{editor} \"$@\""))
        .arg(editor)
        .arg(path);
    command
}

#[cfg(windows)]
fn shell_command(editor: &str, path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command
        .arg("/C")
        .arg(format!("{editor} \"{}\"", path.display()));
    command
}

/// Drop `#` comment lines and surrounding whitespace.
pub fn strip_comment_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
