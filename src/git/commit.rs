//! Commit creation through the system `git` binary.
//!
//! Shelling out (rather than committing through git2) runs the user's hooks
//! and honours their signing, identity and template configuration.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::ScribeError;

/// Something that can turn a final message into a commit.
#[cfg_attr(test, mockall::automock)]
pub trait Committer {
    /// Create a commit from the staged index with exactly `message`.
    fn commit(&self, message: &str) -> Result<(), ScribeError>;
}

/// Commits by running `git commit -m <message>` in a working tree.
pub struct GitCommitter {
    workdir: PathBuf,
}

impl GitCommitter {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

impl Committer for GitCommitter {
    fn commit(&self, message: &str) -> Result<(), ScribeError> {
        debug!(workdir = %self.workdir.display(), "running git commit");

        let output = Command::new("git")
            .args(["commit", "-m", message])
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| ScribeError::CommitFailed(format!("Failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(ScribeError::CommitFailed(detail));
        }

        let summary = String::from_utf8_lossy(&output.stdout);
        if let Some(first) = summary.lines().next() {
            println!("{first}");
        }

        Ok(())
    }
}
