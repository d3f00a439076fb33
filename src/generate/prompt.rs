//! Prompt construction for commit message generation.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::git::StagedChangeSet;

/// Commit types the model may choose from.
pub const COMMIT_TYPES: [&str; 8] = [
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "chore",
];

/// Maximum length of the subject line.
pub const MAX_SUBJECT_LENGTH: usize = 72;

static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]|\x1b\][^\x07]*(\x07|\x1b\\)")
        .expect("ANSI escape pattern is valid")
});

/// A prompt split into the provider's system and user roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitPrompt {
    pub system: String,
    pub user: String,
}

/// Build the prompt for a set of staged changes.
pub fn build_commit_prompt(changes: &StagedChangeSet) -> CommitPrompt {
    let types = COMMIT_TYPES.join(", ");

    let system = format!(
        r#"You write Git commit messages following the Conventional Commits specification.

Rules:
- Format the first line as `type(scope): description`. The scope is optional.
- type is one of: {types}
- The first line MUST be at most {MAX_SUBJECT_LENGTH} characters.
- Use the imperative mood ("add", "fix", "remove"), lowercase after the colon, no trailing period.
- If the change needs explaining, add a blank line and a short body wrapped at 72 characters.
- Output ONLY the commit message. No quotes, no markdown fences, no commentary."#
    );

    let truncation_note = if changes.truncated {
        "\n\nNote: the diff was truncated due to size. Use the summary above for the full picture."
    } else {
        ""
    };

    let user = format!(
        "## Summary ({files} files changed, {insertions} insertions, {deletions} deletions)\n{stat}\n\n## Diff\n```diff\n{diff}\n```{truncation_note}",
        files = changes.files_changed,
        insertions = changes.insertions,
        deletions = changes.deletions,
        stat = changes.stat.trim_end(),
        diff = sanitize_diff(&changes.diff).trim_end(),
    );

    CommitPrompt { system, user }
}

/// Strip terminal escapes and control characters (except newlines and tabs).
pub fn sanitize_diff(text: &str) -> String {
    let without_ansi = ANSI_ESCAPE.replace_all(text, "");
    without_ansi
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}
