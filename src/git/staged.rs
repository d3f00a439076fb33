//! Staged change collection using git2.

use std::path::Path;

use git2::{Diff, DiffFormat, DiffStatsFormat, ErrorCode, Repository, Tree};
use tracing::{debug, warn};

use crate::error::ScribeError;

/// Maximum bytes of unified diff text sent to a provider.
pub const MAX_DIFF_BYTES: usize = 4000;

/// Width used when rendering the diffstat.
const STAT_WIDTH: usize = 80;

/// The staged changes of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedChangeSet {
    /// Unified diff of the index against HEAD, cut to [`MAX_DIFF_BYTES`].
    pub diff: String,
    /// Full diffstat, never truncated.
    pub stat: String,
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub truncated: bool,
}

/// Open the repository enclosing `path`.
///
/// Fails with [`ScribeError::NotARepository`] when `path` is not inside a
/// working tree; bare repositories count as "not a working tree".
pub fn open_repository(path: &Path) -> Result<Repository, ScribeError> {
    let repo = Repository::discover(path).map_err(|e| match e.code() {
        ErrorCode::NotFound => ScribeError::NotARepository,
        _ => ScribeError::Git(e),
    })?;

    if repo.is_bare() || repo.workdir().is_none() {
        return Err(ScribeError::NotARepository);
    }

    Ok(repo)
}

/// Read `core.editor` from the repository configuration, if set.
pub fn core_editor(repo: &Repository) -> Option<String> {
    repo.config()
        .ok()?
        .get_string("core.editor")
        .ok()
        .filter(|e| !e.trim().is_empty())
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found).
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, ScribeError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(ScribeError::Git(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(ScribeError::Git)?;
    Ok(Some(tree))
}

/// Collect the staged diff (index against HEAD) and its diffstat.
pub fn collect_staged(repo: &Repository) -> Result<StagedChangeSet, ScribeError> {
    let head_tree = resolve_head_tree(repo)?;

    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(ScribeError::Git)?;

    if diff.deltas().len() == 0 {
        return Err(ScribeError::NoStagedChanges);
    }

    let stats = diff.stats().map_err(ScribeError::Git)?;
    let stat = stats
        .to_buf(DiffStatsFormat::FULL, STAT_WIDTH)
        .map_err(ScribeError::Git)?
        .as_str()
        .unwrap_or_default()
        .to_string();

    let full_text = diff_text(&diff, MAX_DIFF_BYTES);
    let diff_text = truncate_on_line_boundary(&full_text, MAX_DIFF_BYTES).to_string();
    let truncated = diff_text.len() < full_text.len();

    debug!(
        files = stats.files_changed(),
        insertions = stats.insertions(),
        deletions = stats.deletions(),
        diff_bytes = diff_text.len(),
        truncated,
        "collected staged changes"
    );

    Ok(StagedChangeSet {
        diff: diff_text,
        stat,
        files_changed: stats.files_changed(),
        insertions: stats.insertions(),
        deletions: stats.deletions(),
        truncated,
    })
}

/// Render the patch text of a diff.
///
/// Stops appending once the text exceeds `budget`, so callers can tell a
/// truncated diff from one that fits exactly.
fn diff_text(diff: &Diff<'_>, budget: usize) -> String {
    let mut text = String::new();

    if let Err(e) = diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        if text.len() > budget {
            return true;
        }

        let origin = line.origin();
        if matches!(origin, '+' | '-' | ' ') {
            text.push(origin);
        }
        text.push_str(&String::from_utf8_lossy(line.content()));

        true
    }) {
        warn!("Failed to render staged diff: {e}");
    }

    text
}

/// Cut `text` to at most `limit` bytes, preferring the last line boundary.
///
/// Text that already fits is returned unchanged, which makes the cut
/// idempotent. When the first line alone exceeds the budget the cut falls
/// back to the last UTF-8 character boundary.
pub fn truncate_on_line_boundary(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }

    let mut end = limit;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }

    match text[..end].rfind('\n') {
        Some(newline) => &text[..=newline],
        None => &text[..end],
    }
}
