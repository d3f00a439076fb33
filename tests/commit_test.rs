//! Integration tests for staged change collection and `git commit`.

mod common;

use scribe::git::{Committer, GitCommitter, collect_staged, open_repository};
use scribe::ScribeError;

use common::TestRepo;

#[test]
fn test_commit_uses_exact_message() {
    let repo = TestRepo::new();
    repo.stage("readme.md", "# hello\n");
    repo.commit_staged("init");
    repo.stage("readme.md", "# hello world\n");

    let committer = GitCommitter::new(repo.path());
    committer
        .commit("docs(readme): expand greeting\n\nMention the world too.")
        .expect("commit should succeed");

    assert_eq!(
        repo.head_message().unwrap().trim_end(),
        "docs(readme): expand greeting\n\nMention the world too."
    );
    assert_eq!(repo.commit_count(), 2);
}

#[test]
fn test_commit_on_unborn_branch() {
    let repo = TestRepo::new();
    repo.stage("main.rs", "fn main() {}\n");

    GitCommitter::new(repo.path())
        .commit("feat: initial skeleton")
        .expect("first commit should succeed");

    assert_eq!(repo.head_message().unwrap().trim_end(), "feat: initial skeleton");
}

#[test]
fn test_commit_does_not_touch_unstaged_files() {
    let repo = TestRepo::new();
    repo.stage("a.txt", "a\n");
    std::fs::write(repo.path().join("b.txt"), "b\n").unwrap();

    GitCommitter::new(repo.path()).commit("chore: add a").unwrap();

    let head = repo.repo.head().unwrap().peel_to_tree().unwrap();
    assert!(head.get_name("a.txt").is_some());
    assert!(head.get_name("b.txt").is_none());
}

#[cfg(unix)]
#[test]
fn test_hook_rejection_is_commit_failed() {
    let repo = TestRepo::new();
    repo.stage("a.txt", "a\n");
    repo.install_hook(
        "pre-commit",
        "#!/bin/sh\necho 'lint failed: trailing whitespace' >&2\nexit 1\n",
    );

    let result = GitCommitter::new(repo.path()).commit("fix: whitespace");

    match result {
        Err(ScribeError::CommitFailed(detail)) => {
            assert!(detail.contains("lint failed"), "unexpected detail: {detail}");
        }
        other => panic!("expected CommitFailed, got {other:?}"),
    }
    assert_eq!(repo.commit_count(), 0);
}

#[cfg(unix)]
#[test]
fn test_commit_msg_hook_sees_message() {
    let repo = TestRepo::new();
    repo.stage("a.txt", "a\n");
    repo.install_hook(
        "commit-msg",
        "#!/bin/sh\ngrep -q '^feat' \"$1\" || { echo 'not conventional' >&2; exit 1; }\n",
    );

    let committer = GitCommitter::new(repo.path());
    assert!(matches!(
        committer.commit("added a file"),
        Err(ScribeError::CommitFailed(_))
    ));
    committer.commit("feat: add a file").unwrap();
    assert_eq!(repo.commit_count(), 1);
}

#[test]
fn test_collect_then_commit_leaves_nothing_staged() {
    let repo = TestRepo::new();
    repo.stage("lib.rs", "pub fn one() -> u8 { 1 }\n");
    repo.commit_staged("init");
    repo.stage("lib.rs", "pub fn one() -> u8 { 1 }\npub fn two() -> u8 { 2 }\n");

    let opened = open_repository(repo.path()).unwrap();
    let changes = collect_staged(&opened).unwrap();
    assert!(changes.diff.contains("+pub fn two()"));
    assert!(changes.stat.contains("lib.rs"));

    GitCommitter::new(repo.path()).commit("feat: add two").unwrap();

    let reopened = open_repository(repo.path()).unwrap();
    assert!(matches!(
        collect_staged(&reopened),
        Err(ScribeError::NoStagedChanges)
    ));
}

#[test]
fn test_commit_with_nothing_staged_fails() {
    let repo = TestRepo::new();
    repo.stage("a.txt", "a\n");
    repo.commit_staged("init");

    let result = GitCommitter::new(repo.path()).commit("chore: nothing");
    assert!(matches!(result, Err(ScribeError::CommitFailed(_))));
}
