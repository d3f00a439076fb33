//! Commit message generation through a remote provider.

pub mod generator;
pub mod prompt;

pub use generator::{HttpGenerator, MAX_OUTPUT_TOKENS, MessageSource};
pub use prompt::{CommitPrompt, build_commit_prompt, sanitize_diff};

#[cfg(test)]
pub use generator::MockMessageSource;
