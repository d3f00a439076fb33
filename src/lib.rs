//! scribe - drafts conventional commit messages for staged changes.
//!
//! # Overview
//!
//! scribe reads the staged diff of the current git repository, asks one of
//! several text-generation providers (chosen by which API key is set) for a
//! Conventional Commits message, and lets the user accept, edit, regenerate or
//! cancel it before running `git commit`.

pub mod config;
pub mod error;
pub mod generate;
pub mod git;
pub mod interaction;
pub mod provider;
pub mod workflow;

// Re-export commonly used types
pub use config::{EnvSnapshot, Settings};
pub use error::{GenerationError, ScribeError};
pub use generate::{HttpGenerator, MessageSource};
pub use git::{Committer, GitCommitter, StagedChangeSet};
pub use interaction::{Choice, InteractionLoop, Outcome};
pub use provider::{Provider, ProviderCredential, select_provider};
