//! Error types for scribe modules using thiserror.

use thiserror::Error;

/// Errors from a single generation request.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Request to {provider} failed")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} did not respond within {secs} seconds")]
    Timeout { provider: &'static str, secs: u64 },

    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} response has no completion text: {detail}")]
    MissingText {
        provider: &'static str,
        detail: String,
    },

    #[error("{provider} returned an empty completion")]
    EmptyCompletion { provider: &'static str },
}

/// Top-level errors surfaced to the user.
///
/// Every variant is terminal. The only retry path is the user choosing
/// "regenerate" in the interaction loop.
#[derive(Error, Debug)]
pub enum ScribeError {
    #[error("Not a git working tree. Run git scribe from inside a repository.")]
    NotARepository,

    #[error("No staged changes. Stage files with `git add` first.")]
    NoStagedChanges,

    #[error(
        "No provider configured. Set one of ANTHROPIC_API_KEY, OPENAI_API_KEY or GEMINI_API_KEY"
    )]
    NoProviderConfigured,

    #[error("Failed to generate commit message")]
    GenerationFailed(#[from] GenerationError),

    #[error("Aborting commit due to empty commit message")]
    EmptyMessage,

    #[error("git commit failed: {0}")]
    CommitFailed(String),

    #[error("Editor failed: {0}")]
    EditorFailed(String),

    #[error("Failed to read input")]
    Prompt(#[source] std::io::Error),

    #[error("git operation failed")]
    Git(#[source] git2::Error),
}

impl ScribeError {
    /// Process exit code for this failure kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            ScribeError::NotARepository => 2,
            ScribeError::NoStagedChanges => 3,
            ScribeError::NoProviderConfigured => 4,
            ScribeError::GenerationFailed(_) => 5,
            ScribeError::EmptyMessage => 6,
            ScribeError::CommitFailed(_) => 7,
            ScribeError::EditorFailed(_) => 8,
            ScribeError::Prompt(_) | ScribeError::Git(_) => 1,
        }
    }
}
