//! Provider-backed commit message generation.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::Settings;
use crate::error::GenerationError;
use crate::git::StagedChangeSet;
use crate::provider::{Provider, ProviderCredential, excerpt};

use super::prompt::build_commit_prompt;

/// Output token limit for every provider.
pub const MAX_OUTPUT_TOKENS: u32 = 256;

/// Source of commit message proposals.
///
/// This abstraction allows the interaction loop to run against a fake
/// provider in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Produce one proposal for `changes`, trimmed and non-empty.
    async fn generate(&self, changes: &StagedChangeSet) -> Result<String, GenerationError>;
}

/// Generator that calls the selected provider's HTTP API.
///
/// Every call is an independent request: nothing is cached and nothing is
/// retried.
pub struct HttpGenerator {
    client: Client,
    credential: ProviderCredential,
    model: String,
    base_url: String,
    timeout_secs: u64,
}

impl HttpGenerator {
    pub fn new(credential: ProviderCredential, settings: &Settings) -> Result<Self, GenerationError> {
        let provider = credential.provider;
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("git-scribe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GenerationError::Client)?;

        Ok(Self {
            client,
            model: settings
                .model
                .clone()
                .unwrap_or_else(|| provider.default_model().to_string()),
            base_url: settings
                .api_base
                .clone()
                .unwrap_or_else(|| provider.default_base_url().to_string()),
            timeout_secs: settings.timeout.as_secs(),
            credential,
        })
    }

    pub fn provider(&self) -> Provider {
        self.credential.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn map_send_error(&self, source: reqwest::Error) -> GenerationError {
        let provider = self.provider().as_str();
        if source.is_timeout() {
            GenerationError::Timeout {
                provider,
                secs: self.timeout_secs,
            }
        } else {
            GenerationError::Http { provider, source }
        }
    }
}

#[async_trait]
impl MessageSource for HttpGenerator {
    async fn generate(&self, changes: &StagedChangeSet) -> Result<String, GenerationError> {
        let provider = self.provider();
        let prompt = build_commit_prompt(changes);
        let body = provider.build_request(&self.model, &prompt.system, &prompt.user, MAX_OUTPUT_TOKENS);
        let url = provider.endpoint(&self.base_url, &self.model);

        debug!(
            %provider,
            model = %self.model,
            prompt_chars = prompt.system.len() + prompt.user.len(),
            "sending completion request"
        );

        let request = provider.authorize(self.client.post(&url), self.credential.secret());
        let response = request
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(GenerationError::Status {
                provider: provider.as_str(),
                status: status.as_u16(),
                body: excerpt(&text),
            });
        }

        let completion = provider.parse_response(&text)?;
        let message = completion.trim();
        if message.is_empty() {
            return Err(GenerationError::EmptyCompletion {
                provider: provider.as_str(),
            });
        }

        debug!(%provider, chars = message.len(), "received completion");
        Ok(message.to_string())
    }
}
