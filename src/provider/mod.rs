//! Text-generation providers and credential-based selection.

pub mod anthropic;
pub mod gemini;
pub mod openai;

use std::fmt;

use reqwest::RequestBuilder;
use serde_json::Value;

use crate::config::EnvSnapshot;
use crate::error::{GenerationError, ScribeError};

/// Supported providers, in selection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Anthropic,
    OpenAi,
    Gemini,
}

impl Provider {
    /// All providers, highest priority first.
    pub const PRIORITY: [Provider; 3] = [Provider::Anthropic, Provider::OpenAi, Provider::Gemini];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Anthropic => "Anthropic",
            Provider::OpenAi => "OpenAI",
            Provider::Gemini => "Gemini",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn env_var(&self) -> &'static str {
        match self {
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Anthropic => anthropic::DEFAULT_MODEL,
            Provider::OpenAi => openai::DEFAULT_MODEL,
            Provider::Gemini => gemini::DEFAULT_MODEL,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Anthropic => anthropic::BASE_URL,
            Provider::OpenAi => openai::BASE_URL,
            Provider::Gemini => gemini::BASE_URL,
        }
    }

    /// Full endpoint URL for a completion request.
    pub fn endpoint(&self, base_url: &str, model: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            Provider::Anthropic => format!("{base}/v1/messages"),
            Provider::OpenAi => format!("{base}/v1/chat/completions"),
            Provider::Gemini => format!("{base}/v1beta/models/{model}:generateContent"),
        }
    }

    /// Attach the provider's authentication and protocol headers.
    pub fn authorize(&self, request: RequestBuilder, secret: &str) -> RequestBuilder {
        match self {
            Provider::Anthropic => request
                .header("x-api-key", secret)
                .header("anthropic-version", anthropic::API_VERSION),
            Provider::OpenAi => request.bearer_auth(secret),
            Provider::Gemini => request.header("x-goog-api-key", secret),
        }
    }

    /// Build the JSON request body.
    pub fn build_request(&self, model: &str, system: &str, user: &str, max_tokens: u32) -> Value {
        match self {
            Provider::Anthropic => anthropic::build_request(model, system, user, max_tokens),
            Provider::OpenAi => openai::build_request(model, system, user, max_tokens),
            Provider::Gemini => gemini::build_request(system, user, max_tokens),
        }
    }

    /// Extract the first completion's text from a response body.
    ///
    /// The text is returned as sent; trimming and the emptiness check happen
    /// in the generator.
    pub fn parse_response(&self, body: &str) -> Result<String, GenerationError> {
        let parsed = match self {
            Provider::Anthropic => anthropic::parse_response(body),
            Provider::OpenAi => openai::parse_response(body),
            Provider::Gemini => gemini::parse_response(body),
        };
        parsed.map_err(|detail| GenerationError::MissingText {
            provider: self.as_str(),
            detail,
        })
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The selected provider together with its secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderCredential {
    pub provider: Provider,
    secret: String,
}

impl ProviderCredential {
    pub fn new(provider: Provider, secret: impl Into<String>) -> Self {
        Self {
            provider,
            secret: secret.into(),
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for ProviderCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredential")
            .field("provider", &self.provider)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Pick the highest-priority provider whose key is present in `env`.
///
/// Pure: reads only the snapshot. Blank keys count as absent.
pub fn select_provider(env: &EnvSnapshot) -> Result<ProviderCredential, ScribeError> {
    Provider::PRIORITY
        .iter()
        .find_map(|provider| {
            env.get(provider.env_var())
                .map(|secret| ProviderCredential::new(*provider, secret.trim()))
        })
        .ok_or(ScribeError::NoProviderConfigured)
}

/// Render a short, single-line excerpt of an unexpected body for errors.
pub(crate) fn excerpt(body: &str) -> String {
    const MAX_EXCERPT: usize = 200;
    let flat: String = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > MAX_EXCERPT {
        let cut: String = flat.chars().take(MAX_EXCERPT).collect();
        format!("{cut}...")
    } else {
        flat
    }
}
