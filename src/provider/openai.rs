//! OpenAI Chat Completions API.

use serde::Deserialize;
use serde_json::{Value, json};

use super::excerpt;

pub const BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

pub fn build_request(model: &str, system: &str, user: &str, max_tokens: u32) -> Value {
    json!({
        "model": model,
        "max_tokens": max_tokens,
        "messages": [
            { "role": "system", "content": system },
            { "role": "user", "content": user }
        ]
    })
}

/// Content of the first choice's message.
pub fn parse_response(body: &str) -> Result<String, String> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| format!("invalid JSON ({e}): {}", excerpt(body)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| format!("no message content: {}", excerpt(body)))
}
