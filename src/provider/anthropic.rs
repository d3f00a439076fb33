//! Anthropic Messages API.

use serde::Deserialize;
use serde_json::{Value, json};

use super::excerpt;

pub const BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
pub const API_VERSION: &str = "2023-06-01";

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

pub fn build_request(model: &str, system: &str, user: &str, max_tokens: u32) -> Value {
    json!({
        "model": model,
        "max_tokens": max_tokens,
        "system": system,
        "messages": [
            { "role": "user", "content": user }
        ]
    })
}

/// Text of the first `text` content block.
pub fn parse_response(body: &str) -> Result<String, String> {
    let response: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| format!("invalid JSON ({e}): {}", excerpt(body)))?;

    response
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .ok_or_else(|| format!("no text content block: {}", excerpt(body)))
}
