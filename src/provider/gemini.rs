//! Google Gemini `generateContent` API.

use serde::Deserialize;
use serde_json::{Value, json};

use super::excerpt;

pub const BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// The model is part of the URL for Gemini, not the body.
pub fn build_request(system: &str, user: &str, max_tokens: u32) -> Value {
    json!({
        "systemInstruction": {
            "parts": [ { "text": system } ]
        },
        "contents": [
            { "role": "user", "parts": [ { "text": user } ] }
        ],
        "generationConfig": {
            "maxOutputTokens": max_tokens
        }
    })
}

/// Text of the first part of the first candidate.
pub fn parse_response(body: &str) -> Result<String, String> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| format!("invalid JSON ({e}): {}", excerpt(body)))?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| format!("no candidate text: {}", excerpt(body)))
}
