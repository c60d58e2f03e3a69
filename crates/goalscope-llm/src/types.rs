// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible chat-completions and embeddings wire types.

use serde::{Deserialize, Serialize};

// --- Chat completions ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// "system", "user", or "assistant".
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Assistant message in a choice. Some providers send `content: null`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

// --- Embeddings ---

#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingRequest<'a> {
    pub model: &'a str,
    pub input: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingResponse {
    pub data: Vec<EmbeddingData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingData {
    pub embedding: Vec<f32>,
}

// --- Errors ---

/// Error envelope returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
}

/// Best human-readable message from an error body.
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => match parsed.error.type_ {
            Some(kind) => format!("{kind}: {}", parsed.error.message),
            None => parsed.error.message,
        },
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_serializes_openai_shape() {
        let req = ChatRequest {
            model: "llama-3.3-70b-versatile".into(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            max_tokens: 1200,
            temperature: 0.1,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["max_tokens"], 1200);
    }

    #[test]
    fn chat_response_tolerates_null_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null},"finish_reason":"stop"}]}"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(resp.choices[0].message.content.is_none());
        assert!(resp.model.is_none());
    }

    #[test]
    fn error_message_prefers_structured_body() {
        let body = r#"{"error":{"message":"Rate limit reached","type":"tokens"}}"#;
        assert_eq!(error_message(body), "tokens: Rate limit reached");
        assert_eq!(error_message("upstream timeout"), "upstream timeout");
        assert_eq!(error_message(""), "empty response body");
    }
}
