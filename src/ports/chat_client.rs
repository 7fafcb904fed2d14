//! Chat-completion client port definition.

use serde::Serialize;

use crate::domain::AppError;

/// One message in a chat-completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    /// Message role: "system" or "user".
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user<S: Into<String>>(content: S) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

/// Request payload for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,
    /// System and user messages, in order.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f64,
    /// Completion token budget.
    pub max_tokens: u32,
    /// Always false; streaming is not supported.
    pub stream: bool,
}

/// Port for chat-completion backends.
///
/// Implementations return the raw text content of the first completion
/// choice; interpreting that text is the extractor's job.
pub trait ChatClient {
    /// Execute one completion request and return the completion text.
    fn complete(&self, request: &ChatRequest) -> Result<String, AppError>;
}
