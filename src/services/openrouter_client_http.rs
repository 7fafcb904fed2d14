//! OpenRouter chat-completion client implementation using reqwest.

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use url::Url;

use crate::domain::{AppError, Config};
use crate::ports::{ChatClient, ChatRequest};

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
///
/// One request per call, no retry, no client-side timeout: if the provider
/// hangs, the caller hangs with it.
#[derive(Clone)]
pub struct HttpChatClient {
    api_key: String,
    endpoint: Url,
    client: Client,
}

impl std::fmt::Debug for HttpChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpChatClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpChatClient {
    /// Create a new HTTP client for the configured provider.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let endpoint = chat_completions_url(&config.base_url)?;

        // Completions can run long; reqwest's 30s default must not cut them off.
        let client = Client::builder()
            .timeout(None)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { api_key: config.api_key.clone(), endpoint, client })
    }
}

/// Resolve the chat-completions path against the provider base URL.
fn chat_completions_url(base_url: &Url) -> Result<Url, AppError> {
    let joined = format!("{}/chat/completions", base_url.as_str().trim_end_matches('/'));
    Url::parse(&joined)
        .map_err(|e| AppError::Configuration(format!("Invalid provider URL '{joined}': {e}")))
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl ChatClient for HttpChatClient {
    fn complete(&self, request: &ChatRequest) -> Result<String, AppError> {
        tracing::debug!(model = %request.model, "dispatching chat completion");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_else(|_| "no response body".to_string());
            return Err(AppError::UpstreamStatus { status: status.as_u16(), detail });
        }

        let completion: CompletionResponse =
            response.json().map_err(|e| AppError::MalformedProviderResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::MalformedProviderResponse("completion carried no choices".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::prompt_builder;

    fn client_for(server: &mockito::Server) -> HttpChatClient {
        let config = Config::new("fake-key")
            .with_base_url(Url::parse(&server.url()).unwrap());
        HttpChatClient::new(&config).unwrap()
    }

    fn test_request() -> ChatRequest {
        let config = Config::new("fake-key");
        prompt_builder::build_request(&config, "test idea").unwrap()
    }

    #[test]
    fn chat_completions_path_joins_cleanly() {
        let base = Url::parse("https://openrouter.ai/api/v1").unwrap();
        assert_eq!(
            chat_completions_url(&base).unwrap().as_str(),
            "https://openrouter.ai/api/v1/chat/completions"
        );

        let trailing = Url::parse("https://openrouter.ai/api/v1/").unwrap();
        assert_eq!(
            chat_completions_url(&trailing).unwrap().as_str(),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn complete_returns_first_choice_content() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices": [{"message": {"role": "assistant", "content": "the completion text"}}]}"#,
            )
            .create();

        let client = client_for(&server);
        let content = client.complete(&test_request()).unwrap();

        assert_eq!(content, "the completion text");
    }

    #[test]
    fn complete_sends_bearer_token() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer fake-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "ok"}}]}"#)
            .create();

        let client = client_for(&server);
        client.complete(&test_request()).unwrap();
        mock.assert();
    }

    #[test]
    fn complete_surfaces_upstream_status() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/chat/completions")
            .with_status(503)
            .with_body("Service Unavailable")
            .create();

        let client = client_for(&server);
        let err = client.complete(&test_request()).unwrap_err();

        match err {
            AppError::UpstreamStatus { status, .. } => assert_eq!(status, 503),
            other => panic!("Expected UpstreamStatus, got {:?}", other),
        }
        // The rendered message names the status code.
        assert!(client.complete(&test_request()).unwrap_err().to_string().contains("503"));
    }

    #[test]
    fn complete_rejects_response_without_choices() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create();

        let client = client_for(&server);
        let err = client.complete(&test_request()).unwrap_err();

        match err {
            AppError::MalformedProviderResponse(_) => {}
            other => panic!("Expected MalformedProviderResponse, got {:?}", other),
        }
    }
}
