//! Runtime configuration for the evaluation pipeline.
//!
//! Read once from the environment at startup and passed explicitly into the
//! pipeline; the core performs no ambient environment lookups of its own.

use url::Url;

use crate::domain::AppError;

/// Default instruction-tuned model used when `OPENROUTER_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.1-8b-instruct";

/// Default provider endpoint used when `OPENROUTER_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default listening port for the HTTP layer.
pub const DEFAULT_PORT: u16 = 3001;

/// Application-wide configuration.
#[derive(Clone)]
pub struct Config {
    /// Bearer token for the model provider. Required.
    pub api_key: String,
    /// Model identifier sent with every completion request.
    pub model: String,
    /// Base URL of the OpenAI-compatible provider API.
    pub base_url: Url,
    /// Listening port for the HTTP layer.
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Create a configuration with the given API key and all defaults.
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: Url::parse(DEFAULT_BASE_URL).expect("Default base URL must be valid"),
            port: DEFAULT_PORT,
        }
    }

    /// Override the provider base URL.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Override the model identifier.
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    /// Load configuration from the environment.
    ///
    /// `OPENROUTER_API_KEY` is required; `OPENROUTER_MODEL`,
    /// `OPENROUTER_BASE_URL`, and `PORT` fall back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = std::env::var("OPENROUTER_API_KEY").map_err(|_| {
            AppError::config_error("OPENROUTER_API_KEY environment variable not set")
        })?;

        let mut config = Self::new(api_key);

        if let Ok(model) = std::env::var("OPENROUTER_MODEL") {
            config.model = model;
        }

        if let Ok(base_url) = std::env::var("OPENROUTER_BASE_URL") {
            config.base_url = Url::parse(&base_url).map_err(|err| {
                AppError::Configuration(format!("Invalid OPENROUTER_BASE_URL '{base_url}': {err}"))
            })?;
        }

        if let Ok(port) = std::env::var("PORT") {
            config.port = port.parse().map_err(|err| {
                AppError::Configuration(format!("Invalid PORT '{port}': {err}"))
            })?;
        }

        Ok(config)
    }
}
