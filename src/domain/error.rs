use std::io;

use thiserror::Error;

/// Library-wide error type for idealens operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Network-level failure reaching the model provider.
    #[error("Request to model provider failed: {0}")]
    Transport(String),

    /// Provider answered with a non-success HTTP status.
    #[error("Model provider returned {status}: {detail}")]
    UpstreamStatus { status: u16, detail: String },

    /// Provider 2xx body did not carry a usable completion.
    #[error("Malformed provider response: {0}")]
    MalformedProviderResponse(String),

    /// Completion text held no parsable evaluation object.
    #[error("Failed to parse evaluation from model output: {0}")]
    EvaluationParse(String),

    /// JSON serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}
