//! idealens: score free-text innovation concepts with an LLM evaluation rubric.
//!
//! The pipeline is a single-shot, stateless transform: build a deterministic
//! prompt from a fixed template, call a hosted chat-completion endpoint, and
//! extract the structured JSON evaluation from the free-form completion text.
//! All domain content — scores, justifications, recommendations — originates
//! from the remote model; this crate only guarantees the structure of what it
//! returns, or an honest failure object.

pub mod domain;
pub mod ports;
pub mod server;
pub mod services;

pub use domain::{AppError, Config, EvaluationFailure, EvaluationResult};
pub use services::{Evaluator, HttpChatClient};

/// Evaluate a concept description using configuration from the environment.
///
/// Convenience entry point for callers that do not need to inject their own
/// configuration or client. A missing API key surfaces here as a
/// `configuration_error` failure before any request is attempted.
pub fn evaluate(idea_description: &str) -> Result<EvaluationResult, EvaluationFailure> {
    let config = Config::from_env().map_err(EvaluationFailure::from)?;
    let client = HttpChatClient::new(&config).map_err(EvaluationFailure::from)?;
    Evaluator::new(config, client).evaluate(idea_description)
}
