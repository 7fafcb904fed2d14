//! Evaluation pipeline: prompt construction, model call, JSON extraction.

use crate::domain::{AppError, Config, EvaluationFailure, EvaluationResult};
use crate::ports::ChatClient;
use crate::services::{prompt_builder, response_extractor};

/// Runs single-shot concept evaluations against a chat-completion backend.
///
/// Stateless between calls: each evaluation builds its own prompt and parses
/// its own response, so concurrent use needs no coordination.
pub struct Evaluator<C> {
    config: Config,
    client: C,
}

impl<C: ChatClient> Evaluator<C> {
    pub fn new(config: Config, client: C) -> Self {
        Self { config, client }
    }

    /// Evaluate a concept description.
    ///
    /// All-or-nothing: on any failure — transport, upstream status, or
    /// extraction — the caller receives a uniform `EvaluationFailure`
    /// instead of a raw error. No partial results are produced.
    pub fn evaluate(&self, idea_description: &str) -> Result<EvaluationResult, EvaluationFailure> {
        self.run(idea_description).map_err(|err| {
            tracing::error!(error = %err, "evaluation failed");
            EvaluationFailure::from(err)
        })
    }

    fn run(&self, idea_description: &str) -> Result<EvaluationResult, AppError> {
        let request = prompt_builder::build_request(&self.config, idea_description)?;
        let content = self.client.complete(&request)?;
        response_extractor::extract_evaluation(&content)
    }
}
