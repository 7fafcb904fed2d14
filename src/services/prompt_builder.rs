//! Prompt construction for concept evaluation.
//!
//! Substitutes the concept description into the fixed evaluation template and
//! pairs it with the system instruction. Rendering uses strict Jinja-style
//! interpolation; the description is inserted verbatim with no escaping or
//! truncation. The builder performs no input validation — rejecting empty
//! input is the boundary layer's responsibility.

use std::sync::OnceLock;

use minijinja::{Environment, UndefinedBehavior, context};

use crate::domain::{AppError, Config};
use crate::ports::{ChatMessage, ChatRequest};

/// Above the deterministic default so the model does not parrot the worked structure.
pub const TEMPERATURE: f64 = 0.7;

/// Sized to fit the full seven-field evaluation response.
pub const MAX_COMPLETION_TOKENS: u32 = 2048;

pub(crate) const SYSTEM_PROMPT: &str = "You are a critical innovation evaluator for the BMW Group. \
Judge each concept strictly on its own merits. Do not produce templated or uniformly positive \
answers, and do not soften scores to be polite; honest, differentiated scoring is required. \
Respond with a single JSON object and nothing else.";

const EVALUATION_TEMPLATE: &str = r#"Evaluate the following innovation concept.

Concept description:
{{ idea_description }}

Assess competitors and differentiation, alignment with BMW Group strategy,
brand, and corporate values, and score desirability, feasibility, and
viability from 1 (very poor) to 10 (excellent). Justify every score. Compute
the overall score as the average of the three dimension scores and give a
recommendation of "Strong", "Moderate", or "Weak".

Respond with a single JSON object using exactly this structure:

{
  "competitors": {
    "existingSolutions": "...",
    "differentiation": "..."
  },
  "bmwAlignment": {
    "strategyFit": "...",
    "brandFit": "...",
    "corporateValues": "..."
  },
  "desirability": {
    "score": 0,
    "justification": "...",
    "marketNeed": "...",
    "customerAppeal": "..."
  },
  "feasibility": {
    "score": 0,
    "justification": "...",
    "technicalComplexity": "...",
    "resourceRequirements": "...",
    "regulatoryChallenges": "..."
  },
  "viability": {
    "score": 0,
    "justification": "...",
    "marketPotential": "...",
    "costStructure": "...",
    "competitivePositioning": "..."
  },
  "overallEvaluation": {
    "overallScore": 0,
    "strengths": ["..."],
    "weaknesses": ["..."],
    "risks": ["..."],
    "recommendation": "Strong"
  },
  "improvements": ["..."]
}

Return only the JSON object, with no commentary before or after it."#;

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Build the chat-completion request for a concept description.
///
/// Pure function of its input and the configured model identifier; the same
/// input always yields the same payload.
pub fn build_request(config: &Config, idea_description: &str) -> Result<ChatRequest, AppError> {
    let env = ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env
    });

    let user_prompt = env
        .render_str(EVALUATION_TEMPLATE, context! { idea_description => idea_description })
        .map_err(|err| {
            AppError::Configuration(format!("Failed to render evaluation template: {err}"))
        })?;

    Ok(ChatRequest {
        model: config.model.clone(),
        messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user_prompt)],
        temperature: TEMPERATURE,
        max_tokens: MAX_COMPLETION_TOKENS,
        stream: false,
    })
}
