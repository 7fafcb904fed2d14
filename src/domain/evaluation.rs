//! Evaluation result and failure types.
//!
//! The result shape mirrors the JSON structure the model is instructed to
//! emit. Deserializing into these typed records is the only validation the
//! pipeline performs; scores are not range-checked and `overallScore` is not
//! recomputed from the three dimension scores.

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Competitive landscape assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitors {
    pub existing_solutions: String,
    pub differentiation: String,
}

/// Fit with BMW Group strategy, brand, and values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmwAlignment {
    pub strategy_fit: String,
    pub brand_fit: String,
    pub corporate_values: String,
}

/// Desirability dimension: does anyone want this?
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Desirability {
    /// 1–10 rating as returned by the model; not range-checked.
    pub score: f64,
    pub justification: String,
    pub market_need: String,
    pub customer_appeal: String,
}

/// Feasibility dimension: can it be built?
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feasibility {
    pub score: f64,
    pub justification: String,
    pub technical_complexity: String,
    pub resource_requirements: String,
    pub regulatory_challenges: String,
}

/// Viability dimension: can it sustain a business?
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viability {
    pub score: f64,
    pub justification: String,
    pub market_potential: String,
    pub cost_structure: String,
    pub competitive_positioning: String,
}

/// Overall verdict aggregated by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallEvaluation {
    /// Expected to be the mean of the three dimension scores; trusted as-is.
    pub overall_score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub risks: Vec<String>,
    pub recommendation: Recommendation,
}

/// Model's recommendation tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Strong,
    Moderate,
    Weak,
}

/// Full structured evaluation as emitted by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub competitors: Competitors,
    pub bmw_alignment: BmwAlignment,
    pub desirability: Desirability,
    pub feasibility: Feasibility,
    pub viability: Viability,
    pub overall_evaluation: OverallEvaluation,
    pub improvements: Vec<String>,
}

/// Uniform failure object returned for every failed evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationFailure {
    /// Failure kind: `configuration_error`, `upstream_error`, or `parse_error`.
    pub error: String,
    /// Human-readable detail from the underlying error.
    pub message: String,
    /// Always `true`; marks the object as a fallback rather than a result.
    pub fallback: bool,
}

impl EvaluationFailure {
    pub fn new<K: Into<String>, M: Into<String>>(error: K, message: M) -> Self {
        Self { error: error.into(), message: message.into(), fallback: true }
    }
}

impl From<AppError> for EvaluationFailure {
    fn from(err: AppError) -> Self {
        let kind = match &err {
            AppError::Configuration(_) => "configuration_error",
            AppError::Io(_)
            | AppError::Transport(_)
            | AppError::UpstreamStatus { .. }
            | AppError::MalformedProviderResponse(_) => "upstream_error",
            AppError::EvaluationParse(_) | AppError::Json(_) => "parse_error",
        };
        EvaluationFailure::new(kind, err.to_string())
    }
}
