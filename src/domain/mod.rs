pub mod config;
pub mod error;
pub mod evaluation;

pub use config::{Config, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_PORT};
pub use error::AppError;
pub use evaluation::{
    BmwAlignment, Competitors, Desirability, EvaluationFailure, EvaluationResult, Feasibility,
    OverallEvaluation, Recommendation, Viability,
};
