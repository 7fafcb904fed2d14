//! HTTP boundary for the evaluation pipeline.
//!
//! One POST route. The boundary owns input validation (empty descriptions
//! are rejected before the prompt builder runs) and the translation of
//! `EvaluationFailure` into an error status; the pipeline itself never sees
//! HTTP concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::domain::{AppError, EvaluationResult};
use crate::ports::ChatClient;
use crate::services::Evaluator;

/// Request body for `POST /api/evaluate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    #[serde(default)]
    pub idea_description: String,
}

/// Build the application router around a shared evaluator.
pub fn router<C>(evaluator: Arc<Evaluator<C>>) -> Router
where
    C: ChatClient + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/evaluate", post(evaluate::<C>))
        .with_state(evaluator)
}

/// Bind and serve the API on the given port.
pub async fn serve<C>(evaluator: Arc<Evaluator<C>>, port: u16) -> Result<(), AppError>
where
    C: ChatClient + Send + Sync + 'static,
{
    let app = router(evaluator);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Configuration(format!("Failed to bind {addr}: {e}")))?;
    info!("idealens API listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Configuration(format!("Server error: {e}")))?;

    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn evaluate<C>(
    State(evaluator): State<Arc<Evaluator<C>>>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluationResult>, (StatusCode, Json<Value>)>
where
    C: ChatClient + Send + Sync + 'static,
{
    if request.idea_description.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "ideaDescription must not be empty"})),
        ));
    }

    let idea = request.idea_description;
    let outcome = tokio::task::spawn_blocking(move || evaluator.evaluate(&idea))
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "evaluation task panicked");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "internal", "message": "evaluation task failed", "fallback": true})),
            )
        })?;

    match outcome {
        Ok(result) => Ok(Json(result)),
        Err(failure) => {
            let body = serde_json::to_value(&failure)
                .unwrap_or_else(|_| json!({"error": failure.error, "fallback": true}));
            Err((StatusCode::BAD_GATEWAY, Json(body)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::domain::Config;
    use crate::ports::ChatRequest;

    /// Counts calls so tests can prove the pipeline was never entered.
    struct CountingClient {
        calls: Arc<AtomicUsize>,
        response: Result<String, u16>,
    }

    impl ChatClient for CountingClient {
        fn complete(&self, _request: &ChatRequest) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(content) => Ok(content.clone()),
                Err(status) => Err(AppError::UpstreamStatus {
                    status: *status,
                    detail: "Service Unavailable".into(),
                }),
            }
        }
    }

    fn app_with(response: Result<String, u16>) -> (Router, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let client = CountingClient { calls: Arc::clone(&calls), response };
        let evaluator = Arc::new(Evaluator::new(Config::new("test-key"), client));
        (router(evaluator), calls)
    }

    fn post_evaluate(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/evaluate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn fenced_evaluation() -> String {
        r#"```json
{
  "competitors": {"existingSolutions": "Few", "differentiation": "None"},
  "bmwAlignment": {"strategyFit": "Low", "brandFit": "Low", "corporateValues": "Neutral"},
  "desirability": {"score": 5, "justification": "j", "marketNeed": "m", "customerAppeal": "c"},
  "feasibility": {"score": 5, "justification": "j", "technicalComplexity": "t", "resourceRequirements": "r", "regulatoryChallenges": "g"},
  "viability": {"score": 5, "justification": "j", "marketPotential": "m", "costStructure": "c", "competitivePositioning": "p"},
  "overallEvaluation": {"overallScore": 5, "strengths": ["s"], "weaknesses": ["w"], "risks": ["r"], "recommendation": "Weak"},
  "improvements": ["i"]
}
```"#
            .to_string()
    }

    #[tokio::test]
    async fn empty_description_is_rejected_before_the_pipeline_runs() {
        let (app, calls) = app_with(Ok(fenced_evaluation()));

        let response =
            app.oneshot(post_evaluate(r#"{"ideaDescription": "   "}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_evaluation_returns_result_body() {
        let (app, _calls) = app_with(Ok(fenced_evaluation()));

        let response = app
            .oneshot(post_evaluate(r#"{"ideaDescription": "umbrella subscriptions"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["overallEvaluation"]["recommendation"], "Weak");
        assert!(body.get("bmwAlignment").is_some());
    }

    #[tokio::test]
    async fn upstream_failure_maps_to_bad_gateway_with_fallback_body() {
        let (app, _calls) = app_with(Err(503));

        let response = app
            .oneshot(post_evaluate(r#"{"ideaDescription": "umbrella subscriptions"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["fallback"], true);
        assert_eq!(body["error"], "upstream_error");
        assert!(body["message"].as_str().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let (app, _calls) = app_with(Ok(fenced_evaluation()));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }
}
