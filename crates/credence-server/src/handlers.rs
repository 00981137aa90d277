//! HTTP request handlers for the credibility service.
//!
//! Implements fact checking, topic research and health check endpoints using axum.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use credence_checker::{CheckerConfig, CheckerError, FactChecker, ResearchService};
use credence_domain::traits::{KnowledgeBase, NewsSearch, NlpModel, Summarizer};
use credence_domain::{Capability, FactCheckResult, ResearchResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Fact-checking pipeline
    pub checker: Arc<FactChecker>,
    /// Topic research pipeline
    pub research: Arc<ResearchService>,
    /// Optional summarizer, reported by the health check
    pub summarizer: Capability<Arc<dyn Summarizer>>,
    /// Whether news search is configured
    pub news_available: bool,
}

impl AppState {
    /// Wire the pipelines to their collaborators
    pub fn new(
        nlp: Capability<Arc<dyn NlpModel>>,
        summarizer: Capability<Arc<dyn Summarizer>>,
        knowledge_base: Arc<dyn KnowledgeBase>,
        news: Capability<Arc<dyn NewsSearch>>,
        config: &CheckerConfig,
    ) -> Self {
        let news_available = news.is_available();
        let research = ResearchService::new(Arc::clone(&knowledge_base), config.lookup_timeout());
        let checker = FactChecker::new(nlp, knowledge_base, news, config);

        Self {
            checker: Arc::new(checker),
            research: Arc::new(research),
            summarizer,
            news_available,
        }
    }
}

/// Fact-check request
#[derive(Debug, Deserialize)]
pub struct FactCheckRequest {
    /// Article text to assess
    pub content: String,
}

/// Research request
#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    /// Topic to research
    pub topic: String,
    /// Maximum sources to return (default 5, clamped to [1, 10])
    #[serde(default)]
    pub max_sources: Option<i64>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Whether the NLP model loaded
    pub nlp_model_loaded: bool,
    /// Whether the summarizer is available
    pub summarizer_loaded: bool,
    /// Whether news search is configured
    pub news_search_available: bool,
    /// Whether the knowledge base can be queried (always true)
    pub knowledge_base_available: bool,
    /// "operational" or "degraded"
    pub status: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Pipeline could not run
    Checker(CheckerError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Checker(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<CheckerError> for AppError {
    fn from(e: CheckerError) -> Self {
        AppError::Checker(e)
    }
}

/// POST /fact_check - Assess the credibility of article text
async fn fact_check(
    State(state): State<AppState>,
    Json(request): Json<FactCheckRequest>,
) -> Result<Json<FactCheckResult>, AppError> {
    let result = state.checker.check(&request.content).await.map_err(|e| {
        error!("Fact check failed: {}", e);
        AppError::from(e)
    })?;
    Ok(Json(result))
}

/// POST /research - Collect sources for a topic
async fn research(
    State(state): State<AppState>,
    Json(request): Json<ResearchRequest>,
) -> Json<ResearchResult> {
    Json(
        state
            .research
            .research(&request.topic, request.max_sources)
            .await,
    )
}

/// GET /health - Collaborator availability
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let nlp_model_loaded = state.checker.is_ready();
    let status = if nlp_model_loaded { "operational" } else { "degraded" };

    Json(HealthCheckResponse {
        nlp_model_loaded,
        summarizer_loaded: state.summarizer.is_available(),
        news_search_available: state.news_available,
        knowledge_base_available: true,
        status: status.to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/fact_check", post(fact_check))
        .route("/research", post(research))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use credence_lookup::MockKnowledgeBase;
    use tower::ServiceExt; // for oneshot

    fn create_test_state(nlp: Capability<Arc<dyn NlpModel>>) -> AppState {
        AppState::new(
            nlp,
            Capability::unavailable("summarizer disabled"),
            Arc::new(MockKnowledgeBase::new()),
            Capability::unavailable("no API key configured"),
            &CheckerConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_test_state(credence_nlp::load_model(&Default::default())));

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_fact_check_without_model() {
        let app = create_router(create_test_state(Capability::unavailable("model failed to load")));

        let request = Request::builder()
            .method("POST")
            .uri("/fact_check")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"content": "NASA said 3 things."}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
