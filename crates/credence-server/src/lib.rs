//! Credence Server
//!
//! HTTP front end for the credibility pipeline: `POST /fact_check`,
//! `POST /research` and `GET /health`.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use credence_domain::traits::{KnowledgeBase, NewsSearch};
use credence_domain::{Capability, LookupError};
use credence_lookup::{NewsApiClient, WikipediaClient};
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A lookup client could not be constructed
    #[error("Failed to set up lookup client: {0}")]
    Lookup(#[from] LookupError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Initialize logging, honouring `RUST_LOG` before the configured filter
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // A subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Load every collaborator and wire the application state
pub fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    let timeout = config.checker.lookup_timeout();

    let nlp = credence_nlp::load_model(&config.nlp);
    let summarizer = credence_nlp::load_summarizer(config.summarizer.enabled, &nlp);

    let wikipedia: Arc<dyn KnowledgeBase> = Arc::new(WikipediaClient::new(
        &config.wikipedia.endpoint,
        &config.wikipedia.article_base_url,
        &config.wikipedia.user_agent,
        timeout,
    )?);

    let news: Capability<Arc<dyn NewsSearch>> = match config.news.api_key() {
        Some(key) => {
            let client = NewsApiClient::new(&config.news.endpoint, key, timeout)?;
            info!("News search enabled");
            Capability::available(Arc::new(client) as Arc<dyn NewsSearch>)
        }
        None => {
            warn!("No news API key configured, news search disabled");
            Capability::unavailable("no news API key configured")
        }
    };

    Ok(AppState::new(nlp, summarizer, wikipedia, news, &config.checker))
}

/// Start the HTTP server
///
/// Initializes tracing, loads collaborators, and serves until shutdown.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    init_tracing(&config.log_filter);

    info!("Starting Credence server");
    info!("Bind address: {}", config.bind_addr());
    info!("Lookup timeout: {} seconds", config.checker.lookup_timeout_secs);

    let state = build_state(&config)?;
    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_state_from_default_config() {
        let mut config = ServerConfig::default_test_config();
        config.news.api_key = None;
        let state = build_state(&config).unwrap();
        assert!(state.checker.is_ready());
        assert!(state.summarizer.is_available());
    }

    #[test]
    fn test_build_state_with_disabled_model() {
        let mut config = ServerConfig::default_test_config();
        config.nlp.enabled = false;
        let state = build_state(&config).unwrap();
        assert!(!state.checker.is_ready());
        assert!(!state.summarizer.is_available());
    }
}
