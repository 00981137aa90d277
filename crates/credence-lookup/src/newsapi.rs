//! NewsAPI Search
//!
//! Implements [`NewsSearch`] against NewsAPI's `/v2/everything` endpoint.
//! An API key is required; callers decide whether a client is constructed at all.

use async_trait::async_trait;
use credence_domain::traits::{NewsArticle, NewsQuery, NewsSearch};
use credence_domain::LookupError;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default NewsAPI base URL
pub const DEFAULT_NEWS_ENDPOINT: &str = "https://newsapi.org";

/// Placeholder key that means "no key configured"
pub const PLACEHOLDER_API_KEY: &str = "demo_key";

/// NewsAPI client
pub struct NewsApiClient {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    status: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    #[serde(default)]
    source: RawSource,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSource {
    #[serde(default)]
    name: Option<String>,
}

impl NewsApiClient {
    /// Create a new NewsAPI client
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Base URL (e.g., "https://newsapi.org")
    /// - `api_key`: NewsAPI key, sent as `X-Api-Key`
    /// - `timeout`: Per-request timeout
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(crate::wikipedia::DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| LookupError::Transient(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }
}

/// Whether `key` is a usable API key (non-empty and not the placeholder)
pub fn is_usable_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != PLACEHOLDER_API_KEY
}

#[async_trait]
impl NewsSearch for NewsApiClient {
    async fn search(&self, query: &NewsQuery) -> Result<Vec<NewsArticle>, LookupError> {
        let url = format!("{}/v2/everything", self.endpoint);
        let page_size = query.page_size.to_string();

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("q", query.query.as_str()),
                ("sortBy", query.sort_by.as_str()),
                ("pageSize", page_size.as_str()),
                ("language", query.language.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LookupError::Timeout
                } else {
                    LookupError::Transient(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body: NewsResponse = response.json().await.map_err(|e| {
            LookupError::Transient(format!("HTTP {}: failed to parse response: {}", status, e))
        })?;

        let articles = parse_articles(body)?;
        debug!("News search for '{}' returned {} articles", query.query, articles.len());
        Ok(articles)
    }
}

fn parse_articles(body: NewsResponse) -> Result<Vec<NewsArticle>, LookupError> {
    if body.status != "ok" {
        return Err(LookupError::Transient(format!(
            "NewsAPI error {}: {}",
            body.code.unwrap_or_default(),
            body.message.unwrap_or_default()
        )));
    }

    Ok(body
        .articles
        .into_iter()
        .filter_map(|raw| {
            Some(NewsArticle {
                title: raw.title?,
                url: raw.url?,
                source: raw.source.name.unwrap_or_default(),
                description: raw.description.filter(|d| !d.trim().is_empty()),
            })
        })
        .collect())
}
