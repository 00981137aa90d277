//! Wikipedia Knowledge Base
//!
//! Implements [`KnowledgeBase`] against the MediaWiki Action API.
//!
//! # Features
//!
//! - Auto-suggestion through the search endpoint (`list=search`)
//! - Intro extracts limited to a sentence count (`prop=extracts`)
//! - Disambiguation detection via page props, with the listed options as
//!   candidates in page order (`action=parse`)
//! - Canonical URL and linked topics (`prop=info|links`)
//! - Per-request timeout
//!
//! # Examples
//!
//! ```no_run
//! use credence_lookup::WikipediaClient;
//! use credence_domain::traits::KnowledgeBase;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let wiki = WikipediaClient::default_endpoint()?;
//! let summary = wiki.summarize("Rust (programming language)", 2, true).await?;
//! println!("{}", summary.text);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use credence_domain::traits::{KnowledgeBase, PageInfo, Summary};
use credence_domain::LookupError;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

/// Default MediaWiki Action API endpoint
pub const DEFAULT_API_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// Default base URL for article links
pub const DEFAULT_ARTICLE_BASE: &str = "https://en.wikipedia.org/wiki/";

/// Default timeout for lookups (10 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent, as required by the Wikimedia API etiquette
pub const DEFAULT_USER_AGENT: &str = concat!("credence/", env!("CARGO_PKG_VERSION"));

/// First wikilink target of each bulleted line
static LIST_ITEM_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\*+[^\n]*?\[\[([^\]|#\n]+)").expect("valid regex")
});

/// Link prefixes that point outside the article namespace
const NON_ARTICLE_PREFIXES: &[&str] = &[
    "category", "file", "image", "media", "help", "portal", "special", "template", "wikipedia",
    "wikt", "wiktionary", "draft",
];

/// Knowledge base backed by Wikipedia
pub struct WikipediaClient {
    endpoint: String,
    article_base: String,
    client: reqwest::Client,
}

/// Top-level API response
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    query: Option<QueryBody>,
    #[serde(default)]
    parse: Option<ParseBody>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
struct ParseBody {
    #[serde(default)]
    wikitext: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Default, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<Page>,
    #[serde(default)]
    search: Vec<SearchHit>,
    #[serde(default)]
    searchinfo: Option<SearchInfo>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    pageprops: Option<PageProps>,
    #[serde(default)]
    fullurl: Option<String>,
    #[serde(default)]
    links: Vec<Link>,
}

impl Page {
    fn is_disambiguation(&self) -> bool {
        self.pageprops
            .as_ref()
            .is_some_and(|props| props.disambiguation.is_some())
    }

    fn link_titles(&self) -> Vec<String> {
        self.links.iter().map(|l| l.title.clone()).collect()
    }
}

#[derive(Debug, Deserialize)]
struct PageProps {
    #[serde(default)]
    disambiguation: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Link {
    title: String,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct SearchInfo {
    #[serde(default)]
    suggestion: Option<String>,
}

impl WikipediaClient {
    /// Create a new Wikipedia client
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Action API endpoint (e.g., "https://en.wikipedia.org/w/api.php")
    /// - `article_base`: Prefix for article URLs (e.g., "https://en.wikipedia.org/wiki/")
    /// - `user_agent`: User-Agent header sent with every request
    /// - `timeout`: Per-request timeout
    pub fn new(
        endpoint: impl Into<String>,
        article_base: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| LookupError::Transient(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            article_base: article_base.into(),
            client,
        })
    }

    /// Create a client for English Wikipedia with default settings
    pub fn default_endpoint() -> Result<Self, LookupError> {
        Self::new(
            DEFAULT_API_ENDPOINT,
            DEFAULT_ARTICLE_BASE,
            DEFAULT_USER_AGENT,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<QueryBody, LookupError> {
        into_query(self.call("query", params).await?)
    }

    async fn call(
        &self,
        action: &str,
        params: &[(&str, &str)],
    ) -> Result<ApiResponse, LookupError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("action", action), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(LookupError::Transient(format!("HTTP {}", response.status())));
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Transient(format!("Failed to parse response: {}", e)))?;

        Ok(body)
    }

    /// Resolve a free-text title to an article title through search
    async fn suggest(&self, title: &str) -> Result<String, LookupError> {
        let body = self
            .query(&[
                ("list", "search"),
                ("srsearch", title),
                ("srlimit", "1"),
                ("srinfo", "suggestion"),
                ("srprop", ""),
            ])
            .await?;

        let resolved = pick_suggestion(body, title)?;
        debug!("Resolved '{}' to '{}'", title, resolved);
        Ok(resolved)
    }

    /// Options listed on a disambiguation page, in the order the page shows them
    async fn disambiguation_options(&self, title: &str) -> Result<Vec<String>, LookupError> {
        let body = self
            .call("parse", &[("page", title), ("prop", "wikitext"), ("redirects", "1")])
            .await?;

        Ok(list_item_links(&into_parse(body)?.wikitext))
    }
}

#[async_trait]
impl KnowledgeBase for WikipediaClient {
    async fn summarize(
        &self,
        title: &str,
        sentences: usize,
        auto_suggest: bool,
    ) -> Result<Summary, LookupError> {
        let resolved = if auto_suggest {
            self.suggest(title).await?
        } else {
            title.to_string()
        };

        let sentences = sentences.clamp(1, 10).to_string();
        let body = self
            .query(&[
                ("prop", "extracts|pageprops"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("exsentences", sentences.as_str()),
                ("ppprop", "disambiguation"),
                ("redirects", "1"),
                ("titles", resolved.as_str()),
            ])
            .await?;

        let page = first_page(body, title)?;
        if page.is_disambiguation() {
            let candidates = self.disambiguation_options(&page.title).await?;
            return Err(LookupError::Ambiguous {
                query: title.to_string(),
                candidates,
            });
        }

        Ok(Summary {
            title: page.title,
            text: page.extract.unwrap_or_default().trim().to_string(),
        })
    }

    async fn page(&self, title: &str) -> Result<PageInfo, LookupError> {
        let body = self
            .query(&[
                ("prop", "info|links|pageprops"),
                ("inprop", "url"),
                ("pllimit", "max"),
                ("plnamespace", "0"),
                ("ppprop", "disambiguation"),
                ("redirects", "1"),
                ("titles", title),
            ])
            .await?;

        let page = first_page(body, title)?;
        if page.is_disambiguation() {
            let candidates = self.disambiguation_options(&page.title).await?;
            return Err(LookupError::Ambiguous {
                query: title.to_string(),
                candidates,
            });
        }

        let links = page.link_titles();
        let url = page
            .fullurl
            .clone()
            .unwrap_or_else(|| self.article_url(&page.title));

        Ok(PageInfo {
            title: page.title,
            url,
            links,
        })
    }

    fn article_url(&self, title: &str) -> String {
        format!("{}{}", self.article_base, title.replace(' ', "_"))
    }

    fn name(&self) -> &str {
        "Wikipedia"
    }
}

fn request_error(e: reqwest::Error) -> LookupError {
    if e.is_timeout() {
        LookupError::Timeout
    } else {
        LookupError::Transient(format!("Request failed: {}", e))
    }
}

fn into_query(body: ApiResponse) -> Result<QueryBody, LookupError> {
    if let Some(error) = body.error {
        return Err(LookupError::Transient(format!(
            "API error {}: {}",
            error.code, error.info
        )));
    }
    Ok(body.query.unwrap_or_default())
}

fn into_parse(body: ApiResponse) -> Result<ParseBody, LookupError> {
    if let Some(error) = body.error {
        return Err(LookupError::Transient(format!(
            "API error {}: {}",
            error.code, error.info
        )));
    }
    Ok(body.parse.unwrap_or_default())
}

/// Article titles linked first from each list item, deduplicated in order
fn list_item_links(wikitext: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    LIST_ITEM_LINK
        .captures_iter(wikitext)
        .filter_map(|caps| caps.get(1))
        .filter_map(|target| normalize_title(target.as_str()))
        .filter(|title| seen.insert(title.clone()))
        .collect()
}

/// Normalize a wikilink target the way MediaWiki resolves titles
fn normalize_title(target: &str) -> Option<String> {
    let target = target.replace('_', " ");
    let target = target.trim().trim_start_matches(':');
    if let Some((prefix, _)) = target.split_once(':') {
        let prefix = prefix.trim().to_lowercase();
        if NON_ARTICLE_PREFIXES.contains(&prefix.as_str()) {
            return None;
        }
    }

    let mut chars = target.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

fn first_page(body: QueryBody, query: &str) -> Result<Page, LookupError> {
    match body.pages.into_iter().next() {
        Some(page) if !page.missing && !page.invalid => Ok(page),
        _ => Err(LookupError::NotFound {
            query: query.to_string(),
        }),
    }
}

fn pick_suggestion(body: QueryBody, query: &str) -> Result<String, LookupError> {
    body.search
        .into_iter()
        .next()
        .map(|hit| hit.title)
        .or_else(|| body.searchinfo.and_then(|info| info.suggestion))
        .ok_or_else(|| LookupError::NotFound {
            query: query.to_string(),
        })
}
