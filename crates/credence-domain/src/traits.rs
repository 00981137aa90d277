//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the credibility pipeline and
//! the services it consults. Implementations live in other crates
//! (credence-nlp, credence-lookup).

use crate::{Entity, EntityLabel};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Typed outcome of a failed knowledge-base or news lookup
///
/// Callers decide per variant whether to degrade locally or propagate;
/// none of these are fatal for a request on their own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No entry matches the query
    #[error("No entry found for '{query}'")]
    NotFound {
        /// The title or query that was looked up
        query: String,
    },

    /// The query matches several distinct entries
    #[error("'{query}' is ambiguous ({} candidates)", candidates.len())]
    Ambiguous {
        /// The title or query that was looked up
        query: String,
        /// Candidate titles in the order the service returned them
        candidates: Vec<String>,
    },

    /// The call did not finish within the per-call timeout
    #[error("Lookup timed out")]
    Timeout,

    /// Network, authentication or response-format failure
    #[error("Transient lookup failure: {0}")]
    Transient(String),
}

impl LookupError {
    /// Whether the failure was caused by the service rather than the query
    pub fn is_transient(&self) -> bool {
        matches!(self, LookupError::Timeout | LookupError::Transient(_))
    }
}

/// A sentence span inside the original text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// Trimmed sentence text
    pub text: String,
    /// Byte offset of the first character in the source text
    pub start: usize,
    /// Byte offset one past the last character in the source text
    pub end: usize,
}

/// Natural-language processing capability
///
/// Loaded once at startup and shared read-only between requests.
pub trait NlpModel: Send + Sync {
    /// Split text into sentences, in order
    fn segment(&self, text: &str) -> Vec<Sentence>;

    /// Recognize named entities, in order of first appearance
    fn extract_entities(&self, text: &str) -> Vec<Entity>;

    /// Explain what a label covers
    fn explain(&self, label: EntityLabel) -> &'static str {
        label.description()
    }
}

/// Condenses text into a shorter form
pub trait Summarizer: Send + Sync {
    /// Produce a summary of at most `max_sentences` sentences
    fn summarize(&self, text: &str, max_sentences: usize) -> String;
}

/// A knowledge-base summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Title of the article the summary came from (after suggestion/redirects)
    pub title: String,
    /// Plain-text summary
    pub text: String,
}

/// Page metadata from the knowledge base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    /// Canonical title
    pub title: String,
    /// Canonical URL of the article
    pub url: String,
    /// Titles of linked articles, in service order
    pub links: Vec<String>,
}

/// Reference lookup service (an online encyclopedia)
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Summarize the article for `title` in `sentences` sentences
    ///
    /// With `auto_suggest`, the title is first resolved through the
    /// service's search so near matches are accepted.
    async fn summarize(
        &self,
        title: &str,
        sentences: usize,
        auto_suggest: bool,
    ) -> Result<Summary, LookupError>;

    /// Fetch the canonical URL and linked topics for an exact title
    async fn page(&self, title: &str) -> Result<PageInfo, LookupError>;

    /// Build the article URL for a title without a network call
    fn article_url(&self, title: &str) -> String;

    /// Display name used as the `source` of emitted sources
    fn name(&self) -> &str;
}

/// Ordering of news search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Most relevant to the query first
    #[default]
    Relevancy,
    /// Most popular publishers first
    Popularity,
    /// Newest first
    PublishedAt,
}

impl SortBy {
    /// Query-string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Relevancy => "relevancy",
            SortBy::Popularity => "popularity",
            SortBy::PublishedAt => "publishedAt",
        }
    }
}

/// A news search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    /// Free-text query
    pub query: String,
    /// Result ordering
    pub sort_by: SortBy,
    /// Maximum number of articles to return
    pub page_size: usize,
    /// ISO-639-1 language code
    pub language: String,
}

/// A news article returned by a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsArticle {
    /// Headline
    pub title: String,
    /// Link to the article
    pub url: String,
    /// Publisher name
    pub source: String,
    /// Short description, when the publisher provides one
    pub description: Option<String>,
}

/// Optional news search service
#[async_trait]
pub trait NewsSearch: Send + Sync {
    /// Run a search
    async fn search(&self, query: &NewsQuery) -> Result<Vec<NewsArticle>, LookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_classification() {
        assert!(LookupError::Timeout.is_transient());
        assert!(LookupError::Transient("HTTP 503".to_string()).is_transient());
        assert!(!LookupError::NotFound { query: "x".to_string() }.is_transient());

        let ambiguous = LookupError::Ambiguous {
            query: "Mercury".to_string(),
            candidates: vec!["Mercury (planet)".to_string(), "Mercury (element)".to_string()],
        };
        assert_eq!(ambiguous.to_string(), "'Mercury' is ambiguous (2 candidates)");
    }

    #[test]
    fn test_sort_by_query_value() {
        assert_eq!(SortBy::Relevancy.as_str(), "relevancy");
        assert_eq!(SortBy::PublishedAt.as_str(), "publishedAt");
    }

    #[test]
    fn test_sort_by_serde_matches_query_value() {
        for sort_by in [SortBy::Relevancy, SortBy::Popularity, SortBy::PublishedAt] {
            let json = serde_json::to_string(&sort_by).unwrap();
            assert_eq!(json, format!("\"{}\"", sort_by.as_str()));
        }
        assert_eq!(SortBy::default(), SortBy::Relevancy);
    }
}
