//! Reference sources attached to fact-check and research results

use serde::{Deserialize, Serialize};

/// Where a source came from and how it relates to the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Primary encyclopedia article for a topic
    Encyclopedia,
    /// Knowledge-base article related to an entity or topic
    Related,
    /// Candidate article from a disambiguation
    Alternative,
    /// News article or news search link
    News,
    /// Academic search link
    Academic,
    /// Placeholder explaining that a lookup found nothing
    Error,
}

/// A single reference source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Display title
    pub title: String,

    /// Link to the source; empty for error placeholders
    pub url: String,

    /// Publisher or service name
    pub source: String,

    /// Short excerpt
    pub snippet: String,

    /// Kind of source
    #[serde(rename = "type")]
    pub source_type: SourceType,
}

impl Source {
    /// Create a new source
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        source: impl Into<String>,
        snippet: impl Into<String>,
        source_type: SourceType,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source: source.into(),
            snippet: snippet.into(),
            source_type,
        }
    }
}
