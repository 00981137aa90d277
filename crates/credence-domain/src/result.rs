//! Pipeline results returned to callers

use crate::{Claim, Entity, Source};
use serde::{Deserialize, Serialize};

/// Outcome of assessing one piece of article text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckResult {
    /// Claims that were flagged (at most five)
    pub flagged_claims: Vec<Claim>,

    /// Knowledge-base and news sources found for the entities
    pub credible_sources: Vec<Source>,

    /// Aggregate credibility score in [20, 100]
    pub overall_score: u8,

    /// Entities in order of first appearance
    pub entities: Vec<Entity>,
}

/// Outcome of researching a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchResult {
    /// The topic as requested
    pub topic: String,

    /// Ranked sources, never more than the requested maximum
    pub sources: Vec<Source>,

    /// Number of sources returned
    pub total_found: usize,
}

impl ResearchResult {
    /// Build a result, keeping `total_found` in step with `sources`
    pub fn new(topic: impl Into<String>, sources: Vec<Source>) -> Self {
        let total_found = sources.len();
        Self {
            topic: topic.into(),
            sources,
            total_found,
        }
    }
}
