//! Credence Checker
//!
//! Scores the credibility of article text and researches topics.
//!
//! # Architecture
//!
//! ```text
//! text → EntityExtractor → entities ─────────────→ SourceVerifier ─┐
//!      → ClaimExtractor  → candidates → ClaimRiskScorer ───────────┤
//!                                                                   ↓
//!                                               CredibilityAggregator → FactCheckResult
//!
//! topic → ResearchService → primary / alternatives / related / fallbacks → ResearchResult
//! ```
//!
//! The NLP model, knowledge base and news search are injected as shared
//! collaborators. Only a missing NLP model fails a request; every lookup
//! problem degrades the result instead.
//!
//! # Example Usage
//!
//! ```no_run
//! use credence_checker::{CheckerConfig, FactChecker};
//! use credence_domain::Capability;
//! use credence_lookup::WikipediaClient;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let nlp = credence_nlp::load_model(&Default::default());
//! let wiki = Arc::new(WikipediaClient::default_endpoint()?);
//! let checker = FactChecker::new(nlp, wiki, Capability::unavailable("no key"), &CheckerConfig::default());
//!
//! let result = checker.check("NASA said the probe reached orbit in 2021.").await?;
//! println!("Score: {}", result.overall_score);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregate;
mod checker;
mod claims;
mod config;
mod deadline;
mod entities;
mod error;
mod research;
mod scorer;
mod verifier;

#[cfg(test)]
mod tests;

pub use aggregate::{CredibilityAggregator, ScoreInputs};
pub use checker::FactChecker;
pub use claims::{ClaimExtractor, MAX_SCORED_CLAIMS, MIN_SENTENCE_CHARS};
pub use config::CheckerConfig;
pub use entities::EntityExtractor;
pub use error::CheckerError;
pub use research::{
    clamp_max_sources, fallback_sources, ResearchService, DEFAULT_MAX_SOURCES, MAX_SOURCES_LIMIT,
};
pub use scorer::{
    has_absolute_statement, has_source_attribution, has_vague_quantifier, ClaimRiskScorer,
};
pub use verifier::{EntityCheck, SourceVerifier, Verification, MAX_VERIFIED_ENTITIES};
