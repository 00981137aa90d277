//! The fact-checking pipeline

use crate::aggregate::{CredibilityAggregator, ScoreInputs};
use crate::claims::{ClaimExtractor, MAX_SCORED_CLAIMS};
use crate::config::CheckerConfig;
use crate::entities::EntityExtractor;
use crate::error::CheckerError;
use crate::scorer::ClaimRiskScorer;
use crate::verifier::SourceVerifier;
use credence_domain::traits::{KnowledgeBase, NlpModel, NewsSearch};
use credence_domain::{Capability, Claim, FactCheckResult};
use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

/// Assesses the credibility of article text
///
/// Stateless between requests; share one instance behind an `Arc`.
pub struct FactChecker {
    entities: EntityExtractor,
    claims: ClaimExtractor,
    scorer: ClaimRiskScorer,
    verifier: SourceVerifier,
    aggregator: CredibilityAggregator,
}

impl FactChecker {
    /// Create a new FactChecker
    pub fn new(
        nlp: Capability<Arc<dyn NlpModel>>,
        knowledge_base: Arc<dyn KnowledgeBase>,
        news: Capability<Arc<dyn NewsSearch>>,
        config: &CheckerConfig,
    ) -> Self {
        Self {
            entities: EntityExtractor::new(nlp),
            claims: ClaimExtractor::new(),
            scorer: ClaimRiskScorer::new(),
            verifier: SourceVerifier::new(
                knowledge_base,
                news,
                config.lookup_timeout(),
                config.news_language.clone(),
            )
            .with_sort_by(config.news_sort_by),
            aggregator: CredibilityAggregator::new(),
        }
    }

    /// Whether the NLP model is loaded
    pub fn is_ready(&self) -> bool {
        self.entities.is_available()
    }

    /// Assess `content`
    ///
    /// # Errors
    ///
    /// Returns [`CheckerError::ServiceUnavailable`] if the NLP model is
    /// missing. Lookup failures only degrade the result.
    pub async fn check(&self, content: &str) -> Result<FactCheckResult, CheckerError> {
        let request_id = Uuid::now_v7();
        let span = info_span!("fact_check", %request_id);
        self.check_inner(content).instrument(span).await
    }

    async fn check_inner(&self, content: &str) -> Result<FactCheckResult, CheckerError> {
        // Check before any work so a missing model short-circuits everything
        self.entities.model()?;

        info!("Starting fact check, text length {}", content.len());

        // Step 1: Entities
        let entities = self.entities.entities(content)?;
        debug!("Extracted {} entities", entities.len());

        // Step 2: Candidate claims
        let sentences = self.entities.sentences(content)?;
        let candidates = self.claims.candidates(&sentences);
        debug!(
            "{} of {} sentences are candidate claims",
            candidates.len(),
            sentences.len()
        );

        // Step 3: Risk scoring
        let flagged_claims: Vec<Claim> = candidates
            .iter()
            .take(MAX_SCORED_CLAIMS)
            .filter_map(|text| self.scorer.assess(text))
            .collect();

        // Step 4: Verification
        let verification = self.verifier.verify(&entities).await;

        // Step 5: Aggregate
        let overall_score = self.aggregator.score(ScoreInputs {
            candidate_claims: candidates.len(),
            flagged_claims: flagged_claims.len(),
            entity_checks: verification.checks.len(),
            verified_entities: verification.verified_count(),
        });

        info!(
            "Fact check complete: score {}, {} flagged claims, {} sources",
            overall_score,
            flagged_claims.len(),
            verification.sources.len()
        );

        Ok(FactCheckResult {
            flagged_claims,
            credible_sources: verification.sources,
            overall_score,
            entities,
        })
    }
}
