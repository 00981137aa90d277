//! Credibility score aggregation
//!
//! ```text
//! claim_score  = max(0, 100 - flagged / max(1, candidates) * 60)
//! entity_score = verified / max(1, checks) * 40
//! overall      = round(clamp(claim_score + entity_score, 20, 100))
//! ```
//!
//! The 60/40 split and the floor of 20 are heuristics.

use credence_domain::claim::{MAX_CONFIDENCE, MIN_CONFIDENCE};

const CLAIM_WEIGHT: f64 = 60.0;
const ENTITY_WEIGHT: f64 = 40.0;

/// Counts the aggregate score is computed from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreInputs {
    /// All candidate claims, including the ones that were not scored
    pub candidate_claims: usize,
    /// Claims that were flagged
    pub flagged_claims: usize,
    /// Entity checks that reached a verdict
    pub entity_checks: usize,
    /// Entity checks that verified the entity
    pub verified_entities: usize,
}

/// Combines claim risk and entity verification into one score
#[derive(Debug, Clone, Copy, Default)]
pub struct CredibilityAggregator;

impl CredibilityAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self
    }

    /// Overall credibility in [20, 100]
    pub fn score(&self, inputs: ScoreInputs) -> u8 {
        let total_claims = inputs.candidate_claims.max(1) as f64;
        let entity_total = inputs.entity_checks.max(1) as f64;

        let claim_score =
            (100.0 - inputs.flagged_claims as f64 / total_claims * CLAIM_WEIGHT).max(0.0);
        let entity_score = inputs.verified_entities as f64 / entity_total * ENTITY_WEIGHT;

        let overall = (claim_score + entity_score)
            .clamp(MIN_CONFIDENCE as f64, MAX_CONFIDENCE as f64)
            .round();
        overall as u8
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: score is always in [20, 100]
        #[test]
        fn test_score_in_range(
            candidates in 0usize..50,
            flagged in 0usize..=5,
            checks in 0usize..=3,
            verified in 0usize..=3,
        ) {
            let inputs = ScoreInputs {
                candidate_claims: candidates,
                flagged_claims: flagged.min(candidates),
                entity_checks: checks,
                verified_entities: verified.min(checks),
            };
            let score = CredibilityAggregator::new().score(inputs);
            prop_assert!((20..=100).contains(&score));
        }
    }
}
