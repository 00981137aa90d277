//! Claim risk scoring
//!
//! Each rule is an independent predicate over the claim text. The scorer
//! starts at full confidence and deducts for every rule that fires:
//!
//! | Rule | Deduction | Issue |
//! |---|---|---|
//! | absolute quantifier (all, every, never, always) | 15 | "Contains absolute statement" |
//! | vague quantifier (many, few, several, some) | 10 | "Contains vague quantifiers" |
//! | no attribution (according to, said, reported, study, research) | 20 | "No clear source attribution" |
//!
//! Quantifiers match whole words; attribution phrases match anywhere.
//! These weights are heuristics, not a trained model.

use credence_domain::claim::MAX_CONFIDENCE;
use credence_domain::Claim;
use regex::Regex;
use std::sync::LazyLock;

/// Issue recorded for absolute quantifiers
pub const ABSOLUTE_STATEMENT: &str = "Contains absolute statement";

/// Issue recorded for vague quantifiers
pub const VAGUE_QUANTIFIERS: &str = "Contains vague quantifiers";

/// Issue recorded when no source is named
pub const NO_ATTRIBUTION: &str = "No clear source attribution";

const ABSOLUTE_DEDUCTION: i32 = 15;
const VAGUE_DEDUCTION: i32 = 10;
const ATTRIBUTION_DEDUCTION: i32 = 20;

static ABSOLUTE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(all|every|never|always)\b").expect("valid regex"));

static VAGUE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(many|few|several|some)\b").expect("valid regex"));

static ATTRIBUTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)according to|said|reported|study|research").expect("valid regex")
});

/// Whether the text contains a whole-word absolute quantifier
pub fn has_absolute_statement(text: &str) -> bool {
    ABSOLUTE_PATTERN.is_match(text)
}

/// Whether the text contains a whole-word vague quantifier
pub fn has_vague_quantifier(text: &str) -> bool {
    VAGUE_PATTERN.is_match(text)
}

/// Whether the text names where its information came from
pub fn has_source_attribution(text: &str) -> bool {
    ATTRIBUTION_PATTERN.is_match(text)
}

/// Scores claims for the risk of being unsupported
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimRiskScorer;

impl ClaimRiskScorer {
    /// Create a new scorer
    pub fn new() -> Self {
        Self
    }

    /// Assess a claim, whether or not it ends up flagged
    pub fn score(&self, text: &str) -> Claim {
        let mut issues = Vec::new();
        let mut confidence = MAX_CONFIDENCE as i32;

        // 1. Absolute statements
        if has_absolute_statement(text) {
            confidence -= ABSOLUTE_DEDUCTION;
            issues.push(ABSOLUTE_STATEMENT.to_string());
        }

        // 2. Vague quantifiers
        if has_vague_quantifier(text) {
            confidence -= VAGUE_DEDUCTION;
            issues.push(VAGUE_QUANTIFIERS.to_string());
        }

        // 3. Source attribution
        if !has_source_attribution(text) {
            confidence -= ATTRIBUTION_DEDUCTION;
            issues.push(NO_ATTRIBUTION.to_string());
        }

        Claim::assessed(text, issues, confidence)
    }

    /// The assessed claim if it should be flagged
    pub fn assess(&self, text: &str) -> Option<Claim> {
        Some(self.score(text)).filter(Claim::is_flagged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vague_quantifier_with_attribution() {
        let claim = ClaimRiskScorer::new()
            .assess("Many experts said prices will rise.")
            .unwrap();
        assert_eq!(claim.issues, vec![VAGUE_QUANTIFIERS]);
        assert_eq!(claim.confidence, 90);
    }

    #[test]
    fn test_absolute_without_attribution() {
        let claim = ClaimRiskScorer::new().score("Everyone always agrees.");
        assert_eq!(claim.confidence, 65);
        assert_eq!(claim.issues, vec![ABSOLUTE_STATEMENT, NO_ATTRIBUTION]);
        assert!(claim.is_flagged());
    }

    #[test]
    fn test_every_rule_fires() {
        let claim = ClaimRiskScorer::new().score("All of them bought some shares.");
        assert_eq!(claim.confidence, 55);
        assert_eq!(claim.issues.len(), 3);
    }

    #[test]
    fn test_attributed_claim_is_not_flagged() {
        let scorer = ClaimRiskScorer::new();
        assert!(scorer.assess("According to the ministry, exports grew 4%.").is_none());
        assert!(scorer.assess("A 2019 study found lower rates.").is_none());
    }

    #[test]
    fn test_quantifiers_match_whole_words() {
        assert!(!has_absolute_statement("The ballot was recalled."));
        assert!(!has_absolute_statement("Everyone agreed."));
        assert!(has_absolute_statement("ALL members voted."));
        assert!(!has_vague_quantifier("Somebody left a manyfold note."));
        assert!(has_vague_quantifier("A few left."));
    }

    #[test]
    fn test_attribution_matches_inside_words() {
        assert!(has_source_attribution("Researchers found 12 cases."));
        assert!(!has_source_attribution("Prices will rise."));
    }
}
