//! Candidate claim selection

use credence_domain::traits::Sentence;

/// Sentences shorter than this many characters are never claims
pub const MIN_SENTENCE_CHARS: usize = 20;

/// Only this many candidates are risk-scored per request
pub const MAX_SCORED_CLAIMS: usize = 5;

/// Verbs that mark a sentence as reporting a fact
const ATTRIBUTION_VERBS: &[&str] = &["said", "reported", "according", "claimed", "announced"];

/// Picks sentences that look like factual assertions
///
/// A candidate is at least [`MIN_SENTENCE_CHARS`] long and contains a digit
/// or an attribution verb (matched case-insensitively anywhere in the sentence).
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimExtractor;

impl ClaimExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Candidate claims, in sentence order
    pub fn candidates(&self, sentences: &[Sentence]) -> Vec<String> {
        sentences
            .iter()
            .map(|s| s.text.trim())
            .filter(|text| is_long_enough(text))
            .filter(|text| has_digit(text) || has_attribution_verb(text))
            .map(str::to_string)
            .collect()
    }
}

fn is_long_enough(text: &str) -> bool {
    text.chars().count() >= MIN_SENTENCE_CHARS
}

fn has_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

fn has_attribution_verb(text: &str) -> bool {
    let lower = text.to_lowercase();
    ATTRIBUTION_VERBS.iter().any(|verb| lower.contains(verb))
}
