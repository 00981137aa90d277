//! Claim module - a sentence assessed for the risk of being unsupported

use serde::{Deserialize, Serialize};

/// Lowest confidence a claim can carry after risk deductions
pub const MIN_CONFIDENCE: u8 = 20;

/// Highest confidence a claim can carry
pub const MAX_CONFIDENCE: u8 = 100;

/// Claims below this confidence are flagged even without issues
pub const FLAG_THRESHOLD: u8 = 80;

/// Suggestion attached to every flagged claim
pub const DEFAULT_SUGGESTION: &str = "Consider adding sources or qualifying statements";

/// A candidate factual claim with its assessed confidence
///
/// Claims are immutable once assessed. `confidence` is always within
/// [`MIN_CONFIDENCE`, `MAX_CONFIDENCE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// The sentence as it appeared in the input
    pub text: String,

    /// Issues found, in rule order
    pub issues: Vec<String>,

    /// Confidence in [20, 100]
    pub confidence: u8,

    /// Advice for the author
    pub suggestion: String,
}

impl Claim {
    /// Create an assessed claim from a raw (possibly out-of-range) confidence
    ///
    /// # Examples
    ///
    /// ```
    /// use credence_domain::Claim;
    ///
    /// let claim = Claim::assessed("Prices rose 40%.", vec![], -10);
    /// assert_eq!(claim.confidence, 20);
    /// ```
    pub fn assessed(text: impl Into<String>, issues: Vec<String>, raw_confidence: i32) -> Self {
        let confidence = raw_confidence.clamp(MIN_CONFIDENCE as i32, MAX_CONFIDENCE as i32) as u8;
        Self {
            text: text.into(),
            issues,
            confidence,
            suggestion: DEFAULT_SUGGESTION.to_string(),
        }
    }

    /// A claim is flagged when its confidence is below threshold or it has any issue
    pub fn is_flagged(&self) -> bool {
        self.confidence < FLAG_THRESHOLD || !self.issues.is_empty()
    }
}
