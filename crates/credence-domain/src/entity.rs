//! Named entities recognized in submitted text

use serde::{Deserialize, Serialize};
use std::fmt;

/// The label set a recognized entity may carry
///
/// Anything an NLP model recognizes outside these five categories
/// (money, percentages, nationalities, ...) is discarded before it
/// reaches the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    /// People, including fictional
    Person,
    /// Companies, agencies, institutions
    Organization,
    /// Countries, cities, states and other places
    Location,
    /// Named hurricanes, battles, wars, sports events
    Event,
    /// Absolute or relative dates or periods
    Date,
}

impl EntityLabel {
    /// Wire representation of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Organization => "ORGANIZATION",
            EntityLabel::Location => "LOCATION",
            EntityLabel::Event => "EVENT",
            EntityLabel::Date => "DATE",
        }
    }

    /// Human-readable explanation of what the label covers
    pub fn description(&self) -> &'static str {
        match self {
            EntityLabel::Person => "People, including fictional",
            EntityLabel::Organization => "Companies, agencies, institutions, etc.",
            EntityLabel::Location => "Countries, cities, states",
            EntityLabel::Event => "Named hurricanes, battles, wars, sports events, etc.",
            EntityLabel::Date => "Absolute or relative dates or periods",
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named entity found in text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Surface text as it appears in the input
    pub text: String,

    /// Category of the entity
    pub label: EntityLabel,

    /// Explanation of the label
    pub description: String,
}

impl Entity {
    /// Create an entity whose description is the label's standard explanation
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
            description: label.description().to_string(),
        }
    }
}
