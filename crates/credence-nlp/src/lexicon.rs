//! Gazetteer of known names per entity label
//!
//! A small built-in list covers common countries, cities, organizations and
//! events. Deployments extend it with a TOML file:
//!
//! ```toml
//! persons = ["Ada Lovelace"]
//! organizations = ["Acme Widgets"]
//! locations = ["Springfield"]
//! events = ["Spring Fair"]
//! ```

use crate::NlpError;
use credence_domain::EntityLabel;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

const LOCATIONS: &[&str] = &[
    // Countries and unions of states
    "Afghanistan", "Argentina", "Australia", "Austria", "Bangladesh", "Belgium", "Brazil",
    "Canada", "Chile", "China", "Colombia", "Cuba", "Denmark", "Egypt", "Ethiopia", "Finland",
    "France", "Germany", "Greece", "Hungary", "India", "Indonesia", "Iran", "Iraq", "Ireland",
    "Israel", "Italy", "Japan", "Kenya", "Mexico", "Morocco", "Nepal", "Netherlands",
    "New Zealand", "Nigeria", "North Korea", "Norway", "Pakistan", "Peru", "Philippines",
    "Poland", "Portugal", "Qatar", "Russia", "Saudi Arabia", "South Africa", "South Korea",
    "Spain", "Sri Lanka", "Sweden", "Switzerland", "Syria", "Taiwan", "Thailand", "Turkey",
    "Ukraine", "United Kingdom", "United States", "United States of America", "Venezuela",
    "Vietnam", "US", "U.S", "USA", "UK", "U.K", "America", "Britain", "England", "Scotland",
    "Wales",
    // Cities
    "Amsterdam", "Athens", "Bangkok", "Beijing", "Berlin", "Boston", "Brussels", "Cairo",
    "Chicago", "Delhi", "Dubai", "Geneva", "Hong Kong", "Istanbul", "Jakarta", "Kyiv", "Kathmandu",
    "Lagos", "Lisbon", "London", "Los Angeles", "Madrid", "Manila", "Melbourne", "Mexico City",
    "Moscow", "Mumbai", "Nairobi", "New Delhi", "New York", "New York City", "Paris", "Rome",
    "San Francisco", "Seattle", "Seoul", "Shanghai", "Singapore", "Stockholm", "Sydney",
    "Tokyo", "Toronto", "Vienna", "Warsaw", "Washington", "Washington D.C",
    // States and regions
    "Alaska", "Arizona", "California", "Colorado", "Florida", "Georgia", "Hawaii", "Illinois",
    "Massachusetts", "Michigan", "Nevada", "New Jersey", "Ohio", "Oregon", "Pennsylvania",
    "Texas", "Virginia", "Bavaria", "Quebec", "Ontario", "Siberia", "Kashmir", "Gaza",
    // Continents and large regions
    "Africa", "Antarctica", "Asia", "Europe", "North America", "South America", "Oceania",
    "Middle East", "Latin America", "Arctic",
];

const ORGANIZATIONS: &[&str] = &[
    "Apple", "Google", "Alphabet", "Microsoft", "Amazon", "Meta", "Facebook", "Tesla",
    "Netflix", "IBM", "Intel", "Nvidia", "OpenAI", "Samsung", "Sony", "Toyota", "Boeing",
    "Airbus", "Reuters", "Bloomberg", "Associated Press", "BBC", "CNN", "Pfizer", "Moderna",
    "NASA", "FBI", "CIA", "WHO", "UN", "United Nations", "European Union", "EU", "NATO",
    "World Bank", "IMF", "Federal Reserve", "Congress", "Senate", "Pentagon", "White House",
    "Kremlin", "Supreme Court", "Harvard", "Stanford", "MIT", "Oxford", "Cambridge",
    "Wikipedia", "Twitter", "YouTube", "Walmart", "Uber", "SpaceX",
];

const EVENTS: &[&str] = &[
    "World War I", "World War II", "Cold War", "Olympics", "Olympic Games", "Super Bowl",
    "World Cup", "Brexit", "Holocaust", "Great Depression", "Renaissance", "COP28",
    "Arab Spring", "Vietnam War", "Korean War", "Civil War", "Gulf War", "Iraq War",
];

/// Extra names loaded from a lexicon file
#[derive(Debug, Default, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    persons: Vec<String>,
    #[serde(default)]
    organizations: Vec<String>,
    #[serde(default)]
    locations: Vec<String>,
    #[serde(default)]
    events: Vec<String>,
}

/// Known names grouped by label
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    persons: HashSet<String>,
    organizations: HashSet<String>,
    locations: HashSet<String>,
    events: HashSet<String>,
}

impl Lexicon {
    /// The built-in gazetteer
    pub fn builtin() -> Self {
        let owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
        Self {
            persons: HashSet::new(),
            organizations: owned(ORGANIZATIONS),
            locations: owned(LOCATIONS),
            events: owned(EVENTS),
        }
    }

    /// Parse a lexicon from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self, NlpError> {
        let file: LexiconFile = toml::from_str(toml_str)?;
        Ok(Self {
            persons: file.persons.into_iter().collect(),
            organizations: file.organizations.into_iter().collect(),
            locations: file.locations.into_iter().collect(),
            events: file.events.into_iter().collect(),
        })
    }

    /// Read a lexicon file from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, NlpError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| NlpError::LexiconRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Add every name from `other`
    pub fn merge(mut self, other: Lexicon) -> Self {
        self.persons.extend(other.persons);
        self.organizations.extend(other.organizations);
        self.locations.extend(other.locations);
        self.events.extend(other.events);
        self
    }

    /// Label of an exact name match, if any
    ///
    /// Persons win over organizations, which win over locations, so a
    /// deployment can override a built-in entry.
    pub fn lookup(&self, name: &str) -> Option<EntityLabel> {
        if self.persons.contains(name) {
            Some(EntityLabel::Person)
        } else if self.organizations.contains(name) {
            Some(EntityLabel::Organization)
        } else if self.locations.contains(name) {
            Some(EntityLabel::Location)
        } else if self.events.contains(name) {
            Some(EntityLabel::Event)
        } else {
            None
        }
    }

    /// Total number of names
    pub fn len(&self) -> usize {
        self.persons.len() + self.organizations.len() + self.locations.len() + self.events.len()
    }

    /// Whether the lexicon holds no names
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let lexicon = Lexicon::builtin();
        assert_eq!(lexicon.lookup("France"), Some(EntityLabel::Location));
        assert_eq!(lexicon.lookup("NASA"), Some(EntityLabel::Organization));
        assert_eq!(lexicon.lookup("World Cup"), Some(EntityLabel::Event));
        assert_eq!(lexicon.lookup("Nobody"), None);
    }

    #[test]
    fn test_person_override() {
        let extra = Lexicon::from_toml(r#"persons = ["Paris"]"#).unwrap();
        let lexicon = Lexicon::builtin().merge(extra);
        assert_eq!(lexicon.lookup("Paris"), Some(EntityLabel::Person));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Lexicon::from_toml("persons = 3"),
            Err(NlpError::LexiconParse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = Lexicon::from_file("/nonexistent/lexicon.toml");
        assert!(matches!(result, Err(NlpError::LexiconRead { .. })));
    }
}
