//! Configuration for the checker

use credence_domain::traits::SortBy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for fact-checking and research
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Maximum time for a single knowledge-base or news call (seconds)
    pub lookup_timeout_secs: u64,

    /// Language code passed to news search
    pub news_language: String,

    /// Ordering requested from news search ("relevancy", "popularity", "publishedAt")
    pub news_sort_by: SortBy,
}

impl CheckerConfig {
    /// Get the lookup timeout as a Duration
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.lookup_timeout_secs == 0 {
            return Err("lookup_timeout_secs must be greater than 0".to_string());
        }
        if self.news_language.trim().is_empty() {
            return Err("news_language cannot be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_secs: 10,
            news_language: "en".to_string(),
            news_sort_by: SortBy::Relevancy,
        }
    }
}
