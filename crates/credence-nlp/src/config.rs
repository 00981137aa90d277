//! Configuration for the NLP model

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the NLP model is loaded at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NlpConfig {
    /// Load the model at all; when false the model reports unavailable
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Optional TOML gazetteer merged into the built-in lexicon
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
}

fn default_enabled() -> bool {
    true
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lexicon_path: None,
        }
    }
}
