//! Credence NLP
//!
//! A rule-based English NLP model implementing [`NlpModel`] from `credence-domain`.
//!
//! # Capabilities
//!
//! - Sentence segmentation with abbreviation and initial handling
//! - Named-entity recognition for PERSON, ORGANIZATION, LOCATION, EVENT and DATE
//! - Label explanations
//! - Lead-sentence extractive summarization ([`LeadSentenceSummarizer`])
//!
//! The model is built once at process start with [`load_model`] and shared
//! read-only behind an `Arc`. A failed load is reported as an unavailable
//! [`Capability`] rather than a panic, so the service can still start and
//! answer health checks.
//!
//! # Examples
//!
//! ```
//! use credence_domain::traits::NlpModel;
//! use credence_nlp::RuleBasedNlp;
//!
//! let nlp = RuleBasedNlp::new().unwrap();
//! let sentences = nlp.segment("NASA launched a probe. It reached orbit.");
//! assert_eq!(sentences.len(), 2);
//!
//! let entities = nlp.extract_entities("NASA launched a probe.");
//! assert_eq!(entities[0].text, "NASA");
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod lexicon;
mod ner;
mod segment;
mod summarizer;

pub use config::NlpConfig;
pub use error::NlpError;
pub use lexicon::Lexicon;
pub use ner::EntityRecognizer;
pub use segment::split_sentences;
pub use summarizer::LeadSentenceSummarizer;

use credence_domain::traits::{NlpModel, Sentence, Summarizer};
use credence_domain::{Capability, Entity};
use std::sync::Arc;
use tracing::{error, info};

/// Rule-based NLP model
pub struct RuleBasedNlp {
    recognizer: EntityRecognizer,
}

impl RuleBasedNlp {
    /// Create a model with the built-in lexicon
    pub fn new() -> Result<Self, NlpError> {
        Self::with_lexicon(Lexicon::builtin())
    }

    /// Create a model with a specific lexicon
    pub fn with_lexicon(lexicon: Lexicon) -> Result<Self, NlpError> {
        Ok(Self {
            recognizer: EntityRecognizer::new(lexicon)?,
        })
    }

    /// Load the model as configured
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - the model is disabled
    /// - the configured lexicon cannot be read or parsed
    pub fn load(config: &NlpConfig) -> Result<Self, NlpError> {
        if !config.enabled {
            return Err(NlpError::Disabled);
        }

        let lexicon = match &config.lexicon_path {
            Some(path) => Lexicon::builtin().merge(Lexicon::from_file(path)?),
            None => Lexicon::builtin(),
        };

        Self::with_lexicon(lexicon)
    }
}

impl NlpModel for RuleBasedNlp {
    fn segment(&self, text: &str) -> Vec<Sentence> {
        split_sentences(text)
    }

    fn extract_entities(&self, text: &str) -> Vec<Entity> {
        let sentences = split_sentences(text);
        self.recognizer.recognize(text, &sentences)
    }
}

/// Load the process-wide NLP model, logging the outcome
pub fn load_model(config: &NlpConfig) -> Capability<Arc<dyn NlpModel>> {
    match RuleBasedNlp::load(config) {
        Ok(model) => {
            info!("NLP model loaded");
            Capability::available(Arc::new(model) as Arc<dyn NlpModel>)
        }
        Err(e) => {
            error!("NLP model not available: {}", e);
            Capability::unavailable(e.to_string())
        }
    }
}

/// Build the summarizer, which needs a loaded NLP model
pub fn load_summarizer(
    enabled: bool,
    nlp: &Capability<Arc<dyn NlpModel>>,
) -> Capability<Arc<dyn Summarizer>> {
    if !enabled {
        return Capability::unavailable("summarizer disabled by configuration");
    }
    match nlp.get() {
        Some(model) => {
            info!("Summarizer loaded");
            Capability::available(
                Arc::new(LeadSentenceSummarizer::new(Arc::clone(model))) as Arc<dyn Summarizer>
            )
        }
        None => Capability::unavailable("summarizer requires the NLP model"),
    }
}
