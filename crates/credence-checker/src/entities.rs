//! Entity extraction over the shared NLP model

use crate::CheckerError;
use credence_domain::traits::{NlpModel, Sentence};
use credence_domain::{Capability, Entity};
use std::sync::Arc;

/// Wraps the process-wide NLP model
///
/// Every call fails with [`CheckerError::ServiceUnavailable`] when the model
/// did not load at startup.
#[derive(Clone)]
pub struct EntityExtractor {
    nlp: Capability<Arc<dyn NlpModel>>,
}

impl EntityExtractor {
    /// Create an extractor over a loaded (or missing) model
    pub fn new(nlp: Capability<Arc<dyn NlpModel>>) -> Self {
        Self { nlp }
    }

    /// Whether the model loaded
    pub fn is_available(&self) -> bool {
        self.nlp.is_available()
    }

    /// The model, or the reason it is missing
    pub fn model(&self) -> Result<&Arc<dyn NlpModel>, CheckerError> {
        match &self.nlp {
            Capability::Available(model) => Ok(model),
            Capability::Unavailable { reason } => {
                Err(CheckerError::ServiceUnavailable(reason.clone()))
            }
        }
    }

    /// Entities in order of first appearance
    pub fn entities(&self, text: &str) -> Result<Vec<Entity>, CheckerError> {
        Ok(self.model()?.extract_entities(text))
    }

    /// Sentences in order
    pub fn sentences(&self, text: &str) -> Result<Vec<Sentence>, CheckerError> {
        Ok(self.model()?.segment(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credence_domain::EntityLabel;

    struct FixedModel;

    impl NlpModel for FixedModel {
        fn segment(&self, text: &str) -> Vec<Sentence> {
            vec![Sentence {
                text: text.to_string(),
                start: 0,
                end: text.len(),
            }]
        }

        fn extract_entities(&self, _text: &str) -> Vec<Entity> {
            vec![Entity::new("Ada Lovelace", EntityLabel::Person)]
        }
    }

    #[test]
    fn test_available_model() {
        let extractor =
            EntityExtractor::new(Capability::available(Arc::new(FixedModel) as Arc<dyn NlpModel>));
        assert!(extractor.is_available());
        assert_eq!(extractor.entities("anything").unwrap()[0].text, "Ada Lovelace");
        assert_eq!(extractor.sentences("One.").unwrap().len(), 1);
    }

    #[test]
    fn test_missing_model_is_service_unavailable() {
        let extractor = EntityExtractor::new(Capability::unavailable("model failed to load"));
        assert_eq!(
            extractor.entities("text").unwrap_err(),
            CheckerError::ServiceUnavailable("model failed to load".to_string())
        );
        assert!(extractor.sentences("text").is_err());
    }
}
