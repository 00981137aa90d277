//! Extractive summarization on top of the sentence segmenter

use credence_domain::traits::{NlpModel, Summarizer};
use std::sync::Arc;

/// Summarizes by keeping the leading sentences of the text
pub struct LeadSentenceSummarizer {
    nlp: Arc<dyn NlpModel>,
}

impl LeadSentenceSummarizer {
    /// Create a summarizer that segments with `nlp`
    pub fn new(nlp: Arc<dyn NlpModel>) -> Self {
        Self { nlp }
    }
}

impl Summarizer for LeadSentenceSummarizer {
    fn summarize(&self, text: &str, max_sentences: usize) -> String {
        self.nlp
            .segment(text)
            .into_iter()
            .take(max_sentences)
            .map(|s| s.text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
