//! Error types for the NLP model

use thiserror::Error;

/// Errors that can occur while loading the NLP model
#[derive(Error, Debug)]
pub enum NlpError {
    /// The model was disabled in configuration
    #[error("NLP model disabled by configuration")]
    Disabled,

    /// Lexicon file could not be read
    #[error("Failed to read lexicon {path}: {source}")]
    LexiconRead {
        /// Path that was configured
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Lexicon file is not valid TOML
    #[error("Failed to parse lexicon: {0}")]
    LexiconParse(#[from] toml::de::Error),

    /// A built-in pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
