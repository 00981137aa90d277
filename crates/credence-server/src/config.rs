//! Configuration file parsing for the server.
//!
//! Loads the bind address, log filter, and the settings of every
//! collaborator (NLP model, Wikipedia, NewsAPI, summarizer, checker).

use credence_checker::CheckerConfig;
use credence_lookup::newsapi::DEFAULT_NEWS_ENDPOINT;
use credence_lookup::wikipedia::{DEFAULT_API_ENDPOINT, DEFAULT_ARTICLE_BASE, DEFAULT_USER_AGENT};
use credence_lookup::is_usable_key;
use credence_nlp::NlpConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable that overrides `news.api_key`
pub const NEWS_API_KEY_ENV: &str = "NEWS_API_KEY";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// A field holds an unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8000)
    pub bind_port: u16,

    /// Log filter used when `RUST_LOG` is not set (default: "info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// NLP model settings
    #[serde(default)]
    pub nlp: NlpConfig,

    /// Wikipedia settings
    #[serde(default)]
    pub wikipedia: WikipediaConfig,

    /// NewsAPI settings
    #[serde(default)]
    pub news: NewsConfig,

    /// Summarizer settings
    #[serde(default)]
    pub summarizer: SummarizerConfig,

    /// Fact-check and research settings
    #[serde(default)]
    pub checker: CheckerConfig,
}

/// Wikipedia client settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WikipediaConfig {
    /// Action API endpoint
    pub endpoint: String,
    /// Prefix for article URLs
    pub article_base_url: String,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_API_ENDPOINT.to_string(),
            article_base_url: DEFAULT_ARTICLE_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// NewsAPI settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// NewsAPI base URL
    pub endpoint: String,
    /// API key; news search is disabled without one
    pub api_key: Option<String>,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_NEWS_ENDPOINT.to_string(),
            api_key: None,
        }
    }
}

impl NewsConfig {
    /// The API key to use, preferring the environment over the file
    pub fn api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), std::env::var(NEWS_API_KEY_ENV).ok())
    }
}

/// Pick the environment key if usable, else the configured key if usable
pub fn resolve_api_key(configured: Option<&str>, from_env: Option<String>) -> Option<String> {
    from_env
        .filter(|key| is_usable_key(key))
        .or_else(|| configured.filter(|key| is_usable_key(key)).map(String::from))
}

/// Summarizer settings
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizerConfig {
    /// Build the summarizer when the NLP model is available
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_enabled() -> bool {
    true
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Check required fields and value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::MissingField("bind_address".to_string()));
        }
        if self.wikipedia.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingField("wikipedia.endpoint".to_string()));
        }
        self.checker.validate().map_err(ConfigError::Invalid)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8000,
            log_filter: default_log_filter(),
            nlp: NlpConfig::default(),
            wikipedia: WikipediaConfig::default(),
            news: NewsConfig::default(),
            summarizer: SummarizerConfig::default(),
            checker: CheckerConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
        assert_eq!(config.log_filter, "info");
        assert!(config.nlp.enabled);
        assert!(config.summarizer.enabled);
        assert_eq!(config.wikipedia.endpoint, "https://en.wikipedia.org/w/api.php");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config = ServerConfig::from_toml(
            r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
        "#,
        )
        .unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.news.endpoint, "https://newsapi.org");
        assert_eq!(config.checker.lookup_timeout_secs, 10);
    }

    #[test]
    fn test_parse_full_toml() {
        let config = ServerConfig::from_toml(
            r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            log_filter = "credence=debug"

            [nlp]
            enabled = false
            lexicon_path = "config/lexicon.toml"

            [wikipedia]
            endpoint = "https://de.wikipedia.org/w/api.php"
            article_base_url = "https://de.wikipedia.org/wiki/"

            [news]
            api_key = "abc123"

            [summarizer]
            enabled = false

            [checker]
            lookup_timeout_secs = 4
            news_language = "de"
        "#,
        )
        .unwrap();

        assert_eq!(config.log_filter, "credence=debug");
        assert!(!config.nlp.enabled);
        assert_eq!(
            config.nlp.lexicon_path.as_deref(),
            Some(Path::new("config/lexicon.toml"))
        );
        assert_eq!(config.wikipedia.article_base_url, "https://de.wikipedia.org/wiki/");
        assert_eq!(config.wikipedia.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.news.api_key.as_deref(), Some("abc123"));
        assert!(!config.summarizer.enabled);
        assert_eq!(config.checker.news_language, "de");
    }

    #[test]
    fn test_empty_bind_address_rejected() {
        let result = ServerConfig::from_toml(
            r#"
            bind_address = ""
            bind_port = 9000
        "#,
        );
        assert!(matches!(result, Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = ServerConfig::from_toml(
            r#"
            bind_address = "127.0.0.1"
            bind_port = 9000

            [checker]
            lookup_timeout_secs = 0
        "#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_address = \"127.0.0.1\"\nbind_port = 8081").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
    }

    #[test]
    fn test_missing_file() {
        let result = ServerConfig::from_file("/nonexistent/credence.toml");
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }

    #[test]
    fn test_resolve_api_key() {
        assert_eq!(resolve_api_key(Some("file-key"), None), Some("file-key".to_string()));
        assert_eq!(
            resolve_api_key(Some("file-key"), Some("env-key".to_string())),
            Some("env-key".to_string())
        );
        assert_eq!(
            resolve_api_key(Some("file-key"), Some("demo_key".to_string())),
            Some("file-key".to_string())
        );
        assert_eq!(resolve_api_key(Some("demo_key"), None), None);
        assert_eq!(resolve_api_key(None, None), None);
    }
}
