//! Entity verification against the knowledge base and news search

use crate::deadline::{excerpt, within};
use credence_domain::traits::{KnowledgeBase, NewsQuery, NewsSearch, SortBy};
use credence_domain::{Capability, Entity, LookupError, Source, SourceType};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Only the first entities are looked up per request
pub const MAX_VERIFIED_ENTITIES: usize = 3;

/// Sentences requested for each entity summary
pub const ENTITY_SUMMARY_SENTENCES: usize = 2;

/// Page size of the news query
pub const NEWS_PAGE_SIZE: usize = 3;

/// News articles kept as sources
pub const MAX_NEWS_SOURCES: usize = 2;

/// Note recorded for entities the knowledge base could not resolve
pub const NO_INFORMATION: &str = "No information found";

const SNIPPET_CHARS: usize = 150;
const NOTE_CHARS: usize = 200;

/// Outcome of looking up one entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCheck {
    /// Entity text as it appeared in the input
    pub entity: String,
    /// Short excerpt of what the knowledge base says, or [`NO_INFORMATION`]
    pub note: String,
    /// Whether the knowledge base knows the entity
    pub verified: bool,
}

/// Everything the verifier found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verification {
    /// One check per entity lookup that reached a verdict
    pub checks: Vec<EntityCheck>,
    /// Knowledge-base sources followed by news sources, unique by URL
    pub sources: Vec<Source>,
}

impl Verification {
    /// Number of verified entities
    pub fn verified_count(&self) -> usize {
        self.checks.iter().filter(|c| c.verified).count()
    }

    /// Append a source unless one with the same URL is already listed
    fn push_source(&mut self, source: Source) {
        if self.sources.iter().all(|s| s.url != source.url) {
            self.sources.push(source);
        }
    }
}

/// Cross-checks entities against the knowledge base and optional news search
pub struct SourceVerifier {
    knowledge_base: Arc<dyn KnowledgeBase>,
    news: Capability<Arc<dyn NewsSearch>>,
    lookup_timeout: Duration,
    news_language: String,
    news_sort_by: SortBy,
}

impl SourceVerifier {
    /// Create a verifier
    pub fn new(
        knowledge_base: Arc<dyn KnowledgeBase>,
        news: Capability<Arc<dyn NewsSearch>>,
        lookup_timeout: Duration,
        news_language: impl Into<String>,
    ) -> Self {
        Self {
            knowledge_base,
            news,
            lookup_timeout,
            news_language: news_language.into(),
            news_sort_by: SortBy::Relevancy,
        }
    }

    /// Set the ordering requested from news search
    pub fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.news_sort_by = sort_by;
        self
    }

    /// Verify the leading entities, then add news for the first one
    ///
    /// Entities are deduplicated by text before the cap applies, and sources
    /// are unique by URL. Lookup failures never abort verification. An
    /// ambiguous entity is retried once with its first candidate; if that
    /// fails too, no check is recorded for it.
    pub async fn verify(&self, entities: &[Entity]) -> Verification {
        let mut verification = Verification::default();

        let mut seen = HashSet::new();
        let unique: Vec<&Entity> = entities
            .iter()
            .filter(|entity| seen.insert(entity.text.as_str()))
            .collect();

        for entity in unique.iter().take(MAX_VERIFIED_ENTITIES) {
            self.verify_entity(entity, &mut verification).await;
        }

        if let Some(first) = unique.first() {
            for source in self.news_sources(&first.text).await {
                verification.push_source(source);
            }
        }

        verification
    }

    async fn verify_entity(&self, entity: &Entity, verification: &mut Verification) {
        let kb = &self.knowledge_base;
        let lookup = within(
            self.lookup_timeout,
            kb.summarize(&entity.text, ENTITY_SUMMARY_SENTENCES, true),
        )
        .await;

        match lookup {
            Ok(summary) => {
                debug!("Verified entity '{}' as '{}'", entity.text, summary.title);
                verification.checks.push(verified(entity, &summary.text));
                verification.push_source(Source::new(
                    format!("{}: {}", kb.name(), entity.text),
                    kb.article_url(&entity.text),
                    kb.name(),
                    excerpt(&summary.text, SNIPPET_CHARS),
                    SourceType::Related,
                ));
            }
            Err(LookupError::Ambiguous { candidates, .. }) => {
                let Some(candidate) = candidates.first() else {
                    debug!("Entity '{}' is ambiguous with no candidates", entity.text);
                    return;
                };
                let retry = within(
                    self.lookup_timeout,
                    kb.summarize(candidate, ENTITY_SUMMARY_SENTENCES, false),
                )
                .await;
                match retry {
                    Ok(summary) => {
                        debug!(
                            "Verified ambiguous entity '{}' via '{}'",
                            entity.text, candidate
                        );
                        verification.checks.push(verified(entity, &summary.text));
                    }
                    Err(e) => {
                        debug!("Dropping ambiguous entity '{}': {}", entity.text, e);
                    }
                }
            }
            Err(e) => {
                if e.is_transient() {
                    warn!("Knowledge base lookup for '{}' failed: {}", entity.text, e);
                } else {
                    debug!("No knowledge base entry for '{}'", entity.text);
                }
                verification.checks.push(EntityCheck {
                    entity: entity.text.clone(),
                    note: NO_INFORMATION.to_string(),
                    verified: false,
                });
            }
        }
    }

    async fn news_sources(&self, query: &str) -> Vec<Source> {
        let Some(news) = self.news.get() else {
            return Vec::new();
        };

        let query = NewsQuery {
            query: query.to_string(),
            sort_by: self.news_sort_by,
            page_size: NEWS_PAGE_SIZE,
            language: self.news_language.clone(),
        };

        match within(self.lookup_timeout, news.search(&query)).await {
            Ok(articles) => {
                let mut seen = HashSet::new();
                articles
                    .into_iter()
                    .filter(|article| seen.insert(article.url.clone()))
                    .take(MAX_NEWS_SOURCES)
                    .map(|article| {
                        let snippet = article
                            .description
                            .unwrap_or_else(|| article.title.clone());
                        Source::new(
                            article.title,
                            article.url,
                            article.source,
                            snippet,
                            SourceType::News,
                        )
                    })
                    .collect()
            }
            Err(e) => {
                warn!("News search for '{}' failed: {}", query.query, e);
                Vec::new()
            }
        }
    }
}

fn verified(entity: &Entity, summary: &str) -> EntityCheck {
    EntityCheck {
        entity: entity.text.clone(),
        note: excerpt(summary, NOTE_CHARS),
        verified: true,
    }
}
