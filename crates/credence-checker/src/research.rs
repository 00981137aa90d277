//! Topic research
//!
//! Builds a ranked source list for a topic:
//!
//! 1. The topic's own article (encyclopedia)
//! 2. On disambiguation, summaries of the first candidates (alternative)
//! 3. When nothing matches, a placeholder explaining so (error)
//! 4. Summaries of the article's first linked topics (related)
//! 5. Fixed academic and news search links as padding

use crate::deadline::within;
use credence_domain::traits::{KnowledgeBase, PageInfo, Summary};
use credence_domain::{LookupError, ResearchResult, Source, SourceType};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Sources returned when the caller does not ask for a number
pub const DEFAULT_MAX_SOURCES: usize = 5;

/// Upper bound on requested sources
pub const MAX_SOURCES_LIMIT: usize = 10;

const PRIMARY_SENTENCES: usize = 3;
const ALTERNATIVE_SENTENCES: usize = 2;
const RELATED_SENTENCES: usize = 1;
const MAX_ALTERNATIVES: usize = 2;
const MAX_RELATED_TOPICS: usize = 3;

/// Clamp a requested source count to `[1, MAX_SOURCES_LIMIT]`
pub fn clamp_max_sources(requested: Option<i64>) -> usize {
    match requested {
        None => DEFAULT_MAX_SOURCES,
        Some(n) => n.clamp(1, MAX_SOURCES_LIMIT as i64) as usize,
    }
}

/// Fixed search links used to pad results
pub fn fallback_sources(topic: &str) -> Vec<Source> {
    let query = topic.replace(' ', "+");
    vec![
        Source::new(
            format!("Google Scholar: {}", topic),
            format!("https://scholar.google.com/scholar?q={}", query),
            "Google Scholar",
            "Academic papers and research publications",
            SourceType::Academic,
        ),
        Source::new(
            format!("BBC News: {}", topic),
            format!("https://www.bbc.com/search?q={}", query),
            "BBC News",
            "Latest news and analysis",
            SourceType::News,
        ),
    ]
}

/// Researches topics against the knowledge base
pub struct ResearchService {
    knowledge_base: Arc<dyn KnowledgeBase>,
    lookup_timeout: Duration,
}

impl ResearchService {
    /// Create a research service
    pub fn new(knowledge_base: Arc<dyn KnowledgeBase>, lookup_timeout: Duration) -> Self {
        Self {
            knowledge_base,
            lookup_timeout,
        }
    }

    /// Research a topic, returning at most `max_sources` sources (clamped)
    ///
    /// Never fails: lookup problems degrade to fewer sources or padding.
    pub async fn research(&self, topic: &str, max_sources: Option<i64>) -> ResearchResult {
        let request_id = Uuid::now_v7();
        let span = info_span!("research", %request_id);
        self.research_inner(topic, clamp_max_sources(max_sources))
            .instrument(span)
            .await
    }

    async fn research_inner(&self, topic: &str, max_sources: usize) -> ResearchResult {
        info!("Researching '{}' (max {} sources)", topic, max_sources);
        let kb = &self.knowledge_base;
        let mut sources = Vec::new();

        match self.primary(topic).await {
            Ok((summary, page)) => {
                sources.push(Source::new(
                    format!("{}: {}", kb.name(), topic),
                    page.url,
                    kb.name(),
                    summary.text,
                    SourceType::Encyclopedia,
                ));
                self.expand_related(&page.links, max_sources, &mut sources).await;
            }
            Err(LookupError::Ambiguous { candidates, .. }) => {
                debug!("'{}' is ambiguous, trying {} candidates", topic, candidates.len());
                for candidate in candidates.iter().take(MAX_ALTERNATIVES) {
                    if let Some(source) = self
                        .summary_source(candidate, ALTERNATIVE_SENTENCES, SourceType::Alternative)
                        .await
                    {
                        sources.push(source);
                    }
                }
            }
            Err(LookupError::NotFound { .. }) => {
                sources.push(Source::new(
                    format!("No {} page found for '{}'", kb.name(), topic),
                    "",
                    kb.name(),
                    "Consider checking spelling or using alternative terms",
                    SourceType::Error,
                ));
            }
            Err(e) => {
                warn!("Research lookup for '{}' failed: {}", topic, e);
            }
        }

        let remaining = max_sources.saturating_sub(sources.len());
        sources.extend(fallback_sources(topic).into_iter().take(remaining));
        sources.truncate(max_sources);

        let result = ResearchResult::new(topic, sources);
        info!("Research for '{}' found {} sources", topic, result.total_found);
        result
    }

    /// Summary and page metadata of the topic's own article
    ///
    /// Once the summary resolves, a failed page lookup only costs the
    /// canonical URL and the related topics.
    async fn primary(&self, topic: &str) -> Result<(Summary, PageInfo), LookupError> {
        let kb = &self.knowledge_base;
        let summary =
            within(self.lookup_timeout, kb.summarize(topic, PRIMARY_SENTENCES, true)).await?;

        let page = match within(self.lookup_timeout, kb.page(&summary.title)).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Page lookup for '{}' failed: {}", summary.title, e);
                PageInfo {
                    title: summary.title.clone(),
                    url: kb.article_url(&summary.title),
                    links: Vec::new(),
                }
            }
        };
        Ok((summary, page))
    }

    async fn expand_related(
        &self,
        links: &[String],
        max_sources: usize,
        sources: &mut Vec<Source>,
    ) {
        for link in links.iter().take(MAX_RELATED_TOPICS) {
            if sources.len() >= max_sources {
                break;
            }
            if let Some(source) = self
                .summary_source(link, RELATED_SENTENCES, SourceType::Related)
                .await
            {
                sources.push(source);
            }
        }
    }

    /// A source built from the summary of an exact title, if it resolves
    async fn summary_source(
        &self,
        title: &str,
        sentences: usize,
        source_type: SourceType,
    ) -> Option<Source> {
        let kb = &self.knowledge_base;
        match within(self.lookup_timeout, kb.summarize(title, sentences, false)).await {
            Ok(summary) => Some(Source::new(
                format!("{}: {}", kb.name(), title),
                kb.article_url(title),
                kb.name(),
                summary.text,
                source_type,
            )),
            Err(e) => {
                debug!("Skipping '{}': {}", title, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credence_lookup::MockKnowledgeBase;

    fn service(kb: &MockKnowledgeBase) -> ResearchService {
        ResearchService::new(Arc::new(kb.clone()), Duration::from_secs(5))
    }

    fn types(result: &ResearchResult) -> Vec<SourceType> {
        result.sources.iter().map(|s| s.source_type).collect()
    }

    #[test]
    fn test_clamp_max_sources() {
        assert_eq!(clamp_max_sources(None), 5);
        assert_eq!(clamp_max_sources(Some(50)), 10);
        assert_eq!(clamp_max_sources(Some(0)), 1);
        assert_eq!(clamp_max_sources(Some(-3)), 1);
        assert_eq!(clamp_max_sources(Some(7)), 7);
    }

    #[test]
    fn test_fallback_urls_encode_spaces() {
        let fallbacks = fallback_sources("climate change");
        assert_eq!(fallbacks[0].url, "https://scholar.google.com/scholar?q=climate+change");
        assert_eq!(fallbacks[0].title, "Google Scholar: climate change");
        assert_eq!(fallbacks[1].url, "https://www.bbc.com/search?q=climate+change");
        assert_eq!(fallbacks[1].source_type, SourceType::News);
    }

    #[tokio::test]
    async fn test_unknown_topic() {
        let kb = MockKnowledgeBase::new();
        let result = service(&kb).research("Xyzzy123 Nonexistent", Some(3)).await;

        assert_eq!(
            types(&result),
            vec![SourceType::Error, SourceType::Academic, SourceType::News]
        );
        assert_eq!(result.sources[0].url, "");
        assert_eq!(
            result.sources[0].title,
            "No Wikipedia page found for 'Xyzzy123 Nonexistent'"
        );
        assert_eq!(result.total_found, 3);
    }

    #[tokio::test]
    async fn test_primary_and_related() {
        let kb = MockKnowledgeBase::new();
        kb.add_article(
            "Photosynthesis",
            "Photosynthesis converts light into chemical energy. It occurs in plants. It releases oxygen. It needs water.",
        );
        kb.add_links("Photosynthesis", ["Chlorophyll", "Missing Topic", "Oxygen", "Sunlight"]);
        kb.add_article("Chlorophyll", "Chlorophyll is a green pigment. It absorbs light.");
        kb.add_article("Oxygen", "Oxygen is a chemical element. It has symbol O.");
        kb.add_article("Sunlight", "Sunlight is light from the Sun.");

        let result = service(&kb).research("photosynthesis", None).await;

        assert_eq!(
            types(&result),
            vec![
                SourceType::Encyclopedia,
                SourceType::Related,
                SourceType::Related,
                SourceType::Academic,
                SourceType::News,
            ]
        );
        let primary = &result.sources[0];
        assert_eq!(primary.title, "Wikipedia: photosynthesis");
        assert_eq!(primary.url, "https://en.wikipedia.org/wiki/Photosynthesis");
        assert_eq!(
            primary.snippet,
            "Photosynthesis converts light into chemical energy. It occurs in plants. It releases oxygen."
        );
        assert_eq!(result.sources[1].title, "Wikipedia: Chlorophyll");
        assert_eq!(result.sources[1].snippet, "Chlorophyll is a green pigment.");
        assert_eq!(result.sources[2].url, "https://en.wikipedia.org/wiki/Oxygen");
        // Only the first three links are expanded
        assert!(!kb.calls().contains(&"summarize:Sunlight".to_string()));
    }

    #[tokio::test]
    async fn test_related_stops_at_capacity() {
        let kb = MockKnowledgeBase::new();
        kb.add_article("Rome", "Rome is the capital of Italy.");
        kb.add_links("Rome", ["Tiber", "Vatican City", "Colosseum"]);
        kb.add_article("Tiber", "The Tiber is a river.");
        kb.add_article("Vatican City", "Vatican City is a city-state.");
        kb.add_article("Colosseum", "The Colosseum is an amphitheatre.");

        let result = service(&kb).research("Rome", Some(2)).await;

        assert_eq!(types(&result), vec![SourceType::Encyclopedia, SourceType::Related]);
        assert!(!kb.calls().contains(&"summarize:Vatican City".to_string()));
        assert_eq!(result.total_found, 2);
    }

    #[tokio::test]
    async fn test_disambiguation_alternatives() {
        let kb = MockKnowledgeBase::new();
        kb.add_disambiguation(
            "Mercury",
            ["Mercury (planet)", "Mercury (element)", "Mercury (mythology)"],
        );
        kb.add_article(
            "Mercury (planet)",
            "Mercury is the smallest planet. It is closest to the Sun. It has no moons.",
        );

        let result = service(&kb).research("Mercury", Some(10)).await;

        // The failed candidate is skipped, the third is never tried
        assert_eq!(
            types(&result),
            vec![SourceType::Alternative, SourceType::Academic, SourceType::News]
        );
        assert_eq!(result.sources[0].title, "Wikipedia: Mercury (planet)");
        assert_eq!(
            result.sources[0].snippet,
            "Mercury is the smallest planet. It is closest to the Sun."
        );
        assert!(!kb.calls().contains(&"summarize:Mercury (mythology)".to_string()));
    }

    #[tokio::test]
    async fn test_transient_failure_pads_with_fallbacks() {
        let kb = MockKnowledgeBase::new();
        kb.add_error("Kenya", LookupError::Transient("HTTP 503".to_string()));

        let result = service(&kb).research("Kenya", Some(5)).await;
        assert_eq!(types(&result), vec![SourceType::Academic, SourceType::News]);
        assert_eq!(result.total_found, 2);
    }

    #[tokio::test]
    async fn test_page_failure_keeps_resolved_summary() {
        let kb = MockKnowledgeBase::new();
        kb.add_article("Kenya", "Kenya is a country in East Africa. Its capital is Nairobi.");
        kb.add_page_error(
            "Kenya",
            LookupError::NotFound {
                query: "Kenya".to_string(),
            },
        );

        let result = service(&kb).research("Kenya", Some(5)).await;

        assert_eq!(
            types(&result),
            vec![SourceType::Encyclopedia, SourceType::Academic, SourceType::News]
        );
        assert_eq!(result.sources[0].url, "https://en.wikipedia.org/wiki/Kenya");
        assert_eq!(result.sources[0].title, "Wikipedia: Kenya");
        assert!(result.sources[0].snippet.starts_with("Kenya is a country"));
    }

    #[tokio::test]
    async fn test_max_sources_clamped_to_ten() {
        let kb = MockKnowledgeBase::new();
        let result = service(&kb).research("anything", Some(50)).await;
        assert!(result.sources.len() <= MAX_SOURCES_LIMIT);
        assert_eq!(result.total_found, result.sources.len());
    }

    #[tokio::test]
    async fn test_single_source() {
        let kb = MockKnowledgeBase::new();
        let result = service(&kb).research("Xyzzy", Some(1)).await;
        assert_eq!(types(&result), vec![SourceType::Error]);
    }
}
