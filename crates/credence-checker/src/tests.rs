//! Pipeline tests for the FactChecker

use crate::{CheckerConfig, CheckerError, FactChecker, MAX_SCORED_CLAIMS};
use credence_domain::traits::{KnowledgeBase, NewsArticle, NewsSearch, NlpModel, Sentence};
use credence_domain::{Capability, Entity, EntityLabel, SourceType};
use credence_lookup::{MockKnowledgeBase, MockNewsSearch};
use credence_nlp::RuleBasedNlp;
use std::sync::Arc;

/// Returns fixed sentences and entities regardless of input
struct ScriptedNlp {
    sentences: Vec<String>,
    entities: Vec<Entity>,
}

impl ScriptedNlp {
    fn new(sentences: &[&str], entities: Vec<Entity>) -> Self {
        Self {
            sentences: sentences.iter().map(|s| s.to_string()).collect(),
            entities,
        }
    }
}

impl NlpModel for ScriptedNlp {
    fn segment(&self, _text: &str) -> Vec<Sentence> {
        self.sentences
            .iter()
            .map(|text| Sentence {
                text: text.clone(),
                start: 0,
                end: text.len(),
            })
            .collect()
    }

    fn extract_entities(&self, _text: &str) -> Vec<Entity> {
        self.entities.clone()
    }
}

fn rule_based() -> Capability<Arc<dyn NlpModel>> {
    Capability::available(Arc::new(RuleBasedNlp::new().unwrap()) as Arc<dyn NlpModel>)
}

fn scripted(model: ScriptedNlp) -> Capability<Arc<dyn NlpModel>> {
    Capability::available(Arc::new(model) as Arc<dyn NlpModel>)
}

fn no_news() -> Capability<Arc<dyn NewsSearch>> {
    Capability::unavailable("no API key configured")
}

fn checker(
    nlp: Capability<Arc<dyn NlpModel>>,
    kb: &MockKnowledgeBase,
    news: Capability<Arc<dyn NewsSearch>>,
) -> FactChecker {
    FactChecker::new(
        nlp,
        Arc::new(kb.clone()) as Arc<dyn KnowledgeBase>,
        news,
        &CheckerConfig::default(),
    )
}

#[tokio::test]
async fn test_plain_text_scores_full() {
    let kb = MockKnowledgeBase::new();
    let result = checker(rule_based(), &kb, no_news())
        .check("Everyone always agrees with the plan.")
        .await
        .unwrap();

    assert!(result.entities.is_empty());
    assert!(result.flagged_claims.is_empty());
    assert!(result.credible_sources.is_empty());
    assert_eq!(result.overall_score, 100);
    assert_eq!(kb.call_count(), 0);
}

#[tokio::test]
async fn test_vague_attributed_claim() {
    let kb = MockKnowledgeBase::new();
    let result = checker(rule_based(), &kb, no_news())
        .check("Many experts said prices will rise.")
        .await
        .unwrap();

    assert_eq!(result.flagged_claims.len(), 1);
    let claim = &result.flagged_claims[0];
    assert_eq!(claim.text, "Many experts said prices will rise.");
    assert_eq!(claim.issues, vec!["Contains vague quantifiers"]);
    assert_eq!(claim.confidence, 90);
    assert_eq!(claim.suggestion, "Consider adding sources or qualifying statements");
    // 100 - 1/1 * 60, no entities
    assert_eq!(result.overall_score, 40);
}

#[tokio::test]
async fn test_full_pipeline() {
    let kb = MockKnowledgeBase::new();
    kb.add_article("Kenya", "Kenya is a country in East Africa. Its capital is Nairobi.");
    kb.add_disambiguation("NASA", ["NASA (agency)", "NASA (band)"]);
    kb.add_article("NASA (agency)", "NASA is the US space agency.");

    let news = MockNewsSearch::new(vec![
        NewsArticle {
            title: "Kenya launches satellite".to_string(),
            url: "https://news.example.com/kenya-satellite".to_string(),
            source: "Daily Planet".to_string(),
            description: Some("A first for the country.".to_string()),
        },
        NewsArticle {
            title: "Kenya and NASA sign deal".to_string(),
            url: "https://news.example.com/kenya-nasa".to_string(),
            source: "Gazette".to_string(),
            description: None,
        },
        NewsArticle {
            title: "Third story".to_string(),
            url: "https://news.example.com/third".to_string(),
            source: "Gazette".to_string(),
            description: None,
        },
    ]);

    let nlp = ScriptedNlp::new(
        &[
            "Officials said 12 people attended the launch.",
            "Many residents always blame the council for 3 delays.",
            "Only 1 left.",
            "It was a quiet afternoon overall.",
        ],
        vec![
            Entity::new("Kenya", EntityLabel::Location),
            Entity::new("NASA", EntityLabel::Organization),
            Entity::new("Ghostland", EntityLabel::Location),
            Entity::new("March 2024", EntityLabel::Date),
        ],
    );

    let result = checker(
        scripted(nlp),
        &kb,
        Capability::available(Arc::new(news) as Arc<dyn NewsSearch>),
    )
    .check("ignored by the scripted model")
    .await
    .unwrap();

    assert_eq!(result.entities.len(), 4);

    assert_eq!(result.flagged_claims.len(), 1);
    assert_eq!(result.flagged_claims[0].confidence, 55);
    assert_eq!(
        result.flagged_claims[0].issues,
        vec![
            "Contains absolute statement",
            "Contains vague quantifiers",
            "No clear source attribution",
        ]
    );

    let types: Vec<_> = result.credible_sources.iter().map(|s| s.source_type).collect();
    assert_eq!(types, vec![SourceType::Related, SourceType::News, SourceType::News]);
    assert_eq!(result.credible_sources[0].title, "Wikipedia: Kenya");
    assert_eq!(result.credible_sources[2].snippet, "Kenya and NASA sign deal");

    // Claims: 100 - 1/2 * 60 = 70; entities: 2 verified of 3 checked = 26.67
    assert_eq!(result.overall_score, 97);

    // The fourth entity is never looked up
    assert!(!kb.calls().iter().any(|c| c.contains("March 2024")));
}

#[tokio::test]
async fn test_only_five_claims_scored() {
    let sentences = [
        "Prices rose 1 percent in January.",
        "Prices rose 2 percent in February.",
        "Prices rose 3 percent in March then.",
        "Prices rose 4 percent in April then.",
        "Prices rose 5 percent in May as well.",
        "Prices rose 6 percent in June as well.",
        "Prices rose 7 percent in July as well.",
    ];
    let kb = MockKnowledgeBase::new();
    let result = checker(scripted(ScriptedNlp::new(&sentences, vec![])), &kb, no_news())
        .check("ignored")
        .await
        .unwrap();

    assert_eq!(result.flagged_claims.len(), MAX_SCORED_CLAIMS);
    // 100 - 5/7 * 60 = 57.14
    assert_eq!(result.overall_score, 57);
}

#[tokio::test]
async fn test_missing_model_fails_before_lookups() {
    let kb = MockKnowledgeBase::new();
    let checker = checker(Capability::unavailable("model failed to load"), &kb, no_news());

    assert!(!checker.is_ready());
    let err = checker.check("NASA said 3 things.").await.unwrap_err();
    assert_eq!(err, CheckerError::ServiceUnavailable("model failed to load".to_string()));
    assert_eq!(kb.call_count(), 0);
}

#[tokio::test]
async fn test_identical_input_identical_result() {
    let kb = MockKnowledgeBase::new();
    kb.add_article("Kenya", "Kenya is a country in East Africa.");
    let checker = checker(rule_based(), &kb, no_news());

    let text = "Officials in Kenya said 40 schools reopened. NASA thanked Kenya again.";
    let first = checker.check(text).await.unwrap();
    let second = checker.check(text).await.unwrap();
    assert_eq!(first, second);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: the score is in range and the caps hold for any text
        #[test]
        fn test_pipeline_invariants(text in "[A-Za-z0-9 ,.!?]{0,300}") {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            let kb = MockKnowledgeBase::new();
            let result = runtime
                .block_on(checker(rule_based(), &kb, no_news()).check(&text))
                .unwrap();

            prop_assert!((20..=100).contains(&result.overall_score));
            prop_assert!(result.flagged_claims.len() <= MAX_SCORED_CLAIMS);
            prop_assert!(kb.call_count() <= crate::MAX_VERIFIED_ENTITIES);
        }
    }
}

#[tokio::test]
async fn test_repeated_entities_and_syndicated_news_yield_unique_sources() {
    let kb = MockKnowledgeBase::new();
    kb.add_article("Kenya", "Kenya is a country in East Africa.");
    let syndicated = NewsArticle {
        title: "Kenya reopens schools".to_string(),
        url: "https://news.example.com/kenya".to_string(),
        source: "Wire Service".to_string(),
        description: None,
    };
    let news = MockNewsSearch::new(vec![syndicated.clone(), syndicated]);
    let nlp = ScriptedNlp::new(
        &["Officials in Kenya said 40 schools reopened."],
        vec![
            Entity::new("Kenya", EntityLabel::Location),
            Entity::new("Kenya", EntityLabel::Location),
        ],
    );

    let result = checker(
        scripted(nlp),
        &kb,
        Capability::available(Arc::new(news) as Arc<dyn NewsSearch>),
    )
    .check("Officials in Kenya said 40 schools reopened.")
    .await
    .unwrap();

    let urls: Vec<_> = result.credible_sources.iter().map(|s| s.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://en.wikipedia.org/wiki/Kenya", "https://news.example.com/kenya"]
    );
    assert_eq!(kb.call_count(), 1);
}
