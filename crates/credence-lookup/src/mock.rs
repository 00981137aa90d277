//! Deterministic collaborators for testing
//!
//! Both mocks return pre-configured data without making network calls and
//! record every call they receive. Clones share state, so a test can keep a
//! handle after moving a clone into the pipeline.

use async_trait::async_trait;
use credence_domain::traits::{
    KnowledgeBase, NewsArticle, NewsQuery, NewsSearch, PageInfo, Summary,
};
use credence_domain::LookupError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

const MOCK_ARTICLE_BASE: &str = "https://en.wikipedia.org/wiki/";

#[derive(Debug, Clone)]
struct Article {
    title: String,
    text: String,
}

#[derive(Debug, Default)]
struct KnowledgeState {
    articles: HashMap<String, Article>,
    links: HashMap<String, Vec<String>>,
    disambiguations: HashMap<String, Vec<String>>,
    errors: HashMap<String, LookupError>,
    page_errors: HashMap<String, LookupError>,
    delay: Option<Duration>,
    calls: Vec<String>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Mock knowledge base
///
/// Titles match case-insensitively, which stands in for the real service's
/// auto-suggestion.
///
/// # Examples
///
/// ```
/// use credence_lookup::MockKnowledgeBase;
/// use credence_domain::traits::KnowledgeBase;
///
/// # tokio_test_block(async {
/// let kb = MockKnowledgeBase::new();
/// kb.add_article("Paris", "Paris is the capital of France. It lies on the Seine.");
///
/// let summary = kb.summarize("paris", 1, true).await.unwrap();
/// assert_eq!(summary.title, "Paris");
/// assert_eq!(summary.text, "Paris is the capital of France.");
/// assert_eq!(kb.call_count(), 1);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) {
/// #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockKnowledgeBase {
    state: Arc<Mutex<KnowledgeState>>,
}

impl MockKnowledgeBase {
    /// Create an empty knowledge base where every lookup is not found
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an article with its full text
    pub fn add_article(&self, title: impl Into<String>, text: impl Into<String>) {
        let title = title.into();
        lock(&self.state).articles.insert(
            key(&title),
            Article {
                title,
                text: text.into(),
            },
        );
    }

    /// Set the linked topics of an article
    pub fn add_links<I, S>(&self, title: &str, links: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lock(&self.state)
            .links
            .insert(key(title), links.into_iter().map(Into::into).collect());
    }

    /// Make a title resolve to a disambiguation page
    pub fn add_disambiguation<I, S>(&self, title: &str, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lock(&self.state)
            .disambiguations
            .insert(key(title), candidates.into_iter().map(Into::into).collect());
    }

    /// Make every lookup of a title fail with `error`
    pub fn add_error(&self, title: &str, error: LookupError) {
        lock(&self.state).errors.insert(key(title), error);
    }

    /// Make only `page` lookups of a title fail with `error`
    pub fn add_page_error(&self, title: &str, error: LookupError) {
        lock(&self.state).page_errors.insert(key(title), error);
    }

    /// Delay every call, for timeout tests
    pub fn set_delay(&self, delay: Duration) {
        lock(&self.state).delay = Some(delay);
    }

    /// Calls received so far, as `"summarize:<title>"` or `"page:<title>"`
    pub fn calls(&self) -> Vec<String> {
        lock(&self.state).calls.clone()
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        lock(&self.state).calls.len()
    }

    /// Record the call and return the delay to apply
    fn record(&self, call: String) -> Option<Duration> {
        let mut state = lock(&self.state);
        state.calls.push(call);
        state.delay
    }

    /// Resolve a title to its article, or the configured failure
    fn resolve(&self, title: &str) -> Result<Article, LookupError> {
        let state = lock(&self.state);
        let k = key(title);

        if let Some(error) = state.errors.get(&k) {
            return Err(error.clone());
        }
        if let Some(candidates) = state.disambiguations.get(&k) {
            return Err(LookupError::Ambiguous {
                query: title.to_string(),
                candidates: candidates.clone(),
            });
        }
        state.articles.get(&k).cloned().ok_or_else(|| LookupError::NotFound {
            query: title.to_string(),
        })
    }
}

#[async_trait]
impl KnowledgeBase for MockKnowledgeBase {
    async fn summarize(
        &self,
        title: &str,
        sentences: usize,
        _auto_suggest: bool,
    ) -> Result<Summary, LookupError> {
        if let Some(delay) = self.record(format!("summarize:{}", title)) {
            tokio::time::sleep(delay).await;
        }

        let article = self.resolve(title)?;
        Ok(Summary {
            text: first_sentences(&article.text, sentences),
            title: article.title,
        })
    }

    async fn page(&self, title: &str) -> Result<PageInfo, LookupError> {
        if let Some(delay) = self.record(format!("page:{}", title)) {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = lock(&self.state).page_errors.get(&key(title)) {
            return Err(error.clone());
        }
        let article = self.resolve(title)?;
        let links = lock(&self.state)
            .links
            .get(&key(title))
            .cloned()
            .unwrap_or_default();

        Ok(PageInfo {
            url: self.article_url(&article.title),
            title: article.title,
            links,
        })
    }

    fn article_url(&self, title: &str) -> String {
        format!("{}{}", MOCK_ARTICLE_BASE, title.replace(' ', "_"))
    }

    fn name(&self) -> &str {
        "Wikipedia"
    }
}

/// First `n` sentences of `text`, split after `.`, `!` or `?` followed by a space
pub fn first_sentences(text: &str, n: usize) -> String {
    let mut end = text.len();
    let mut seen = 0;

    for (i, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?') && text[i + c.len_utf8()..].starts_with(' ') {
            seen += 1;
            if seen == n {
                end = i + c.len_utf8();
                break;
            }
        }
    }

    text[..end].trim().to_string()
}

#[derive(Debug, Default)]
struct NewsState {
    queries: Vec<NewsQuery>,
}

/// Mock news search returning a fixed article list or a fixed error
#[derive(Debug, Clone)]
pub struct MockNewsSearch {
    response: Result<Vec<NewsArticle>, LookupError>,
    state: Arc<Mutex<NewsState>>,
}

impl MockNewsSearch {
    /// Return `articles` (truncated to the requested page size) for every query
    pub fn new(articles: Vec<NewsArticle>) -> Self {
        Self {
            response: Ok(articles),
            state: Arc::default(),
        }
    }

    /// Fail every query with `error`
    pub fn failing(error: LookupError) -> Self {
        Self {
            response: Err(error),
            state: Arc::default(),
        }
    }

    /// Queries received so far
    pub fn queries(&self) -> Vec<NewsQuery> {
        lock(&self.state).queries.clone()
    }
}

#[async_trait]
impl NewsSearch for MockNewsSearch {
    async fn search(&self, query: &NewsQuery) -> Result<Vec<NewsArticle>, LookupError> {
        lock(&self.state).queries.push(query.clone());

        let mut articles = self.response.clone()?;
        articles.truncate(query.page_size);
        Ok(articles)
    }
}
