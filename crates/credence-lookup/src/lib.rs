//! Credence Lookup Services
//!
//! HTTP implementations of the `KnowledgeBase` and `NewsSearch` traits from
//! `credence-domain`, plus deterministic mocks.
//!
//! # Services
//!
//! - `WikipediaClient`: MediaWiki Action API (summaries, disambiguation, links)
//! - `NewsApiClient`: NewsAPI `/v2/everything`
//! - `MockKnowledgeBase` / `MockNewsSearch`: in-memory collaborators for tests
//!
//! Every failure is reported as a [`credence_domain::LookupError`] so callers
//! can tell a missing article from an ambiguous title or a network problem.

#![warn(missing_docs)]

pub mod mock;
pub mod newsapi;
pub mod wikipedia;

pub use mock::{MockKnowledgeBase, MockNewsSearch};
pub use newsapi::{is_usable_key, NewsApiClient};
pub use wikipedia::WikipediaClient;
