//! Credence Domain Layer
//!
//! Value objects and collaborator interfaces shared by every other Credence crate.
//!
//! ## Key Concepts
//!
//! - **Entity**: A named referent (person, organization, location, event, date) found in text
//! - **Claim**: A sentence selected as a candidate factual assertion, with a risk-adjusted confidence
//! - **Source**: A reference entry supporting an assessment or a research topic
//! - **Capability**: An optional collaborator that is either available or explicitly not
//!
//! ## Architecture
//!
//! This crate holds no I/O. Knowledge-base lookups, news search and the NLP model
//! are described by the traits in [`traits`] and implemented in infrastructure crates.
//! The only dependencies are `serde` for the wire format, `thiserror` for
//! [`LookupError`] and `async-trait` for object-safe async collaborators.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capability;
pub mod claim;
pub mod entity;
pub mod result;
pub mod source;
pub mod traits;

// Re-exports for convenience
pub use capability::Capability;
pub use claim::Claim;
pub use entity::{Entity, EntityLabel};
pub use result::{FactCheckResult, ResearchResult};
pub use source::{Source, SourceType};
pub use traits::LookupError;
