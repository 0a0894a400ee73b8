//! Retrieval and scoping engine for the LATAM Agent.
//!
//! Decides whether a question belongs to Latin America and the Caribbean,
//! scores a static document collection lexically against it, and renders
//! the selected documents into a citation-labeled context block with a
//! data cutoff date.
//!
//! Everything here is synchronous and pure over a read-only collection.

pub mod base;
pub mod context;
pub mod domain;
pub mod loader;
pub mod normalize;
pub mod retrieve;
pub mod scope;
pub mod score;
pub mod sources;
pub mod types;


// Re-export commonly used types
pub use base::{Evidence, KnowledgeBase};
pub use context::{build_context, infer_cutoff, NO_CUTOFF};
pub use domain::{DomainTables, TopicRule};
pub use loader::{load_documents, parse_documents};
pub use normalize::{normalize, tokenize};
pub use retrieve::{rank, retrieve, DEFAULT_TOP_K};
pub use scope::{
    assess_scope, detect_countries, detect_countries_in, is_excluded_elsewhere, is_in_scope,
    is_in_scope_with, ScopeAssessment,
};
pub use score::{score_document, QueryProfile};
pub use sources::distinct_sources;
pub use types::{DataSource, Document, ScoredDocument};
