//! # ctxsim Features
//!
//! Context-similarity features for entity disambiguation.
//!
//! For a document with mention chains, each offering candidate entities, a
//! feature scores how well each candidate's known context matches the
//! document's context. Every variant computes all candidate distances once per
//! document ([`Feature::compute_doc_state`]) and answers per-chain queries
//! from that state ([`Feature::compute`]).
//!
//! | Variant | Representation | Default distance |
//! |---|---|---|
//! | [`BowContext`] | sparse TF-IDF bag | 1.0 |
//! | [`DbowContext`] (average / envelope) | pooled word vectors | 2.0 |
//! | [`LlmDbowContext`] | top-k best-match over word vectors | 1.0 |
//! | [`CrpDbowContext`] | clustered word vectors | 2.0 |
//!
//! ## Example
//!
//! ```rust
//! use ctxsim_features::{BowContext, Document, Feature, MentionChain};
//! use ctxsim_models::EntityContextModel;
//! use std::sync::Arc;
//!
//! let model = EntityContextModel::from_corpus(
//!     "wiki",
//!     vec![
//!         ("Paris".to_string(), vec!["paris", "capital", "france"]),
//!         ("Texas".to_string(), vec!["texas", "state", "austin"]),
//!     ],
//! );
//! let feature = BowContext::new(Arc::new(model));
//!
//! let doc = Document::new("d1", "paris capital france", vec![MentionChain::new(["Paris", "Texas"])]);
//! let state = feature.compute_doc_state(&doc).unwrap();
//! assert!(state.get("Paris").unwrap() < state.get("Texas").unwrap());
//! ```

pub mod document;
pub mod feature;
pub mod representation;
pub mod variants;
pub mod config;
pub mod extractor;

#[cfg(test)]
mod testing;

pub use document::{Candidate, Document, MentionChain};
pub use feature::{ContextFeature, DocState, Feature};
pub use representation::{CacheStats, ContextBuilder, TermVectors};
pub use variants::{BowContext, CrpDbowContext, DbowContext, LlmDbowContext};
pub use config::{build_all, FeatureConfig, FeatureKind};
pub use extractor::{CandidateScore, FeatureExtractor};
