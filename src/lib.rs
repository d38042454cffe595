//! # ctxsim
//!
//! Context-similarity features for entity disambiguation.
//!
//! Given a document with mention chains and candidate entities, ctxsim scores
//! how well each candidate's known context matches the document, using sparse
//! TF-IDF bags, pooled word vectors, lexical best-match or clustered word
//! vectors. Each candidate is scored once per document no matter how many
//! chains mention it.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! ctxsim --model-dir ./models --context-model wiki \
//!     --feature bow --feature max_dbow --wordvec-model vectors.txt \
//!     --input docs.jsonl > scores.jsonl
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use ctxsim::prelude::*;
//!
//! let store = ModelStore::new("./models");
//! let config = FeatureConfig::new(FeatureKind::LlmDbow, "wiki")
//!     .with_wordvec_model("vectors.txt");
//! let extractor = FeatureExtractor::new(build_all(&[config], &store).unwrap());
//!
//! let doc = Document::new("d1", "paris capital france", vec![MentionChain::new(["Paris", "Texas"])]);
//! for score in extractor.extract(&doc).unwrap() {
//!     println!("{} {} {}", score.candidate, score.feature, score.value);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `ctxsim-core` - Bags, vectors, distances, pooling, best-match, clustering
//! - `ctxsim-models` - Reference context and word-vector models, model store
//! - `ctxsim-features` - Feature variants, per-document state, extraction driver

// Re-export core types
pub use ctxsim_core::{
    ContextModel, WordVectorModel,
    TermWeightMap, TermCounts, Vector, ClusterSet,
    Pooling, BestMatchMode,
    sparse_cosine_distance, dense_cosine_distance,
    Error, Result,
};

// Re-export models
pub use ctxsim_models::{EntityContextModel, WordVectors, ModelStore};

// Re-export features
pub use ctxsim_features::{
    Document, MentionChain, Candidate,
    Feature, ContextFeature, DocState,
    BowContext, DbowContext, LlmDbowContext, CrpDbowContext,
    FeatureConfig, FeatureKind, build_all,
    FeatureExtractor, CandidateScore,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Document, MentionChain, Candidate,
        Feature, DocState,
        FeatureConfig, FeatureKind, build_all,
        FeatureExtractor, CandidateScore,
        ModelStore, EntityContextModel, WordVectors,
        TermWeightMap, Vector,
        Error, Result,
    };
}
