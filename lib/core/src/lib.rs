//! # ctxsim Core
//!
//! Core library for the ctxsim context-similarity engine.
//!
//! This crate provides the representations and distance functions shared by
//! every feature variant:
//!
//! - [`TermWeightMap`] - Sparse TF-IDF style bag with deterministic iteration
//! - [`Vector`] - Dense vector with checked cosine operations
//! - [`Pooling`] - Average and envelope pooling of word-vector streams
//! - [`lexical_best_match_distance`] - Top-k best-match over word vectors
//! - [`crp_cluster`] - Online clustering of word vectors
//! - [`ContextModel`] / [`WordVectorModel`] - Interfaces of the external models
//!
//! ## Example
//!
//! ```rust
//! use ctxsim_core::{sparse_cosine_distance, TermWeightMap};
//!
//! let doc: TermWeightMap = [("paris".to_string(), 1.0), ("france".to_string(), 0.5)]
//!     .into_iter()
//!     .collect();
//! let entity: TermWeightMap = [("paris".to_string(), 2.0)].into_iter().collect();
//!
//! let d = sparse_cosine_distance(&doc, &entity).unwrap();
//! assert!(d > 0.0 && d < 1.0);
//! ```

pub mod error;
pub mod bow;
pub mod vector;
pub mod pooling;
pub mod best_match;
pub mod cluster;
pub mod model;

pub use error::{Error, Result};
pub use bow::{count_terms, sparse_cosine_distance, TermCounts, TermWeightMap};
pub use vector::{dense_cosine_distance, Vector};
pub use pooling::Pooling;
pub use best_match::{best_match_similarity, lexical_best_match_distance, BestMatchMode, DEFAULT_TOP_K};
pub use cluster::{cluster_set_distance, crp_cluster, ClusterSet, DEFAULT_CLUSTER_LIMIT};
pub use model::{ContextModel, WordVectorModel};
