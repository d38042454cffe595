//! # ctxsim Models
//!
//! Reference implementations of the two read-only models consumed by the
//! similarity engine, plus a [`ModelStore`] that loads each model once.
//!
//! - [`EntityContextModel`] - smoothed TF-IDF weighting and per-entity bags,
//!   stored as JSON or bincode snapshots
//! - [`WordVectors`] - word2vec text format embeddings

pub mod context;
pub mod wordvec;
pub mod store;
mod format;

pub use context::{ContextSnapshot, EntityContextModel};
pub use wordvec::WordVectors;
pub use store::ModelStore;
