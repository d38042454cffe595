//! Read-only model interfaces consumed by the similarity engine.

use crate::{Result, TermCounts, TermWeightMap, Vector};
use std::sync::Arc;

/// Entity context model: TF-IDF style weighting of term counts and
/// precomputed per-entity bags
pub trait ContextModel: Send + Sync {
    /// Identifier the model was loaded under
    fn tag(&self) -> &str;

    /// Weight raw term counts into a bag; terms outside the model's
    /// vocabulary are dropped
    fn get_bow(&self, counts: &TermCounts) -> Result<TermWeightMap>;

    /// Precomputed bag of an entity; an unknown entity yields an empty bag
    fn get_entity_bow(&self, entity: &str) -> Result<Arc<TermWeightMap>>;
}

/// Word-vector model: fixed-dimensionality embedding per term
pub trait WordVectorModel: Send + Sync {
    fn word_to_vec(&self, term: &str) -> Result<Vector>;

    fn vector_size(&self) -> usize;
}
