//! Builders turning text and bags into the representations compared by the
//! features.

use ahash::AHashMap;
use ctxsim_core::{
    count_terms, ContextModel, Pooling, Result, TermWeightMap, Vector, WordVectorModel,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Sparse representations backed by an entity context model
#[derive(Clone)]
pub struct ContextBuilder {
    model: Arc<dyn ContextModel>,
}

impl ContextBuilder {
    pub fn new(model: Arc<dyn ContextModel>) -> Self {
        Self { model }
    }

    #[inline]
    pub fn tag(&self) -> &str {
        self.model.tag()
    }

    /// Lower-case and count the tokens, then weight them with the model
    pub fn tokens_to_bow_vector<I, S>(&self, tokens: I) -> Result<TermWeightMap>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.model.get_bow(&count_terms(tokens))
    }

    pub fn get_entity_context_vec(&self, entity: &str) -> Result<Arc<TermWeightMap>> {
        self.model.get_entity_bow(entity)
    }
}

/// Hit and miss counts of the term-vector memo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Weighted word vectors, memoized by `(term, weight)`
///
/// The memo only grows. Weights are continuous, so hits are rare unless the
/// same bag is seen again (entity bags across documents).
pub struct TermVectors {
    model: Arc<dyn WordVectorModel>,
    // term -> weight bits -> scaled vector
    cache: Mutex<AHashMap<String, AHashMap<u32, Vector>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TermVectors {
    pub fn new(model: Arc<dyn WordVectorModel>) -> Self {
        Self {
            model,
            cache: Mutex::new(AHashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn vector_size(&self) -> usize {
        self.model.vector_size()
    }

    /// The word vector of `term` scaled by `weight`
    pub fn term_vector(&self, term: &str, weight: f32) -> Result<Vector> {
        let bits = weight.to_bits();
        if let Some(v) = self.cache.lock().get(term).and_then(|w| w.get(&bits)) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(v.clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let v = &self.model.word_to_vec(term)? * weight;
        self.cache
            .lock()
            .entry(term.to_string())
            .or_default()
            .insert(bits, v.clone());
        Ok(v)
    }

    pub fn iter_word_reps<'a>(
        &'a self,
        bow: &'a TermWeightMap,
    ) -> impl Iterator<Item = Result<Vector>> + 'a {
        bow.iter()
            .map(move |(term, weight)| self.term_vector(term, weight))
    }

    /// Pool a bag into one dense vector; `None` for an empty bag
    pub fn bow_to_dbow(&self, bow: &TermWeightMap, pooling: Pooling) -> Result<Option<Vector>> {
        if bow.is_empty() {
            return Ok(None);
        }
        pooling.combine(self.iter_word_reps(bow))
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
