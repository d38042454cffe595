// Counting test doubles of the two model interfaces.

use ahash::AHashMap;
use ctxsim_core::{ContextModel, Error, Result, TermCounts, TermWeightMap, Vector, WordVectorModel};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Default)]
pub(crate) struct CountingContext {
    idf: AHashMap<String, f32>,
    entities: AHashMap<String, Arc<TermWeightMap>>,
    lookups: Mutex<AHashMap<String, usize>>,
}

impl CountingContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Vocabulary with unit IDF
    pub(crate) fn with_idf(mut self, terms: &[&str]) -> Self {
        for t in terms {
            self.idf.insert(t.to_string(), 1.0);
        }
        self
    }

    pub(crate) fn with_entity(mut self, id: &str, bag: &[(&str, f32)]) -> Self {
        let bow = bag.iter().map(|(t, w)| (t.to_string(), *w)).collect();
        self.entities.insert(id.to_string(), Arc::new(bow));
        self
    }

    pub(crate) fn lookups(&self, id: &str) -> usize {
        self.lookups.lock().get(id).copied().unwrap_or(0)
    }
}

impl ContextModel for CountingContext {
    fn tag(&self) -> &str {
        "counting"
    }

    fn get_bow(&self, counts: &TermCounts) -> Result<TermWeightMap> {
        Ok(counts
            .iter()
            .filter_map(|(t, c)| self.idf.get(t).map(|idf| (t.clone(), *c as f32 * idf)))
            .collect())
    }

    fn get_entity_bow(&self, entity: &str) -> Result<Arc<TermWeightMap>> {
        *self.lookups.lock().entry(entity.to_string()).or_insert(0) += 1;
        Ok(self.entities.get(entity).cloned().unwrap_or_default())
    }
}

pub(crate) struct CountingVectors {
    dim: usize,
    vectors: AHashMap<String, Vector>,
    lookups: Mutex<AHashMap<String, usize>>,
}

impl CountingVectors {
    pub(crate) fn new(vectors: &[(&str, &[f32])]) -> Self {
        Self {
            dim: vectors.first().map_or(2, |(_, v)| v.len()),
            vectors: vectors
                .iter()
                .map(|(t, v)| (t.to_string(), Vector::from_slice(v)))
                .collect(),
            lookups: Mutex::new(AHashMap::new()),
        }
    }

    pub(crate) fn lookups(&self, term: &str) -> usize {
        self.lookups.lock().get(term).copied().unwrap_or(0)
    }

    pub(crate) fn total_lookups(&self) -> usize {
        self.lookups.lock().values().sum()
    }
}

impl WordVectorModel for CountingVectors {
    fn word_to_vec(&self, term: &str) -> Result<Vector> {
        *self.lookups.lock().entry(term.to_string()).or_insert(0) += 1;
        self.vectors
            .get(term)
            .cloned()
            .ok_or_else(|| Error::UnknownTerm(term.to_string()))
    }

    fn vector_size(&self) -> usize {
        self.dim
    }
}
