//! The feature contract and the per-document distance cache.

use crate::document::{Candidate, Document, MentionChain};
use ahash::AHashMap;
use ctxsim_core::{Error, Result};
use tracing::debug;

/// Distances of every candidate in one document, computed once per feature
///
/// Built by [`Feature::compute_doc_state`] and only valid for that document.
#[derive(Debug, Clone)]
pub struct DocState {
    doc_id: String,
    distances: AHashMap<String, f32>,
}

impl DocState {
    pub fn new(doc_id: impl Into<String>, distances: AHashMap<String, f32>) -> Self {
        Self {
            doc_id: doc_id.into(),
            distances,
        }
    }

    #[inline]
    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    #[inline]
    pub fn get(&self, candidate: &str) -> Option<f32> {
        self.distances.get(candidate).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Distance of `candidate`, rejecting a state built for another document
    pub fn lookup(&self, doc: &Document, candidate: &Candidate) -> Result<f32> {
        if doc.id != self.doc_id {
            return Err(Error::StateMismatch(format!(
                "state of document {} used for document {}",
                self.doc_id, doc.id
            )));
        }
        self.get(&candidate.id).ok_or_else(|| {
            Error::StateMismatch(format!(
                "candidate {} not in state of document {}",
                candidate.id, self.doc_id
            ))
        })
    }
}

/// A per-candidate feature computed against a document
///
/// `compute_doc_state` runs once per document and must finish before any
/// `compute` call for that document.
pub trait Feature: Send + Sync {
    fn name(&self) -> &str;

    /// Value used when either side of a comparison has no representation
    fn default_distance(&self) -> f32;

    fn compute_doc_state(&self, doc: &Document) -> Result<DocState>;

    fn compute(
        &self,
        doc: &Document,
        _chain: &MentionChain,
        candidate: &Candidate,
        state: &DocState,
    ) -> Result<f32> {
        state.lookup(doc, candidate)
    }
}

/// A context-similarity feature: a document representation, an entity
/// representation and a distance between the two
///
/// Every such feature gets [`Feature`] for free; the document representation
/// is built once and each distinct candidate is scored once.
pub trait ContextFeature: Send + Sync {
    type Repr;

    fn name(&self) -> &str;

    fn default_distance(&self) -> f32;

    fn doc_repr(&self, doc: &Document) -> Result<Self::Repr>;

    fn entity_repr(&self, entity: &str) -> Result<Self::Repr>;

    /// Returns `default_distance()` when either side is empty
    fn distance(&self, query: &Self::Repr, entity: &Self::Repr) -> Result<f32>;
}

impl<T: ContextFeature> Feature for T {
    fn name(&self) -> &str {
        ContextFeature::name(self)
    }

    fn default_distance(&self) -> f32 {
        ContextFeature::default_distance(self)
    }

    fn compute_doc_state(&self, doc: &Document) -> Result<DocState> {
        let candidates = doc.candidate_ids();
        let query = self.doc_repr(doc)?;

        let mut distances = AHashMap::with_capacity(candidates.len());
        for id in candidates {
            let entity = self.entity_repr(id)?;
            let distance = self.distance(&query, &entity)?;
            debug!(feature = ContextFeature::name(self), candidate = id, distance, "Scored candidate");
            distances.insert(id.to_string(), distance);
        }

        Ok(DocState::new(doc.id.clone(), distances))
    }
}
