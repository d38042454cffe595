//! Feature-extraction driver
//!
//! Runs every configured feature over a document: one `compute_doc_state`
//! per feature, then one `compute` per (chain, candidate).

use crate::document::Document;
use crate::feature::Feature;
use ctxsim_core::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, Dispatch};

/// One feature value of one candidate of one chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub doc_id: String,
    pub chain: usize,
    pub candidate: String,
    pub feature: String,
    pub value: f32,
}

/// Runs features over documents
///
/// Logging goes to the injected [`Dispatch`]; the default dispatch drops
/// everything.
pub struct FeatureExtractor {
    features: Vec<Box<dyn Feature>>,
    dispatch: Dispatch,
}

impl FeatureExtractor {
    pub fn new(features: Vec<Box<dyn Feature>>) -> Self {
        Self {
            features,
            dispatch: Dispatch::none(),
        }
    }

    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn features(&self) -> &[Box<dyn Feature>] {
        &self.features
    }

    /// Score every candidate of every chain of `doc`, feature by feature
    pub fn extract(&self, doc: &Document) -> Result<Vec<CandidateScore>> {
        tracing::dispatcher::with_default(&self.dispatch, || self.extract_doc(doc))
    }

    /// Score documents in parallel; each document stays on one thread
    pub fn extract_batch(&self, docs: &[Document]) -> Result<Vec<Vec<CandidateScore>>> {
        docs.par_iter().map(|doc| self.extract(doc)).collect()
    }

    fn extract_doc(&self, doc: &Document) -> Result<Vec<CandidateScore>> {
        let span = tracing::debug_span!("document", id = %doc.id, chains = doc.chains.len());
        let _enter = span.enter();

        let mut scores = Vec::new();
        for feature in &self.features {
            let state = feature.compute_doc_state(doc)?;
            debug!(feature = feature.name(), candidates = state.len(), "Computed document state");

            for (i, chain) in doc.chains.iter().enumerate() {
                for candidate in &chain.candidates {
                    let value = feature.compute(doc, chain, candidate, &state)?;
                    scores.push(CandidateScore {
                        doc_id: doc.id.clone(),
                        chain: i,
                        candidate: candidate.id.clone(),
                        feature: feature.name().to_string(),
                        value,
                    });
                }
            }
        }

        Ok(scores)
    }
}
