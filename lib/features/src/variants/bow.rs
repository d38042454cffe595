use crate::document::Document;
use crate::feature::ContextFeature;
use crate::representation::ContextBuilder;
use ctxsim_core::{sparse_cosine_distance, ContextModel, Result, TermWeightMap};
use std::sync::Arc;

/// Bag-of-words similarity: sparse cosine distance between the document's
/// TF-IDF bag and the entity's precomputed bag
pub struct BowContext {
    name: String,
    context: ContextBuilder,
}

impl BowContext {
    pub fn new(context: Arc<dyn ContextModel>) -> Self {
        let context = ContextBuilder::new(context);
        Self {
            name: format!("bow:{}", context.tag()),
            context,
        }
    }
}

impl ContextFeature for BowContext {
    type Repr = Arc<TermWeightMap>;

    fn name(&self) -> &str {
        &self.name
    }

    fn default_distance(&self) -> f32 {
        1.0
    }

    fn doc_repr(&self, doc: &Document) -> Result<Self::Repr> {
        Ok(Arc::new(self.context.tokens_to_bow_vector(doc.tokens())?))
    }

    fn entity_repr(&self, entity: &str) -> Result<Self::Repr> {
        self.context.get_entity_context_vec(entity)
    }

    fn distance(&self, query: &Self::Repr, entity: &Self::Repr) -> Result<f32> {
        if query.is_empty() || entity.is_empty() {
            return Ok(self.default_distance());
        }
        sparse_cosine_distance(query, entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Candidate, MentionChain};
    use crate::feature::Feature;
    use crate::testing::CountingContext;

    fn doc() -> Document {
        Document::new(
            "d1",
            "paris capital france",
            vec![
                MentionChain::new(["X", "Y"]),
                MentionChain::new(["X"]),
                MentionChain::new(["Z"]),
            ],
        )
    }

    fn context() -> Arc<CountingContext> {
        Arc::new(
            CountingContext::new()
                .with_idf(&["paris", "capital", "france"])
                .with_entity("X", &[("paris", 2.0), ("france", 1.0)])
                .with_entity("Y", &[("texas", 1.0)]),
        )
    }

    #[test]
    fn test_each_candidate_looked_up_once() {
        let ctx = context();
        let feature = BowContext::new(ctx.clone());
        let state = feature.compute_doc_state(&doc()).unwrap();

        assert_eq!(state.len(), 3);
        assert_eq!(ctx.lookups("X"), 1);
        assert_eq!(ctx.lookups("Y"), 1);
        assert_eq!(ctx.lookups("Z"), 1);
    }

    #[test]
    fn test_compute_is_lookup() {
        let feature = BowContext::new(context());
        let d = doc();
        let state = feature.compute_doc_state(&d).unwrap();

        let x = feature.compute(&d, &d.chains[0], &Candidate::new("X"), &state).unwrap();
        let x_again = feature.compute(&d, &d.chains[1], &Candidate::new("X"), &state).unwrap();
        let y = feature.compute(&d, &d.chains[0], &Candidate::new("Y"), &state).unwrap();
        assert_eq!(x, x_again);
        assert!(x < y);
        assert!((y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_entity_gets_default() {
        let feature = BowContext::new(context());
        let d = doc();
        let state = feature.compute_doc_state(&d).unwrap();
        let z = feature.compute(&d, &d.chains[2], &Candidate::new("Z"), &state).unwrap();
        assert_eq!(z, 1.0);
    }

    #[test]
    fn test_state_from_other_document_is_rejected() {
        let feature = BowContext::new(context());
        let d = doc();
        let state = feature.compute_doc_state(&d).unwrap();

        let mut other = d.clone();
        other.id = "d2".to_string();
        assert!(feature
            .compute(&other, &other.chains[0], &Candidate::new("X"), &state)
            .is_err());
        assert!(feature
            .compute(&d, &d.chains[0], &Candidate::new("W"), &state)
            .is_err());
    }
}
