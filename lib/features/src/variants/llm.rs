use crate::document::Document;
use crate::feature::ContextFeature;
use crate::representation::{ContextBuilder, TermVectors};
use ctxsim_core::{
    lexical_best_match_distance, BestMatchMode, ContextModel, Result, TermWeightMap,
    DEFAULT_TOP_K,
};
use std::sync::Arc;

/// Lexical-level matching over the similarity of distributed word
/// representations
pub struct LlmDbowContext {
    name: String,
    context: ContextBuilder,
    vectors: Arc<TermVectors>,
    top_k: usize,
    mode: BestMatchMode,
}

impl LlmDbowContext {
    pub fn new(context: Arc<dyn ContextModel>, vectors: Arc<TermVectors>) -> Self {
        let context = ContextBuilder::new(context);
        Self {
            name: format!("llm_dbow:{}", context.tag()),
            context,
            vectors,
            top_k: DEFAULT_TOP_K,
            mode: BestMatchMode::default(),
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_mode(mut self, mode: BestMatchMode) -> Self {
        self.mode = mode;
        self
    }
}

impl ContextFeature for LlmDbowContext {
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
        lexical_best_match_distance(query, entity, self.top_k, self.mode, |term, weight| {
            self.vectors.term_vector(term, weight)
        })
    }
}
