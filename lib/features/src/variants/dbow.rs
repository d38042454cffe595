use crate::document::Document;
use crate::feature::ContextFeature;
use crate::representation::{ContextBuilder, TermVectors};
use ctxsim_core::{dense_cosine_distance, ContextModel, Pooling, Result, Vector};
use std::sync::Arc;

/// Distributed bag-of-words similarity: both bags are pooled into one dense
/// vector from their weighted word vectors and compared by cosine distance
pub struct DbowContext {
    name: String,
    context: ContextBuilder,
    vectors: Arc<TermVectors>,
    pooling: Pooling,
}

impl DbowContext {
    pub fn new(context: Arc<dyn ContextModel>, vectors: Arc<TermVectors>, pooling: Pooling) -> Self {
        let context = ContextBuilder::new(context);
        let kind = match pooling {
            Pooling::Average => "avg_dbow",
            Pooling::Envelope => "max_dbow",
        };
        Self {
            name: format!("{}:{}", kind, context.tag()),
            context,
            vectors,
            pooling,
        }
    }

    pub fn average(context: Arc<dyn ContextModel>, vectors: Arc<TermVectors>) -> Self {
        Self::new(context, vectors, Pooling::Average)
    }

    pub fn envelope(context: Arc<dyn ContextModel>, vectors: Arc<TermVectors>) -> Self {
        Self::new(context, vectors, Pooling::Envelope)
    }

    #[inline]
    pub fn pooling(&self) -> Pooling {
        self.pooling
    }
}

impl ContextFeature for DbowContext {
    type Repr = Option<Vector>;

    fn name(&self) -> &str {
        &self.name
    }

    fn default_distance(&self) -> f32 {
        2.0
    }

    fn doc_repr(&self, doc: &Document) -> Result<Self::Repr> {
        let bow = self.context.tokens_to_bow_vector(doc.tokens())?;
        self.vectors.bow_to_dbow(&bow, self.pooling)
    }

    fn entity_repr(&self, entity: &str) -> Result<Self::Repr> {
        let bow = self.context.get_entity_context_vec(entity)?;
        self.vectors.bow_to_dbow(&bow, self.pooling)
    }

    fn distance(&self, query: &Self::Repr, entity: &Self::Repr) -> Result<f32> {
        match (query, entity) {
            (Some(q), Some(e)) => dense_cosine_distance(q, e),
            _ => Ok(self.default_distance()),
        }
    }
}
