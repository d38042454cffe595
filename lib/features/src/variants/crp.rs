use crate::document::Document;
use crate::feature::ContextFeature;
use crate::representation::{ContextBuilder, TermVectors};
use ahash::{AHashMap, RandomState};
use ctxsim_core::{
    cluster_set_distance, crp_cluster, ClusterSet, ContextModel, Result, TermWeightMap,
    DEFAULT_CLUSTER_LIMIT,
};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Fixed keys, so a (seed, input) pair always maps to the same stream
const SEED_KEYS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// What a cluster set is built for; part of its random stream's key
#[derive(Hash)]
enum ClusterKey<'a> {
    Document(&'a str),
    Entity(&'a str),
}

/// Similarity over word-vector clusters built with a Chinese Restaurant
/// Process
///
/// Every clustering draws from its own generator, seeded by the configured
/// seed and the document or entity id. Clusters therefore depend only on the
/// seed and the input, not on the order or thread in which documents are
/// scored. Entity cluster sets are memoized.
pub struct CrpDbowContext {
    name: String,
    context: ContextBuilder,
    vectors: Arc<TermVectors>,
    limit: usize,
    seed: u64,
    entity_clusters: Mutex<AHashMap<String, Arc<ClusterSet>>>,
}

impl CrpDbowContext {
    pub fn new(context: Arc<dyn ContextModel>, vectors: Arc<TermVectors>, seed: u64) -> Self {
        let context = ContextBuilder::new(context);
        Self {
            name: format!("crp_dbow:{}", context.tag()),
            context,
            vectors,
            limit: DEFAULT_CLUSTER_LIMIT,
            seed,
            entity_clusters: Mutex::new(AHashMap::new()),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn rng_for(&self, key: &ClusterKey<'_>) -> StdRng {
        let [k0, k1, k2, k3] = SEED_KEYS;
        let hash = RandomState::with_seeds(k0, k1, k2, k3).hash_one((self.seed, key));
        StdRng::seed_from_u64(hash)
    }

    fn bow_to_clusters(&self, bow: &TermWeightMap, key: ClusterKey<'_>) -> Result<ClusterSet> {
        if bow.is_empty() {
            return Ok(ClusterSet::new());
        }
        let mut rng = self.rng_for(&key);
        crp_cluster(self.vectors.iter_word_reps(bow), &mut rng)
    }
}

impl ContextFeature for CrpDbowContext {
    type Repr = Arc<ClusterSet>;

    fn name(&self) -> &str {
        &self.name
    }

    fn default_distance(&self) -> f32 {
        2.0
    }

    fn doc_repr(&self, doc: &Document) -> Result<Self::Repr> {
        let bow = self.context.tokens_to_bow_vector(doc.tokens())?;
        Ok(Arc::new(
            self.bow_to_clusters(&bow, ClusterKey::Document(&doc.id))?,
        ))
    }

    fn entity_repr(&self, entity: &str) -> Result<Self::Repr> {
        if let Some(clusters) = self.entity_clusters.lock().get(entity) {
            return Ok(clusters.clone());
        }

        let bow = self.context.get_entity_context_vec(entity)?;
        let clusters = Arc::new(self.bow_to_clusters(&bow, ClusterKey::Entity(entity))?);
        self.entity_clusters
            .lock()
            .insert(entity.to_string(), clusters.clone());
        Ok(clusters)
    }

    fn distance(&self, query: &Self::Repr, entity: &Self::Repr) -> Result<f32> {
        Ok(cluster_set_distance(query, entity, self.limit)?.unwrap_or(self.default_distance()))
    }
}
