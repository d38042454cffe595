//! Feature configuration
//!
//! Describes which variant to build and the models it draws on. A config can
//! be written by hand as JSON or assembled from command-line options.

use crate::feature::Feature;
use crate::representation::TermVectors;
use crate::variants::{BowContext, CrpDbowContext, DbowContext, LlmDbowContext};
use ctxsim_core::{BestMatchMode, Error, Pooling, Result, DEFAULT_CLUSTER_LIMIT, DEFAULT_TOP_K};
use ctxsim_models::ModelStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Bow,
    AvgDbow,
    MaxDbow,
    LlmDbow,
    CrpDbow,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 5] = [
        FeatureKind::Bow,
        FeatureKind::AvgDbow,
        FeatureKind::MaxDbow,
        FeatureKind::LlmDbow,
        FeatureKind::CrpDbow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Bow => "bow",
            FeatureKind::AvgDbow => "avg_dbow",
            FeatureKind::MaxDbow => "max_dbow",
            FeatureKind::LlmDbow => "llm_dbow",
            FeatureKind::CrpDbow => "crp_dbow",
        }
    }

    /// Whether the variant needs a word-vector model
    pub fn is_dense(&self) -> bool {
        !matches!(self, FeatureKind::Bow)
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        FeatureKind::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| Error::InvalidConfig(format!("unknown feature: {}", s)))
    }
}

/// Configuration of one feature instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureConfig {
    pub kind: FeatureKind,

    /// Tag of the entity context model, resolved by the [`ModelStore`]
    pub context_model_tag: String,

    /// Word-vector model; required by every dense variant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wordvec_model_path: Option<PathBuf>,

    /// Terms kept per bag by the best-match variant
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    #[serde(default)]
    pub best_match: BestMatchMode,

    /// Clusters of the smaller set paired by the clustered variant
    #[serde(default = "default_cluster_limit")]
    pub cluster_limit: usize,

    /// Seed of the clustered variant's random source
    #[serde(default)]
    pub seed: u64,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_cluster_limit() -> usize {
    DEFAULT_CLUSTER_LIMIT
}

impl FeatureConfig {
    pub fn new(kind: FeatureKind, context_model_tag: impl Into<String>) -> Self {
        Self {
            kind,
            context_model_tag: context_model_tag.into(),
            wordvec_model_path: None,
            top_k: DEFAULT_TOP_K,
            best_match: BestMatchMode::default(),
            cluster_limit: DEFAULT_CLUSTER_LIMIT,
            seed: 0,
        }
    }

    pub fn with_wordvec_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.wordvec_model_path = Some(path.into());
        self
    }

    /// Read a list of configs from a JSON file
    pub fn load_all<P: AsRef<Path>>(path: P) -> Result<Vec<FeatureConfig>> {
        let data = std::fs::read(path)?;
        let configs: Vec<FeatureConfig> = serde_json::from_slice(&data)?;
        for config in &configs {
            config.validate()?;
        }
        Ok(configs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.context_model_tag.trim().is_empty() {
            return Err(Error::InvalidConfig("context model tag is empty".to_string()));
        }
        if self.kind.is_dense() && self.wordvec_model_path.is_none() {
            return Err(Error::InvalidConfig(format!(
                "{} requires a word-vector model path",
                self.kind
            )));
        }
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be positive".to_string()));
        }
        if self.cluster_limit == 0 {
            return Err(Error::InvalidConfig("cluster_limit must be positive".to_string()));
        }
        Ok(())
    }

    /// Build the feature, loading its models through `store`
    pub fn build(&self, store: &ModelStore) -> Result<Box<dyn Feature>> {
        build_all(std::slice::from_ref(self), store)?
            .pop()
            .ok_or_else(|| Error::InvalidConfig("no feature built".to_string()))
    }

    fn build_with(
        &self,
        store: &ModelStore,
        vectors: Option<Arc<TermVectors>>,
    ) -> Result<Box<dyn Feature>> {
        let context = store.context_model(&self.context_model_tag)?;
        let require_vectors = || {
            vectors.clone().ok_or_else(|| {
                Error::InvalidConfig(format!("{} requires a word-vector model path", self.kind))
            })
        };

        let feature: Box<dyn Feature> = match self.kind {
            FeatureKind::Bow => Box::new(BowContext::new(context)),
            FeatureKind::AvgDbow => Box::new(DbowContext::new(context, require_vectors()?, Pooling::Average)),
            FeatureKind::MaxDbow => Box::new(DbowContext::new(context, require_vectors()?, Pooling::Envelope)),
            FeatureKind::LlmDbow => Box::new(
                LlmDbowContext::new(context, require_vectors()?)
                    .with_top_k(self.top_k)
                    .with_mode(self.best_match),
            ),
            FeatureKind::CrpDbow => Box::new(
                CrpDbowContext::new(context, require_vectors()?, self.seed).with_limit(self.cluster_limit),
            ),
        };
        Ok(feature)
    }
}

/// Build several features; features on the same word-vector model share one
/// term-vector memo
pub fn build_all(configs: &[FeatureConfig], store: &ModelStore) -> Result<Vec<Box<dyn Feature>>> {
    let mut term_vectors: HashMap<PathBuf, Arc<TermVectors>> = HashMap::new();
    let mut features = Vec::with_capacity(configs.len());

    for config in configs {
        config.validate()?;
        let vectors = match &config.wordvec_model_path {
            Some(path) if config.kind.is_dense() => {
                let shared = match term_vectors.get(path) {
                    Some(tv) => tv.clone(),
                    None => {
                        let tv = Arc::new(TermVectors::new(store.word_vectors(path)?));
                        term_vectors.insert(path.clone(), tv.clone());
                        tv
                    }
                };
                Some(shared)
            }
            _ => None,
        };
        let feature = config.build_with(store, vectors)?;
        info!("Built feature {}", feature.name());
        features.push(feature);
    }

    Ok(features)
}
