use crate::{EntityContextModel, WordVectors};
use ctxsim_core::{Error, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Resolves model tags and paths to loaded models
///
/// Context models live in `model_dir` as `<tag>.bin` (bincode) or
/// `<tag>.json`. Every model is loaded once and shared between features.
pub struct ModelStore {
    model_dir: PathBuf,
    contexts: Arc<RwLock<HashMap<String, Arc<EntityContextModel>>>>,
    word_vectors: Arc<RwLock<HashMap<PathBuf, Arc<WordVectors>>>>,
}

impl ModelStore {
    pub fn new<P: AsRef<Path>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.as_ref().to_path_buf(),
            contexts: Arc::new(RwLock::new(HashMap::new())),
            word_vectors: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// Register an already built context model under its tag
    pub fn insert_context_model(&self, tag: impl Into<String>, model: EntityContextModel) {
        self.contexts.write().insert(tag.into(), Arc::new(model));
    }

    pub fn insert_word_vectors(&self, path: impl Into<PathBuf>, model: WordVectors) {
        self.word_vectors.write().insert(path.into(), Arc::new(model));
    }

    pub fn context_model(&self, tag: &str) -> Result<Arc<EntityContextModel>> {
        if let Some(model) = self.contexts.read().get(tag) {
            debug!("Context model {} already loaded", tag);
            return Ok(model.clone());
        }

        let path = ["bin", "json"]
            .iter()
            .map(|ext| self.model_dir.join(format!("{}.{}", tag, ext)))
            .find(|p| p.exists())
            .ok_or_else(|| {
                Error::ModelNotFound(format!("context model {} in {:?}", tag, self.model_dir))
            })?;

        let model = Arc::new(EntityContextModel::load(&path)?);
        info!(
            "Loaded context model {} ({} terms, {} entities) from {:?}",
            tag,
            model.vocab_size(),
            model.entity_count(),
            path
        );

        self.contexts.write().insert(tag.to_string(), model.clone());
        Ok(model)
    }

    /// Relative paths resolve against the model directory
    pub fn word_vectors<P: AsRef<Path>>(&self, path: P) -> Result<Arc<WordVectors>> {
        let path = path.as_ref();
        if let Some(model) = self.word_vectors.read().get(path) {
            return Ok(model.clone());
        }

        let resolved = if path.is_relative() && !path.exists() {
            self.model_dir.join(path)
        } else {
            path.to_path_buf()
        };
        if !resolved.exists() {
            return Err(Error::ModelNotFound(format!("word vectors {:?}", resolved)));
        }

        let model = Arc::new(WordVectors::read(&resolved)?);
        self.word_vectors.write().insert(path.to_path_buf(), model.clone());
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctxsim_core::ContextModel;

    #[test]
    fn test_context_model_by_tag() {
        let dir = tempfile::tempdir().unwrap();
        let model = EntityContextModel::from_corpus(
            "wiki",
            vec![("Paris".to_string(), vec!["paris", "france"])],
        );
        model.save(dir.path().join("wiki.json")).unwrap();

        let store = ModelStore::new(dir.path());
        let loaded = store.context_model("wiki").unwrap();
        assert_eq!(loaded.tag(), "wiki");
        assert!(Arc::ptr_eq(&loaded, &store.context_model("wiki").unwrap()));
    }

    #[test]
    fn test_missing_models() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());
        assert!(matches!(store.context_model("nope"), Err(Error::ModelNotFound(_))));
        assert!(matches!(store.word_vectors("nope.txt"), Err(Error::ModelNotFound(_))));
    }

    #[test]
    fn test_word_vectors_resolve_in_model_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vec.txt"), "1 2\nparis 1 0\n").unwrap();

        let store = ModelStore::new(dir.path());
        let wv = store.word_vectors("vec.txt").unwrap();
        assert_eq!(wv.len(), 1);
    }
}
