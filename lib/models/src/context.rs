use ahash::AHashMap;
use ctxsim_core::{ContextModel, Result, TermCounts, TermWeightMap};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use crate::format::{read_snapshot, write_snapshot};

/// In-memory entity context model
///
/// Holds one IDF weight per vocabulary term and a precomputed TF-IDF bag per
/// entity. Bags handed out by [`ContextModel::get_entity_bow`] are shared and
/// never mutated.
#[derive(Debug, Clone)]
pub struct EntityContextModel {
    tag: String,
    idf: AHashMap<String, f32>,
    entities: AHashMap<String, Arc<TermWeightMap>>,
    empty: Arc<TermWeightMap>,
}

/// On-disk form of [`EntityContextModel`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ContextSnapshot {
    pub tag: String,
    pub idf: BTreeMap<String, f32>,
    pub entities: BTreeMap<String, TermWeightMap>,
}

impl EntityContextModel {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            idf: AHashMap::new(),
            entities: AHashMap::new(),
            empty: Arc::new(TermWeightMap::new()),
        }
    }

    /// Build a model from the context tokens of each entity
    ///
    /// IDF is smoothed, `ln((1 + n) / (1 + df)) + 1`, so every term seen in the
    /// corpus keeps a positive weight.
    pub fn from_corpus<I, T, S>(tag: impl Into<String>, corpus: I) -> Self
    where
        I: IntoIterator<Item = (String, T)>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut model = Self::new(tag);

        let counted: Vec<(String, TermCounts)> = corpus
            .into_iter()
            .map(|(entity, tokens)| (entity, ctxsim_core::count_terms(tokens)))
            .collect();

        let mut dfs: AHashMap<&str, u32> = AHashMap::new();
        for (_, counts) in &counted {
            let unique: HashSet<&str> = counts.keys().map(String::as_str).collect();
            for term in unique {
                *dfs.entry(term).or_insert(0) += 1;
            }
        }

        let n = counted.len() as f32;
        for (term, df) in dfs {
            let idf = ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0;
            model.idf.insert(term.to_string(), idf);
        }

        for (entity, counts) in &counted {
            let bow = model.weight(counts);
            model.entities.insert(entity.clone(), Arc::new(bow));
        }

        model
    }

    /// Register a precomputed entity bag
    pub fn insert_entity(&mut self, entity: impl Into<String>, bow: TermWeightMap) {
        self.entities.insert(entity.into(), Arc::new(bow));
    }

    pub fn set_idf(&mut self, term: impl Into<String>, idf: f32) {
        self.idf.insert(term.into(), idf);
    }

    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.idf.len()
    }

    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Load a snapshot; `.json` files are read as JSON, anything else as bincode
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let snapshot: ContextSnapshot = read_snapshot(path.as_ref())?;
        Ok(Self::from(snapshot))
    }

    /// Save a snapshot, format chosen by extension as in [`Self::load`]
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_snapshot(path.as_ref(), &self.snapshot())
    }

    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            tag: self.tag.clone(),
            idf: self.idf.iter().map(|(t, w)| (t.clone(), *w)).collect(),
            entities: self
                .entities
                .iter()
                .map(|(id, bow)| (id.clone(), bow.as_ref().clone()))
                .collect(),
        }
    }

    fn weight(&self, counts: &TermCounts) -> TermWeightMap {
        counts
            .iter()
            .filter_map(|(term, &count)| {
                self.idf
                    .get(term)
                    .map(|idf| (term.clone(), count as f32 * idf))
            })
            .collect()
    }
}

impl From<ContextSnapshot> for EntityContextModel {
    fn from(snapshot: ContextSnapshot) -> Self {
        let mut model = Self::new(snapshot.tag);
        model.idf = snapshot.idf.into_iter().collect();
        model.entities = snapshot
            .entities
            .into_iter()
            .map(|(id, bow)| (id, Arc::new(bow)))
            .collect();
        model
    }
}

impl ContextModel for EntityContextModel {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn get_bow(&self, counts: &TermCounts) -> Result<TermWeightMap> {
        Ok(self.weight(counts))
    }

    fn get_entity_bow(&self, entity: &str) -> Result<Arc<TermWeightMap>> {
        Ok(self
            .entities
            .get(entity)
            .cloned()
            .unwrap_or_else(|| self.empty.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctxsim_core::count_terms;

    fn corpus() -> EntityContextModel {
        EntityContextModel::from_corpus(
            "test",
            vec![
                ("Paris".to_string(), vec!["paris", "capital", "france", "seine"]),
                ("Texas".to_string(), vec!["texas", "austin", "state", "capital"]),
            ],
        )
    }

    #[test]
    fn test_shared_terms_weigh_less() {
        let model = corpus();
        let paris = model.get_entity_bow("Paris").unwrap();
        assert!(paris.get("capital").unwrap() < paris.get("france").unwrap());
        assert_eq!(model.vocab_size(), 7);
    }

    #[test]
    fn test_get_bow_drops_unknown_terms() {
        let model = corpus();
        let bow = model.get_bow(&count_terms(["Paris", "paris", "unseen"])).unwrap();
        assert_eq!(bow.len(), 1);
        let paris_idf = model.get_entity_bow("Paris").unwrap().get("paris").unwrap();
        assert!((bow.get("paris").unwrap() - 2.0 * paris_idf).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_entity_is_empty() {
        assert!(corpus().get_entity_bow("Nowhere").unwrap().is_empty());
    }

    #[test]
    fn test_json_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wiki.json");
        let model = corpus();
        model.save(&path).unwrap();

        let loaded = EntityContextModel::load(&path).unwrap();
        assert_eq!(loaded.tag(), "test");
        assert_eq!(loaded.entity_count(), 2);
        assert_eq!(
            loaded.get_entity_bow("Texas").unwrap(),
            model.get_entity_bow("Texas").unwrap()
        );
    }

    #[test]
    fn test_bincode_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wiki.bin");
        corpus().save(&path).unwrap();

        let loaded = EntityContextModel::load(&path).unwrap();
        assert_eq!(loaded.vocab_size(), 7);
    }
}
