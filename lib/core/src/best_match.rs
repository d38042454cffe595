//! Lexical-level best-match over weighted word vectors
//!
//! Each bag is truncated to its highest-weighted terms and expanded into word
//! vectors. Every vector of the shorter list is paired with its most similar
//! vector in the longer list, and the mean of those best similarities is
//! turned into a distance.

use crate::bow::{sparse_cosine_distance, TermWeightMap};
use crate::{Error, Result, Vector};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of terms kept per bag before matching
pub const DEFAULT_TOP_K: usize = 100;

/// Which similarity is used inside the pairing loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BestMatchMode {
    /// Cosine similarity between the paired word vectors
    #[default]
    WordVectors,
    /// Every pair scores the sparse cosine distance between the two truncated
    /// bags. Kept for score parity with models trained on that behaviour.
    Literal,
}

impl FromStr for BestMatchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "word_vectors" => Ok(BestMatchMode::WordVectors),
            "literal" => Ok(BestMatchMode::Literal),
            _ => Err(Error::InvalidConfig(format!("unknown best-match mode: {}", s))),
        }
    }
}

/// Best-match distance between a query bag and an entity bag
///
/// `lookup` maps a `(term, weight)` pair to its weighted word vector. An empty
/// bag on either side yields `1.0` without any lookups.
pub fn lexical_best_match_distance<F>(
    query: &TermWeightMap,
    entity: &TermWeightMap,
    top_k: usize,
    mode: BestMatchMode,
    mut lookup: F,
) -> Result<f32>
where
    F: FnMut(&str, f32) -> Result<Vector>,
{
    if query.is_empty() || entity.is_empty() {
        return Ok(1.0);
    }

    let query = query.top_k(top_k);
    let entity = entity.top_k(top_k);

    if mode == BestMatchMode::Literal {
        let sim = sparse_cosine_distance(&query, &entity)?;
        return Ok(1.0 - sim.max(0.0));
    }

    let query_wrs = expand(&query, &mut lookup)?;
    let entity_wrs = expand(&entity, &mut lookup)?;

    let (a, b) = if entity_wrs.len() >= query_wrs.len() {
        (&entity_wrs, &query_wrs)
    } else {
        (&query_wrs, &entity_wrs)
    };

    Ok(1.0 - best_match_similarity(a, b)?)
}

/// Mean over `b` of each element's best cosine similarity against `a`
///
/// Similarities below zero count as zero.
pub fn best_match_similarity(a: &[Vector], b: &[Vector]) -> Result<f32> {
    if b.is_empty() {
        return Ok(0.0);
    }

    let mut total = 0.0f32;
    for wb in b {
        let mut max_sim = 0.0f32;
        for wa in a {
            let sim = wb.cosine_similarity(wa)?;
            if sim > max_sim {
                max_sim = sim;
            }
        }
        total += max_sim;
    }

    Ok(total / b.len() as f32)
}

fn expand<F>(bow: &TermWeightMap, lookup: &mut F) -> Result<Vec<Vector>>
where
    F: FnMut(&str, f32) -> Result<Vector>,
{
    bow.iter().map(|(term, weight)| lookup(term, weight)).collect()
}
