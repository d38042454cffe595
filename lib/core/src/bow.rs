//! Sparse term-weight bags and the sparse cosine distance over them.

use crate::{Error, Result};
use ahash::AHashMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Raw term frequencies of a token multiset
pub type TermCounts = AHashMap<String, u32>;

/// Count lower-cased tokens
pub fn count_terms<I, S>(tokens: I) -> TermCounts
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = TermCounts::default();
    for token in tokens {
        *counts.entry(token.as_ref().to_lowercase()).or_insert(0) += 1;
    }
    counts
}

/// A sparse bag of weighted terms (TF-IDF style)
///
/// Only strictly positive weights are stored, so the term set is exactly the
/// support of the bag. Iteration is in lexicographic term order, which makes
/// every reduction over a bag deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, f32>", into = "BTreeMap<String, f32>")]
pub struct TermWeightMap {
    weights: BTreeMap<String, f32>,
}

impl TermWeightMap {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight of a term; non-positive weights remove it
    pub fn insert(&mut self, term: impl Into<String>, weight: f32) {
        let term = term.into();
        if weight > 0.0 {
            self.weights.insert(term, weight);
        } else {
            self.weights.remove(&term);
        }
    }

    #[inline]
    pub fn get(&self, term: &str) -> Option<f32> {
        self.weights.get(term).copied()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.weights.iter().map(|(t, w)| (t.as_str(), *w))
    }

    /// L2 norm of the weights
    pub fn norm(&self) -> f32 {
        self.weights.values().map(|w| w * w).sum::<f32>().sqrt()
    }

    /// Keep the `k` highest-weighted terms
    ///
    /// Ties are broken by iteration order, so the result is deterministic.
    #[must_use]
    pub fn top_k(&self, k: usize) -> TermWeightMap {
        if self.len() <= k {
            return self.clone();
        }
        let mut entries: Vec<(&String, f32)> = self.weights.iter().map(|(t, w)| (t, *w)).collect();
        entries.sort_by_key(|(_, w)| Reverse(OrderedFloat(*w)));
        entries.truncate(k);
        entries.into_iter().map(|(t, w)| (t.clone(), w)).collect()
    }
}

impl FromIterator<(String, f32)> for TermWeightMap {
    fn from_iter<I: IntoIterator<Item = (String, f32)>>(iter: I) -> Self {
        let mut bow = TermWeightMap::new();
        for (term, weight) in iter {
            bow.insert(term, weight);
        }
        bow
    }
}

impl From<BTreeMap<String, f32>> for TermWeightMap {
    fn from(map: BTreeMap<String, f32>) -> Self {
        map.into_iter().collect()
    }
}

impl From<TermWeightMap> for BTreeMap<String, f32> {
    fn from(bow: TermWeightMap) -> Self {
        bow.weights
    }
}

/// Cosine distance between two sparse bags: `1 - cos(a, b)`
///
/// Iterates the shorter bag. The dot product is accumulated in term order,
/// so the result is bit-identical whichever argument comes first.
pub fn sparse_cosine_distance(a: &TermWeightMap, b: &TermWeightMap) -> Result<f32> {
    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(Error::ZeroNorm);
    }

    let (short, long) = if b.len() < a.len() { (b, a) } else { (a, b) };
    let dot: f32 = short
        .iter()
        .map(|(term, weight)| weight * long.get(term).unwrap_or(0.0))
        .sum();

    Ok((1.0 - dot / (norm_a * norm_b)).clamp(0.0, 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(entries: &[(&str, f32)]) -> TermWeightMap {
        entries.iter().map(|(t, w)| (t.to_string(), *w)).collect()
    }

    #[test]
    fn test_count_terms_lowercases() {
        let counts = count_terms(["Paris", "paris", "France"]);
        assert_eq!(counts.get("paris"), Some(&2));
        assert_eq!(counts.get("france"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_zero_weights_are_dropped() {
        let mut b = bag(&[("a", 1.0), ("b", 0.0)]);
        assert_eq!(b.len(), 1);
        b.insert("a", 0.0);
        assert!(b.is_empty());
    }

    #[test]
    fn test_sparse_cosine_identical_and_disjoint() {
        let a = bag(&[("x", 1.0), ("y", 2.0)]);
        let scaled = bag(&[("x", 2.0), ("y", 4.0)]);
        let other = bag(&[("z", 3.0)]);

        assert!(sparse_cosine_distance(&a, &scaled).unwrap().abs() < 1e-6);
        assert!((sparse_cosine_distance(&a, &other).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sparse_cosine_commutative() {
        let a = bag(&[("the", 0.3), ("quick", 1.7), ("fox", 2.9), ("jumps", 0.11)]);
        let b = bag(&[("fox", 0.7), ("the", 0.05)]);
        assert_eq!(
            sparse_cosine_distance(&a, &b).unwrap().to_bits(),
            sparse_cosine_distance(&b, &a).unwrap().to_bits()
        );
    }

    #[test]
    fn test_sparse_cosine_empty_is_error() {
        let a = bag(&[("x", 1.0)]);
        assert!(matches!(
            sparse_cosine_distance(&a, &TermWeightMap::new()),
            Err(Error::ZeroNorm)
        ));
    }

    #[test]
    fn test_top_k_prefers_weight_then_order() {
        let b = bag(&[("d", 1.0), ("c", 3.0), ("b", 1.0), ("a", 2.0)]);
        let top = b.top_k(3);
        assert_eq!(top.len(), 3);
        assert!(top.get("c").is_some());
        assert!(top.get("a").is_some());
        // "b" sorts before "d" and wins the tie
        assert!(top.get("b").is_some());
        assert!(top.get("d").is_none());
    }
}
