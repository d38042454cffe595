//! Online clustering of word vectors with a Chinese Restaurant Process style
//! acceptance rule, and a greedy pairing distance between cluster sets.

use crate::{Result, Vector};
use rand::Rng;
use smallvec::SmallVec;

/// Ordered cluster centroids, unit length once clustering finishes
pub type ClusterSet = Vec<Vector>;

/// Maximum number of clusters from the smaller set that take part in pairing
pub const DEFAULT_CLUSTER_LIMIT: usize = 3;

/// Single-pass clustering of a word-vector stream
///
/// With `n` open clusters a vector joins its most similar cluster when the
/// similarity beats `1 / (1 + n)`, or when a uniform draw does; otherwise it
/// opens a new cluster. Centroids accumulate raw sums and are normalized at
/// the end. The result depends on stream order and on `rng`.
pub fn crp_cluster<I, R>(wordreps: I, rng: &mut R) -> Result<ClusterSet>
where
    I: IntoIterator<Item = Result<Vector>>,
    R: Rng,
{
    let mut clusters: ClusterSet = Vec::new();

    for v in wordreps {
        let v = v?;
        if clusters.is_empty() {
            clusters.push(v);
            continue;
        }

        let direction = v.normalized();
        let mut best: Option<(usize, f32)> = None;
        for (i, c) in clusters.iter().enumerate() {
            let sim = c.normalized().dot(&direction)?;
            if best.map_or(true, |(_, max_sim)| sim > max_sim) {
                best = Some((i, sim));
            }
        }

        let threshold = 1.0 / (1.0 + clusters.len() as f32);
        if let Some((i, max_sim)) = best {
            if max_sim > threshold || rng.random::<f32>() > threshold {
                clusters[i] += &v;
                continue;
            }
        }
        clusters.push(v);
    }

    for c in &mut clusters {
        c.normalize();
    }

    Ok(clusters)
}

/// Greedy best-match distance between two cluster sets: `1 - mean(best dot)`
///
/// The smaller set (capped at `limit` clusters, in creation order) is paired
/// against the larger one; each pairing removes the matched cluster from the
/// larger set. Returns `None` when either set is empty.
pub fn cluster_set_distance(
    query: &[Vector],
    entity: &[Vector],
    limit: usize,
) -> Result<Option<f32>> {
    if query.is_empty() || entity.is_empty() || limit == 0 {
        return Ok(None);
    }

    let (a, b) = if entity.len() < query.len() {
        (entity, query)
    } else {
        (query, entity)
    };
    let a = &a[..a.len().min(limit)];

    let mut remaining: Vec<&Vector> = b.iter().collect();
    let mut sims: SmallVec<[f32; DEFAULT_CLUSTER_LIMIT]> = SmallVec::new();

    for ca in a {
        let mut best: Option<(usize, f32)> = None;
        for (i, cb) in remaining.iter().enumerate() {
            let sim = ca.dot(cb)?;
            if best.map_or(true, |(_, max_sim)| sim > max_sim) {
                best = Some((i, sim));
            }
        }
        if let Some((i, sim)) = best {
            sims.push(sim);
            remaining.remove(i);
        }
    }

    let mean = sims.iter().sum::<f32>() / sims.len() as f32;
    Ok(Some(1.0 - mean))
}
