use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ops::{AddAssign, Mul};

/// A dense vector of floating point numbers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim],
        }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        norm(&self.data)
    }

    /// Dot product; fails on a dimension mismatch
    #[inline]
    pub fn dot(&self, other: &Vector) -> Result<f32> {
        self.check_dim(other)?;
        Ok(dot_product(&self.data, &other.data))
    }

    /// Compute cosine similarity with another vector
    ///
    /// Zero-norm inputs are an error rather than a silent 0.0.
    #[inline]
    pub fn cosine_similarity(&self, other: &Vector) -> Result<f32> {
        self.check_dim(other)?;

        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a == 0.0 || norm_b == 0.0 {
            return Err(Error::ZeroNorm);
        }

        Ok(dot_product(&self.data, &other.data) / (norm_a * norm_b))
    }

    /// Normalize the vector to unit length
    #[inline]
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > f32::EPSILON {
            let inv_norm = 1.0 / norm;
            for x in &mut self.data {
                *x *= inv_norm;
            }
        }
    }

    /// Get normalized copy
    #[inline]
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }

    #[inline]
    fn check_dim(&self, other: &Vector) -> Result<()> {
        if self.dim() != other.dim() {
            return Err(Error::InvalidDimension {
                expected: self.dim(),
                actual: other.dim(),
            });
        }
        Ok(())
    }
}

impl AddAssign<&Vector> for Vector {
    fn add_assign(&mut self, other: &Vector) {
        assert_eq!(self.dim(), other.dim());
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += b;
        }
    }
}

impl Mul<f32> for &Vector {
    type Output = Vector;

    fn mul(self, scalar: f32) -> Vector {
        Vector::new(self.data.iter().map(|x| x * scalar).collect())
    }
}

/// Cosine distance between two dense vectors: `1 - cos(a, b)`
///
/// Callers guard against empty representations; a zero-norm input or a
/// dimension mismatch is reported as an error.
#[inline]
pub fn dense_cosine_distance(a: &Vector, b: &Vector) -> Result<f32> {
    Ok(1.0 - a.cosine_similarity(b)?)
}

#[inline]
pub(crate) fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[inline]
pub(crate) fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let v1 = Vector::new(vec![1.0, 0.0]);
        let v2 = Vector::new(vec![1.0, 0.0]);
        assert!((v1.cosine_similarity(&v2).unwrap() - 1.0).abs() < 1e-6);

        let v3 = Vector::new(vec![1.0, 0.0]);
        let v4 = Vector::new(vec![0.0, 1.0]);
        assert!((v3.cosine_similarity(&v4).unwrap() - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_dense_cosine_distance_range() {
        let v = Vector::new(vec![1.0, 2.0]);
        let opposite = &v * -3.0;
        assert!(dense_cosine_distance(&v, &v).unwrap().abs() < 1e-6);
        assert!((dense_cosine_distance(&v, &opposite).unwrap() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_norm_is_error() {
        let v = Vector::new(vec![1.0, 2.0]);
        assert!(matches!(
            dense_cosine_distance(&v, &Vector::zeros(2)),
            Err(Error::ZeroNorm)
        ));
    }

    #[test]
    fn test_dimension_mismatch_is_error() {
        let a = Vector::new(vec![1.0, 2.0]);
        let b = Vector::new(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            dense_cosine_distance(&a, &b),
            Err(Error::InvalidDimension { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_add_assign_and_scale() {
        let mut acc = Vector::zeros(2);
        acc += &Vector::new(vec![1.0, -1.0]);
        acc += &(&Vector::new(vec![0.5, 0.5]) * 2.0);
        assert_eq!(acc.as_slice(), &[2.0, 0.0]);
    }
}
