//! Pooling strategies that reduce a stream of weighted word vectors to one
//! dense bag representation (DBoW).

use crate::{Error, Result, Vector};
use serde::{Deserialize, Serialize};

/// How word vectors are combined into a single vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pooling {
    /// Element-wise mean
    #[default]
    Average,
    /// Per dimension, the running max or running min, whichever has the
    /// larger magnitude
    Envelope,
}

impl Pooling {
    /// Combine a stream of word vectors
    ///
    /// Returns `None` for an empty stream. Lookup errors in the stream and
    /// dimension mismatches between its elements are propagated.
    pub fn combine<I>(self, wordreps: I) -> Result<Option<Vector>>
    where
        I: IntoIterator<Item = Result<Vector>>,
    {
        match self {
            Pooling::Average => average(wordreps),
            Pooling::Envelope => envelope(wordreps),
        }
    }
}

fn average<I>(wordreps: I) -> Result<Option<Vector>>
where
    I: IntoIterator<Item = Result<Vector>>,
{
    let mut iter = wordreps.into_iter();
    let mut sum = match iter.next() {
        Some(first) => first?,
        None => return Ok(None),
    };
    let mut count = 1.0f32;

    for wr in iter {
        let wr = wr?;
        check_dim(&sum, &wr)?;
        sum += &wr;
        count += 1.0;
    }

    Ok(Some(&sum * (1.0 / count)))
}

fn envelope<I>(wordreps: I) -> Result<Option<Vector>>
where
    I: IntoIterator<Item = Result<Vector>>,
{
    let mut iter = wordreps.into_iter();
    let mut max = match iter.next() {
        Some(first) => first?,
        None => return Ok(None),
    };
    let mut min = max.clone();

    for wr in iter {
        let wr = wr?;
        check_dim(&max, &wr)?;
        for ((hi, lo), x) in max
            .as_mut_slice()
            .iter_mut()
            .zip(min.as_mut_slice().iter_mut())
            .zip(wr.as_slice())
        {
            *hi = hi.max(*x);
            *lo = lo.min(*x);
        }
    }

    let pooled = max
        .as_slice()
        .iter()
        .zip(min.as_slice())
        .map(|(hi, lo)| if hi.abs() > lo.abs() { *hi } else { *lo })
        .collect();

    Ok(Some(Vector::new(pooled)))
}

#[inline]
fn check_dim(expected: &Vector, actual: &Vector) -> Result<()> {
    if expected.dim() != actual.dim() {
        return Err(Error::InvalidDimension {
            expected: expected.dim(),
            actual: actual.dim(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(vs: &[&[f32]]) -> Vec<Result<Vector>> {
        vs.iter().map(|v| Ok(Vector::from_slice(v))).collect()
    }

    #[test]
    fn test_average() {
        let pooled = Pooling::Average
            .combine(stream(&[&[1.0, 2.0], &[3.0, -2.0]]))
            .unwrap()
            .unwrap();
        assert_eq!(pooled.as_slice(), &[2.0, 0.0]);
    }

    #[test]
    fn test_envelope_keeps_larger_magnitude() {
        let pooled = Pooling::Envelope
            .combine(stream(&[&[3.0, -5.0], &[1.0, 2.0]]))
            .unwrap()
            .unwrap();
        assert_eq!(pooled.as_slice(), &[3.0, -5.0]);
    }

    #[test]
    fn test_envelope_single_vector_is_identity() {
        let pooled = Pooling::Envelope
            .combine(stream(&[&[0.5, -0.25]]))
            .unwrap()
            .unwrap();
        assert_eq!(pooled.as_slice(), &[0.5, -0.25]);
    }

    #[test]
    fn test_empty_stream() {
        assert!(Pooling::Average.combine(Vec::new()).unwrap().is_none());
        assert!(Pooling::Envelope.combine(Vec::new()).unwrap().is_none());
    }

    #[test]
    fn test_mismatched_stream_is_error() {
        let result = Pooling::Average.combine(stream(&[&[1.0, 2.0], &[1.0]]));
        assert!(matches!(result, Err(Error::InvalidDimension { .. })));
    }
}
