//! Fixed-dimension points under the Euclidean metric.
use std::fmt;

use crate::error::{Error, Result};
use crate::vptree::{MetricItem, Scalar};

/// An immutable point in `F^n`.
#[derive(Debug, Clone, PartialEq)]
pub struct Point<F = f32> {
    coords: Box<[F]>,
}

impl<F: Scalar> Point<F> {
    pub fn new(coords: Vec<F>) -> Self {
        Point { coords: coords.into_boxed_slice() }
    }

    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    pub fn coords(&self) -> &[F] {
        &self.coords
    }

    /// Euclidean distance. Fails with `DimensionMismatch` if the two points
    /// do not share a dimension.
    pub fn euclidean(&self, other: &Self) -> Result<F> {
        if self.dim() != other.dim() {
            return Err(Error::DimensionMismatch { expected: self.dim(), got: other.dim() });
        }
        let sq = self.coords.iter().zip(other.coords.iter())
            .fold(F::zero(), |acc, (&a, &b)| {
                let d = a - b;
                acc + d * d
            });
        Ok(sq.sqrt())
    }
}

impl<F: Scalar> MetricItem<F> for Point<F> {
    fn distance(&self, other: &Self) -> Result<F> {
        self.euclidean(other)
    }
}

impl<F: Scalar> From<Vec<F>> for Point<F> {
    fn from(coords: Vec<F>) -> Self {
        Point::new(coords)
    }
}

impl<F: Scalar, const N: usize> From<[F; N]> for Point<F> {
    fn from(coords: [F; N]) -> Self {
        Point::new(coords.to_vec())
    }
}

impl<F: Scalar> fmt::Display for Point<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

/// Turn rows of coordinates into points. Every row must have as many
/// components as the first one.
pub fn points_from_rows<F, I>(rows: I) -> Result<Vec<Point<F>>>
    where F: Scalar, I: IntoIterator<Item = Vec<F>> {

    let mut expected = None;
    rows.into_iter().enumerate().map(|(row, coords)| {
        let dim = *expected.get_or_insert(coords.len());
        if coords.len() != dim {
            return Err(Error::RaggedRow { row, expected: dim, got: coords.len() });
        }
        Ok(Point::new(coords))
    }).collect()
}
