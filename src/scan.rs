//! Brute-force nearest neighbor, the baseline a tree query must agree with.
use crate::error::{Error, Result};
use crate::vptree::{MetricItem, Nearest, Scalar};

/// Measure `target` against every item and return the first one at the
/// minimal distance.
pub fn linear_scan<'a, F, T>(items: &'a [T], target: &T) -> Result<Nearest<'a, F, T>>
    where F: Scalar, T: MetricItem<F> {

    let mut best: Option<(&T, F)> = None;
    for item in items {
        let d = target.distance(item)?;
        if d.is_nan() {
            return Err(Error::Incomparable);
        }
        match best {
            Some((_, tau)) if d >= tau => {}
            _ => best = Some((item, d)),
        }
    }
    best.map(|(item, distance)| Nearest { item, distance, visited: items.len() })
        .ok_or(Error::NotFound)
}
