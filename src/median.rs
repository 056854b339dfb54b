//! Order-statistic selection.
//!
//! [`select_by_key`] is the deterministic median-of-medians (BFPRT)
//! algorithm and runs in worst-case linear time. [`HybridSelector`] sorts
//! small inputs directly and only falls back to BFPRT above a size
//! threshold.
use std::cmp::Ordering;

use tracing::trace;

use crate::error::{Error, Result};

/// Size of the groups whose medians feed the pivot choice.
pub const GROUP_SIZE: usize = 5;

/// Input size at which [`HybridSelector`] stops sorting and switches to
/// median-of-medians. Re-measure with `cargo bench` on the target machine.
pub const DEFAULT_SORT_THRESHOLD: usize = 1 << 14;

/// Position of the lower median in a sorted sequence of `len` items.
///
/// ```
/// use vantage::median::lower_median;
/// assert_eq!(lower_median(1), 0);
/// assert_eq!(lower_median(2), 0);
/// assert_eq!(lower_median(4), 1);
/// assert_eq!(lower_median(5), 2);
/// assert_eq!(lower_median(6), 2);
/// ```
pub fn lower_median(len: usize) -> usize {
    len.saturating_sub(1) / 2
}

fn compare<K: PartialOrd>(a: &K, b: &K) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

fn check_input<T, K, F>(items: &[T], index: usize, key: &F) -> Result<()>
    where K: PartialOrd, F: Fn(&T) -> K {

    if items.is_empty() {
        return Err(Error::EmptyInput);
    }
    if index >= items.len() {
        return Err(Error::IndexOutOfRange { index, len: items.len() });
    }
    let comparable = items.iter().all(|x| {
        let k = key(x);
        k.partial_cmp(&k).is_some()
    });
    if comparable { Ok(()) } else { Err(Error::Incomparable) }
}

/// Return the item whose key would sit at `index` if `items` were sorted
/// ascending by key.
///
/// Fails with `EmptyInput`, `IndexOutOfRange`, or `Incomparable` when a key
/// is unordered against itself.
pub fn select_by_key<T, K, F>(items: Vec<T>, index: usize, key: F) -> Result<T>
    where K: PartialOrd + Clone, F: Fn(&T) -> K {

    check_input(&items, index, &key)?;
    bfprt(items, index, &key)
}

/// [`select_by_key`] for items that are their own key.
pub fn select<T: PartialOrd + Clone>(items: Vec<T>, index: usize) -> Result<T> {
    select_by_key(items, index, T::clone)
}

/// Select over `(key, payload)` pairs and return the payload.
pub fn select_pair<K: PartialOrd + Clone, P>(items: Vec<(K, P)>, index: usize) -> Result<P> {
    select_by_key(items, index, |p: &(K, P)| p.0.clone()).map(|p| p.1)
}

/// The lower median of `items`.
pub fn select_median<T: PartialOrd + Clone>(items: Vec<T>) -> Result<T> {
    let index = lower_median(items.len());
    select(items, index)
}

/// Median of already-validated keys, used as the BFPRT pivot.
fn median_key<K: PartialOrd + Clone>(keys: Vec<K>) -> Result<K> {
    let index = lower_median(keys.len());
    bfprt(keys, index, &K::clone)
}

fn bfprt<T, K, F>(mut items: Vec<T>, mut index: usize, key: &F) -> Result<T>
    where K: PartialOrd + Clone, F: Fn(&T) -> K {

    loop {
        let n = items.len();
        if n == 1 {
            return items.pop().ok_or(Error::EmptyInput);
        }

        let mut medians = Vec::with_capacity(n.div_ceil(GROUP_SIZE));
        for group in items.chunks_mut(GROUP_SIZE) {
            group.sort_unstable_by(|a, b| compare(&key(a), &key(b)));
            medians.push(key(&group[lower_median(group.len())]));
        }
        let pivot_key = median_key(medians)?;

        // Ties with the pivot occupy ranks left.len() .. left.len() + ties,
        // so a run of equal keys is settled in one pass.
        let mut left = Vec::with_capacity(n / 2);
        let mut right = Vec::with_capacity(n / 2);
        let mut ties = Vec::new();
        for item in items {
            match compare(&key(&item), &pivot_key) {
                Ordering::Less => left.push(item),
                Ordering::Greater => right.push(item),
                Ordering::Equal => ties.push(item),
            }
        }
        if ties.is_empty() {
            return Err(Error::InvariantViolation(
                "median of medians missing from its input".into()));
        }

        if index < left.len() {
            items = left;
        } else if index < left.len() + ties.len() {
            return Ok(ties.swap_remove(index - left.len()));
        } else {
            index -= left.len() + ties.len();
            items = right;
        }
    }
}

/// Median selection that sorts below `sort_threshold` items and uses
/// median-of-medians at or above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HybridSelector {
    sort_threshold: usize,
}

impl Default for HybridSelector {
    fn default() -> Self {
        HybridSelector { sort_threshold: DEFAULT_SORT_THRESHOLD }
    }
}

impl HybridSelector {
    pub fn new(sort_threshold: usize) -> Self {
        HybridSelector { sort_threshold }
    }

    pub fn sort_threshold(&self) -> usize {
        self.sort_threshold
    }

    /// Lower median of `items` by `key`.
    pub fn select_median_by_key<T, K, F>(&self, mut items: Vec<T>, key: F) -> Result<T>
        where K: PartialOrd + Clone, F: Fn(&T) -> K {

        let index = lower_median(items.len());
        if items.len() >= self.sort_threshold {
            trace!(len = items.len(), "median via median-of-medians");
            return select_by_key(items, index, key);
        }

        check_input(&items, index, &key)?;
        items.sort_unstable_by(|a, b| compare(&key(a), &key(b)));
        Ok(items.swap_remove(index))
    }

    pub fn select_median<T: PartialOrd + Clone>(&self, items: Vec<T>) -> Result<T> {
        self.select_median_by_key(items, T::clone)
    }
}

/// Lower median with the default [`HybridSelector`].
pub fn hybrid_select_median<T: PartialOrd + Clone>(items: Vec<T>) -> Result<T> {
    HybridSelector::default().select_median(items)
}
