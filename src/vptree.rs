//! Vantage-Point Trees are a data structure for fast
//! nearest-neighbor searches in metric spaces.
use std::collections::VecDeque;
use std::fmt::{self, Debug, Display};

pub use num::Float;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::median::{HybridSelector, DEFAULT_SORT_THRESHOLD};

pub trait Scalar: Float + Debug + Display {}
impl<T: Float + Debug + Display> Scalar for T {}

/// A metric: symmetric, zero on identical items, and satisfying the
/// triangle inequality. Pruning in [`VPTree::nearest_neighbor`] is only
/// correct for true metrics.
pub trait MetricItem<F: Scalar> {
    fn distance(&self, other: &Self) -> Result<F>;
}

/// Which side of its parent's radius a node hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Distance to the parent vantage is strictly below `mu`.
    Inner,
    /// Distance to the parent vantage is at least `mu`.
    Outer,
}

struct VPNode<F, T> {
    vantage: T,
    /// `None` marks a leaf.
    mu: Option<F>,
    inner: Option<usize>,
    outer: Option<usize>,
}

/// Items still to be placed, and where the resulting node attaches.
struct Pending<T> {
    items: Vec<T>,
    parent: Option<(usize, Branch)>,
    depth: usize,
}

/// Configuration for building a [`VPTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VPTreeBuilder {
    seed: Option<u64>,
    sort_threshold: usize,
}

impl Default for VPTreeBuilder {
    fn default() -> Self {
        VPTreeBuilder { seed: None, sort_threshold: DEFAULT_SORT_THRESHOLD }
    }
}

impl VPTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the vantage choice so construction is reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Input size at or above which the radius is found with
    /// median-of-medians instead of sorting.
    pub fn sort_threshold(mut self, sort_threshold: usize) -> Self {
        self.sort_threshold = sort_threshold;
        self
    }

    /// Build a tree that owns `items`.
    pub fn build<F: Scalar, T: MetricItem<F>>(self, items: Vec<T>) -> Result<VPTree<F, T>> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let selector = HybridSelector::new(self.sort_threshold);

        let total = items.len();
        let mut nodes: Vec<VPNode<F, T>> = Vec::with_capacity(total);
        let mut depth = 0;
        let mut stack = Vec::new();
        if !items.is_empty() {
            stack.push(Pending { items, parent: None, depth: 1 });
        }

        while let Some(Pending { mut items, parent, depth: d }) = stack.pop() {
            depth = depth.max(d);
            let n = items.len();
            let vantage = items.swap_remove(rng.gen_range(0..n));

            let mut node = VPNode { vantage, mu: None, inner: None, outer: None };
            let mut children = None;
            let mut chain = Vec::new();
            if !items.is_empty() {
                let distances = items.iter()
                    .map(|x| node.vantage.distance(x))
                    .collect::<Result<Vec<F>>>()?;
                if distances.iter().all(|&x| x == F::zero()) {
                    // Everything left coincides with the vantage, and by the
                    // triangle inequality with each other: a radius-0 chain.
                    trace!(len = items.len(), "coincident items, building chain");
                    node.mu = Some(F::zero());
                    chain = items;
                } else {
                    let mu = split_radius(&selector, &distances)?;

                    let mut inner = Vec::with_capacity(n / 2);
                    let mut outer = Vec::with_capacity(n / 2);
                    for (item, d) in items.into_iter().zip(distances) {
                        if d < mu { inner.push(item) } else { outer.push(item) }
                    }
                    if inner.len() >= n || outer.len() >= n {
                        return Err(Error::InvariantViolation(format!(
                            "partition of {} items produced sides of {} and {}",
                            n, inner.len(), outer.len())));
                    }
                    node.mu = Some(mu);
                    children = Some((inner, outer));
                }
            }

            let index = nodes.len();
            nodes.push(node);
            if let Some((p, branch)) = parent {
                match branch {
                    Branch::Inner => nodes[p].inner = Some(index),
                    Branch::Outer => nodes[p].outer = Some(index),
                }
            }

            let links = chain.len();
            let mut prev = index;
            for (k, item) in chain.into_iter().enumerate() {
                let next = nodes.len();
                nodes[prev].outer = Some(next);
                let mu = if k + 1 < links { Some(F::zero()) } else { None };
                nodes.push(VPNode { vantage: item, mu, inner: None, outer: None });
                prev = next;
            }
            depth = depth.max(d + links);

            // Outer goes on the stack first so inner subtrees are built first.
            if let Some((inner, outer)) = children {
                for (items, branch) in [(outer, Branch::Outer), (inner, Branch::Inner)] {
                    if !items.is_empty() {
                        stack.push(Pending { items, parent: Some((index, branch)), depth: d + 1 });
                    }
                }
            }
        }

        if nodes.len() != total {
            return Err(Error::InvariantViolation(format!(
                "built {} nodes from {} items", nodes.len(), total)));
        }
        debug!(points = total, depth, seeded = self.seed.is_some(), "built vantage-point tree");
        Ok(VPTree { nodes, depth })
    }
}

/// Median distance, raised to the next larger distance when every
/// distance ties at or above the median and the inner side would be empty.
fn split_radius<F: Scalar>(selector: &HybridSelector, distances: &[F]) -> Result<F> {
    let mu = selector.select_median(distances.to_vec())?;
    if distances.iter().any(|&d| d < mu) {
        return Ok(mu);
    }
    let next = distances.iter().copied()
        .filter(|&d| d > mu)
        .fold(None, |acc: Option<F>, d| Some(acc.map_or(d, |a| a.min(d))));
    if let Some(next) = next {
        trace!(median = %mu, radius = %next, "empty inner side, raising radius");
    }
    Ok(next.unwrap_or(mu))
}

/// The result of a nearest-neighbor search.
#[derive(Debug, Clone)]
pub struct Nearest<'a, F, T> {
    pub item: &'a T,
    pub distance: F,
    /// Number of items the search measured against.
    pub visited: usize,
}

/// One node as seen by [`VPTree::depth_first`].
#[derive(Debug, Clone)]
pub struct NodeView<'a, F, T> {
    /// 0 at the root.
    pub depth: usize,
    /// `None` for the root.
    pub branch: Option<Branch>,
    pub vantage: &'a T,
    /// `None` for a leaf.
    pub mu: Option<F>,
    pub has_inner: bool,
    pub has_outer: bool,
}

/// Pre-order walk over the nodes of a tree, inner before outer.
pub struct DepthFirst<'a, F, T> {
    nodes: &'a [VPNode<F, T>],
    stack: Vec<(usize, usize, Option<Branch>)>,
}

impl<'a, F: Scalar, T> Iterator for DepthFirst<'a, F, T> {
    type Item = NodeView<'a, F, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let (i, depth, branch) = self.stack.pop()?;
        let node = &self.nodes[i];
        if let Some(outer) = node.outer {
            self.stack.push((outer, depth + 1, Some(Branch::Outer)));
        }
        if let Some(inner) = node.inner {
            self.stack.push((inner, depth + 1, Some(Branch::Inner)));
        }
        Some(NodeView {
            depth,
            branch,
            vantage: &node.vantage,
            mu: node.mu,
            has_inner: node.inner.is_some(),
            has_outer: node.outer.is_some(),
        })
    }
}

/// A static vantage-point tree. The tree owns its items; the root is
/// `nodes[0]`.
pub struct VPTree<F: Scalar, T: MetricItem<F>> {
    nodes: Vec<VPNode<F, T>>,
    depth: usize,
}

impl<F: Scalar, T: MetricItem<F>> VPTree<F, T> {
    /// Construct a new vantage point tree from a set of elements, with an
    /// entropy-seeded vantage choice.
    pub fn new(items: Vec<T>) -> Result<VPTree<F, T>> {
        VPTreeBuilder::new().build(items)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels, 0 for an empty tree.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Find the nearest neighbor of `target`.
    ///
    /// Nodes are searched breadth-first; among equally near items the one
    /// reached first wins.
    pub fn nearest_neighbor(&self, target: &T) -> Result<Nearest<'_, F, T>> {
        if self.nodes.is_empty() {
            return Err(Error::NotFound);
        }

        let mut queue = VecDeque::from([0]);
        let mut tau = F::infinity();
        let mut nearest = None;
        let mut visited = 0;

        while let Some(i) = queue.pop_front() {
            let node = &self.nodes[i];
            visited += 1;
            let d = target.distance(&node.vantage)?;
            if d.is_nan() {
                return Err(Error::Incomparable);
            }
            if nearest.is_none() || d < tau {
                tau = d;
                nearest = Some(&node.vantage);
            }

            if let Some(mu) = node.mu {
                if let Some(inner) = node.inner {
                    if tau > d - mu {
                        queue.push_back(inner);
                    }
                }
                if let Some(outer) = node.outer {
                    if tau >= mu - d {
                        queue.push_back(outer);
                    }
                }
            }
        }

        nearest.map(|item| Nearest { item, distance: tau, visited }).ok_or(Error::NotFound)
    }

    /// Walk the nodes in pre-order.
    pub fn depth_first(&self) -> DepthFirst<'_, F, T> {
        let stack = if self.nodes.is_empty() { Vec::new() } else { vec![(0, 0, None)] };
        DepthFirst { nodes: &self.nodes, stack }
    }
}

impl<F: Scalar, T: MetricItem<F> + Debug> VPTree<F, T> {
    /// Indented text rendering of the tree.
    pub fn dump(&self) -> String {
        Dump(self).to_string()
    }
}

struct Dump<'a, F: Scalar, T: MetricItem<F>>(&'a VPTree<F, T>);

impl<'a, F: Scalar, T: MetricItem<F> + Debug> Display for Dump<'a, F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.0.depth_first() {
            let indent = "  ".repeat(node.depth);
            let label = match node.branch {
                None => "root",
                Some(Branch::Inner) => "inner",
                Some(Branch::Outer) => "outer",
            };
            match node.mu {
                Some(mu) => writeln!(f, "{}{}: {:?} mu={}", indent, label, node.vantage, mu)?,
                None => writeln!(f, "{}{}: {:?} leaf", indent, label, node.vantage)?,
            }
        }
        Ok(())
    }
}
