//! Single nearest-neighbor search over a static vantage-point tree.
//!
//! Construction splits each node's items at the median distance from a
//! randomly chosen vantage point; the median is found with a worst-case
//! linear median-of-medians selection ([`median`]).
//!
//! ```
//! use vantage::{Point, VPTreeBuilder};
//!
//! # fn main() -> Result<(), vantage::Error> {
//! let points = vec![
//!     Point::from([3.7, 0.6]),
//!     Point::from([9.0, 3.8]),
//!     Point::from([8.2, 7.6]),
//!     Point::from([8.1, 4.9]),
//!     Point::from([7.6, 7.8]),
//! ];
//! let tree = VPTreeBuilder::new().seed(7).build(points)?;
//! let nearest = tree.nearest_neighbor(&Point::from([1.0, 1.0]))?;
//! assert_eq!(nearest.item, &Point::from([3.7, 0.6]));
//! # Ok(())
//! # }
//! ```
pub mod error;
pub mod median;
pub mod point;
pub mod scan;
pub mod vptree;

pub use error::{Error, ErrorKind, Result};
pub use median::{hybrid_select_median, select, select_by_key, select_median, select_pair,
                 HybridSelector};
pub use point::{points_from_rows, Point};
pub use scan::linear_scan;
pub use vptree::{Branch, MetricItem, Nearest, NodeView, Scalar, VPTree, VPTreeBuilder};
