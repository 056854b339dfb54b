use thiserror::Error;

/// Errors returned by selection, construction and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Selection was asked for an order statistic of nothing.
    #[error("cannot select from an empty sequence")]
    EmptyInput,

    /// The requested order statistic does not exist.
    #[error("order statistic {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// A key or distance is not ordered against itself (NaN).
    #[error("value is not comparable (NaN key or distance)")]
    Incomparable,

    /// Two points of different dimension were measured against each other.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// An input row does not have the dimension of the first row.
    #[error("row {row} has {got} components, expected {expected}")]
    RaggedRow { row: usize, expected: usize, got: usize },

    /// The tree holds no points.
    #[error("no nearest neighbor in an empty tree")]
    NotFound,

    /// A partition step did not shrink the work set.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

/// Coarse classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    InvariantViolation,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyInput
            | Error::IndexOutOfRange { .. }
            | Error::Incomparable
            | Error::DimensionMismatch { .. }
            | Error::RaggedRow { .. } => ErrorKind::InvalidArgument,
            Error::NotFound => ErrorKind::NotFound,
            Error::InvariantViolation(_) => ErrorKind::InvariantViolation,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
