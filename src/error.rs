//! Error types for construction and bucket access.

use thiserror::Error;

/// Rejected bucket array access: `index` is not in `[0, capacity)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("bucket index {index} out of range for capacity {capacity}")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub capacity: usize,
}

/// Rejected table or bucket array capacity.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum CapacityError {
    #[error("capacity {requested} is below the minimum of {minimum}")]
    BelowMinimum { requested: usize, minimum: usize },
    #[error("capacity {0} is not a power of two")]
    NotPowerOfTwo(usize),
}
