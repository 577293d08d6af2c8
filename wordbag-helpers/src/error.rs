use thiserror::Error;

/// Errors raised by vector and matrix operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VectorError {
    /// The operand length differs from the receiver length.
    #[error("dimension mismatch: expected length {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// A matrix was built from vectors of unequal length.
    #[error("shape mismatch: row {row} has length {found}, expected {expected}")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A coordinate or row index lies outside the valid range.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// A scalar division by exactly zero.
    #[error("division by zero")]
    DivisionByZero,
    /// Sparsity for random initialization must lie in `[0, 1]`.
    #[error("sparsity must lie in [0, 1], got {0}")]
    InvalidSparsity(f64),
}

pub type Result<T> = std::result::Result<T, VectorError>;
