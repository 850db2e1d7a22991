//! Error types for dense matrix operations.

use thiserror::Error;

/// Result type for matrix operations.
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Errors that can occur in matrix arithmetic and linear solves.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// A linear solve was requested on a non-square system.
    #[error("cannot solve a non-square system ({rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },

    /// The pivot at `row` fell below the singularity tolerance.
    #[error("matrix is singular: pivot {magnitude:e} at row {row} is below tolerance")]
    Singular { row: usize, magnitude: f64 },

    /// Operand dimensions do not agree.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },
}
