//! Error types for the RBF pose solver.

use crate::matrix::MatrixError;
use thiserror::Error;

/// Result type for RBF operations.
pub type RbfResult<T> = Result<T, RbfError>;

/// Errors that can occur while fitting or evaluating the pose solver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RbfError {
    /// A per-output linear solve failed (non-square or singular system).
    #[error("RBF decomposition failed for output {output}: {source}")]
    Decomposition {
        output: usize,
        #[source]
        source: MatrixError,
    },

    /// Dense matrix arithmetic failed.
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    /// Input arrays disagree in size.
    #[error("shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },

    /// Configuration rejected by validation.
    #[error("invalid configuration '{field}': {message}")]
    InvalidConfig { field: String, message: String },
}

impl RbfError {
    /// True for numerical solve failures (`Singular` / `NotSquare`).
    pub fn is_solve_failure(&self) -> bool {
        matches!(
            self,
            RbfError::Decomposition { .. }
                | RbfError::Matrix(MatrixError::Singular { .. } | MatrixError::NotSquare { .. })
        )
    }

    /// True when the failure is a singular activation matrix.
    pub fn is_singular(&self) -> bool {
        matches!(
            self,
            RbfError::Decomposition {
                source: MatrixError::Singular { .. },
                ..
            } | RbfError::Matrix(MatrixError::Singular { .. })
        )
    }
}
