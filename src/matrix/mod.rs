//! Dense matrices and the linear solve behind the RBF weights.
//!
//! [`Matrix`] is a small value type sized exactly by its callers: pose data
//! (`poses x dimensions`), pose values (`poses x outputs`), distance and
//! activation matrices (`poses x poses`) and the solved weight matrix
//! (`poses x outputs`). [`Matrix::solve`] is Gaussian elimination with partial
//! pivoting and a fixed singularity tolerance ([`PIVOT_TOLERANCE`]).
//!
//! Matrices convert to and from numr tensors so the same data can be handed to
//! any numr backend.

mod dense;
mod error;
mod solve;

pub use dense::Matrix;
pub use error::{MatrixError, MatrixResult};
pub use solve::PIVOT_TOLERANCE;
