//! CPU implementation of the pose RBF algorithms.
//!
//! Delegates to the generic implementations in `impl_generic/`.

mod pose_rbf;
