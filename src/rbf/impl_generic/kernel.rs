//! Kernel activations.

use crate::matrix::Matrix;
use crate::rbf::traits::RbfKernel;

/// Activation of a single distance for the given kernel width.
pub fn rbf_activation(distance: f64, width: f64, kernel: RbfKernel) -> f64 {
    match kernel {
        RbfKernel::Gaussian => {
            let width = if width == 0.0 { 1.0 } else { width };
            let inv = 1.0 / width;
            let sigma = -(inv * inv);
            (sigma * distance).exp()
        }
        RbfKernel::Linear => distance,
    }
}

/// Replace every distance cell with its activation.
pub fn apply_activations(distances: &mut Matrix, width: f64, kernel: RbfKernel) {
    distances.map_in_place(|d| rbf_activation(d, width, kernel));
}
