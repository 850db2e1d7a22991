//! Validation helpers for the tensor surface of the pose solver.

use crate::rbf::error::{RbfError, RbfResult};
use numr::dtype::DType;

/// Validate tensor dtype (must be F64; the solver works in double precision).
pub fn validate_f64(dtype: DType, arg: &str) -> RbfResult<()> {
    match dtype {
        DType::F64 => Ok(()),
        other => Err(RbfError::InvalidParameter {
            parameter: arg.to_string(),
            message: format!("expected F64 tensor, got {other:?}"),
        }),
    }
}

/// Validate that a tensor is 2D `[n, d]`.
pub fn validate_2d(shape: &[usize], arg: &str) -> RbfResult<()> {
    if shape.len() != 2 {
        return Err(RbfError::InvalidParameter {
            parameter: arg.to_string(),
            message: format!("requires 2D tensor [n, d], got {}-D", shape.len()),
        });
    }
    Ok(())
}

/// Validate that two 2D tensors agree along `axis`.
pub fn validate_matching_axis(
    a_shape: &[usize],
    b_shape: &[usize],
    axis: usize,
    context: &str,
) -> RbfResult<()> {
    let expected = a_shape.get(axis).copied().unwrap_or(0);
    let actual = b_shape.get(axis).copied().unwrap_or(0);
    if expected != actual {
        return Err(RbfError::ShapeMismatch {
            expected,
            actual,
            context: context.to_string(),
        });
    }
    Ok(())
}
