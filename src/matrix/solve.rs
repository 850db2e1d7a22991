//! Gaussian elimination with partial pivoting.

use crate::matrix::dense::Matrix;
use crate::matrix::error::{MatrixError, MatrixResult};

/// Smallest pivot magnitude accepted before a system is treated as singular.
///
/// This is a tolerance, not an exactness test: RBF activation matrices that are
/// close to singular are rejected rather than solved into huge weights.
pub const PIVOT_TOLERANCE: f64 = 1e-4;

impl Matrix {
    /// Solve `self * w = values` for `w`.
    ///
    /// Elimination runs in place, so `self` holds the upper triangular factor
    /// afterwards. Callers that need the system again solve on a clone.
    ///
    /// # Errors
    ///
    /// - [`MatrixError::NotSquare`] if the matrix is not square. Nothing is
    ///   modified in that case.
    /// - [`MatrixError::DimensionMismatch`] if `values` does not have one entry
    ///   per row.
    /// - [`MatrixError::Singular`] if a pivot falls below [`PIVOT_TOLERANCE`].
    pub fn solve(&mut self, values: &[f64]) -> MatrixResult<Vec<f64>> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        let size = self.rows();
        if values.len() != size {
            return Err(MatrixError::DimensionMismatch {
                expected: size,
                actual: values.len(),
                context: "Matrix::solve (right-hand side)".to_string(),
            });
        }

        let mut y = values.to_vec();

        for i in 0..size {
            // Largest magnitude in column i among the unprocessed rows. Ties
            // keep the earlier row.
            let mut max_val = self[(i, i)];
            let mut pivot = i;
            for j in (i + 1)..size {
                if max_val.abs() < self[(j, i)].abs() {
                    max_val = self[(j, i)];
                    pivot = j;
                }
            }

            if pivot != i {
                self.swap_rows(pivot, i);
                y.swap(pivot, i);
            }

            let diag = self[(i, i)];
            if diag.abs() < PIVOT_TOLERANCE {
                return Err(MatrixError::Singular {
                    row: i,
                    magnitude: diag.abs(),
                });
            }

            for j in (i + 1)..size {
                let mult = self[(j, i)] / diag;
                for k in 0..size {
                    let delta = mult * self[(i, k)];
                    self[(j, k)] -= delta;
                }
                let delta = mult * y[i];
                y[j] -= delta;
            }
        }

        let mut w = vec![0.0; size];
        for x in (0..size).rev() {
            let mut sum = 0.0;
            for j in (x + 1)..size {
                sum += self[(x, j)] * w[j];
            }
            w[x] = (y[x] - sum) / self[(x, x)];
        }

        Ok(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_solve_3x3() {
        // 2x + y - z = 8, -3x - y + 2z = -11, -2x + y + 2z = -3 -> (2, 3, -1)
        let mut a = Matrix::from_rows(vec![
            vec![2.0, 1.0, -1.0],
            vec![-3.0, -1.0, 2.0],
            vec![-2.0, 1.0, 2.0],
        ])
        .unwrap();
        let w = a.solve(&[8.0, -11.0, -3.0]).unwrap();
        assert_abs_diff_eq!(w[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(w[1], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(w[2], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_needs_row_swap() {
        // Zero on the first diagonal entry forces a pivot swap.
        let mut a = Matrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let w = a.solve(&[2.0, 5.0]).unwrap();
        assert_abs_diff_eq!(w[0], 5.0);
        assert_abs_diff_eq!(w[1], 2.0);
    }

    #[test]
    fn test_solve_non_square_leaves_matrix_untouched() {
        let original = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let mut a = original.clone();
        let err = a.solve(&[1.0, 2.0]).unwrap_err();
        assert_eq!(err, MatrixError::NotSquare { rows: 2, cols: 3 });
        assert_eq!(a, original);
    }

    #[test]
    fn test_solve_singular_column() {
        let mut a = Matrix::from_rows(vec![vec![1.0, 0.0], vec![2.0, 0.0]]).unwrap();
        let err = a.solve(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, MatrixError::Singular { row: 1, .. }));
    }

    #[test]
    fn test_solve_pivot_just_below_tolerance_is_singular() {
        let mut a = Matrix::from_rows(vec![vec![0.5e-4]]).unwrap();
        assert!(matches!(a.solve(&[1.0]), Err(MatrixError::Singular { row: 0, .. })));

        let mut b = Matrix::from_rows(vec![vec![2.0e-4]]).unwrap();
        let w = b.solve(&[1.0]).unwrap();
        assert_abs_diff_eq!(w[0], 5000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_solve_rhs_length_checked() {
        let mut a = Matrix::identity(3);
        assert!(matches!(
            a.solve(&[1.0, 2.0]),
            Err(MatrixError::DimensionMismatch { expected: 3, actual: 2, .. })
        ));
    }

    #[test]
    fn test_solve_empty_system() {
        let mut a = Matrix::new();
        assert!(a.solve(&[]).unwrap().is_empty());
    }
}
