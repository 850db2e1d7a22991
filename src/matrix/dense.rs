//! Dense row-major matrix used throughout the pose solver.

use crate::matrix::error::{MatrixError, MatrixResult};
use numr::dtype::DType;
use numr::runtime::Runtime;
use numr::tensor::Tensor;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Dense `rows x cols` grid of `f64` values.
///
/// `Matrix` is a plain value type: cloning copies every element and there is
/// no shared storage. Element access through `(row, col)` indexing is bounds
/// checked; every call site in the solver sizes its matrices up front, so the
/// checks never fire on a correct pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matrix {
    data: Vec<Vec<f64>>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create an empty `0 x 0` matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a zero-filled matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![vec![0.0; cols]; rows],
            rows,
            cols,
        }
    }

    /// Create an identity matrix of size `n`.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i][i] = 1.0;
        }
        m
    }

    /// Build a matrix from row vectors. All rows must share one length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> MatrixResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
            return Err(MatrixError::DimensionMismatch {
                expected: cols,
                actual: bad.len(),
                context: "Matrix::from_rows".to_string(),
            });
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data: rows,
        })
    }

    /// Resize in place. Cells inside both the old and new bounds keep their
    /// value; newly exposed cells are zero.
    pub fn set_size(&mut self, rows: usize, cols: usize) {
        self.data.resize_with(rows, Vec::new);
        for row in &mut self.data {
            row.resize(cols, 0.0);
        }
        self.rows = rows;
        self.cols = cols;
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Borrow a row as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row]
    }

    /// Copy of a row.
    pub fn row_vector(&self, row: usize) -> Vec<f64> {
        self.data[row].clone()
    }

    /// Copy of a column.
    pub fn column_vector(&self, col: usize) -> Vec<f64> {
        self.data.iter().map(|r| r[col]).collect()
    }

    /// Iterate over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.iter().map(Vec::as_slice)
    }

    /// Apply `f` to every element in place.
    pub fn map_in_place(&mut self, mut f: impl FnMut(f64) -> f64) {
        for row in &mut self.data {
            for v in row.iter_mut() {
                *v = f(*v);
            }
        }
    }

    /// Sum of all elements.
    pub fn sum(&self) -> f64 {
        self.data.iter().flatten().sum()
    }

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
    }

    /// Matrix product `self * rhs`.
    ///
    /// Requires `self.cols() == rhs.rows()`; the result is
    /// `self.rows() x rhs.cols()`.
    pub fn multiply(&self, rhs: &Matrix) -> MatrixResult<Matrix> {
        if self.cols != rhs.rows {
            return Err(MatrixError::DimensionMismatch {
                expected: self.cols,
                actual: rhs.rows,
                context: "Matrix::multiply (lhs cols vs rhs rows)".to_string(),
            });
        }
        let mut out = Matrix::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let mut acc = 0.0;
                for k in 0..self.cols {
                    acc += self.data[i][k] * rhs.data[k][j];
                }
                out.data[i][j] = acc;
            }
        }
        Ok(out)
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[j][i] = self.data[i][j];
            }
        }
        out
    }

    /// Upload to a 2D tensor of shape `[rows, cols]`.
    pub fn to_tensor<R: Runtime<DType = DType>>(&self, device: &R::Device) -> Tensor<R> {
        let flat: Vec<f64> = self.data.iter().flatten().copied().collect();
        Tensor::<R>::from_slice(&flat, &[self.rows, self.cols], device)
            .expect("Matrix::to_tensor: from_slice failed")
    }

    /// Download a 2D F64 tensor.
    pub fn from_tensor<R: Runtime>(tensor: &Tensor<R>) -> MatrixResult<Self> {
        let shape = tensor.shape().to_vec();
        if shape.len() != 2 {
            return Err(MatrixError::DimensionMismatch {
                expected: 2,
                actual: shape.len(),
                context: "Matrix::from_tensor (tensor rank)".to_string(),
            });
        }
        let (rows, cols) = (shape[0], shape[1]);
        let flat: Vec<f64> = tensor
            .contiguous()
            .expect("Matrix::from_tensor: contiguous failed")
            .to_vec();
        let data = if cols == 0 {
            vec![Vec::new(); rows]
        } else {
            flat.chunks(cols).map(<[f64]>::to_vec).collect()
        };
        Ok(Self { data, rows, cols })
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row][col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row][col]
    }
}

/// One row per line, values separated by a single space.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.data {
            for v in row {
                write!(f, " {v}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
