//! Small dense matrices of `f64`, with the cofactor-expansion toolbox needed to solve tiny linear systems.
//!
//! Everything here is exact textbook algebra: determinants cost `O(n!)`, so only use it for order 3 or so.

use itertools::Itertools;
use ndarray::{Array2, Axis};
use thiserror::Error;

/// Largest distance from the nearest integer at which a solved component is still accepted as that integer.
pub const INTEGER_EPSILON: f64 = 1e-3;

/// Reasons a [`DenseMatrix`] operation may fail.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LinalgError {
    /// The flat data does not hold `rows * cols` values.
    #[error("cannot shape {len} values into a {rows}x{cols} matrix")]
    ShapeMismatch {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
        /// Values provided.
        len: usize,
    },
    /// Determinant, adjoint and inverse need a square matrix.
    #[error("a {rows}x{cols} matrix is not square")]
    NotSquare {
        /// Actual rows.
        rows: usize,
        /// Actual columns.
        cols: usize,
    },
    /// The left operand of a product must have as many columns as the right one has rows.
    #[error("cannot multiply a {}x{} matrix by a {}x{} matrix", left.0, left.1, right.0, right.1)]
    DimensionMismatch {
        /// `(rows, cols)` of the left operand.
        left: (usize, usize),
        /// `(rows, cols)` of the right operand.
        right: (usize, usize),
    },
    /// The matrix is too small for a minor, or the removed row or column does not exist.
    #[error("no minor without row {row} and column {col} in a {rows}x{cols} matrix")]
    InvalidMinor {
        /// Row to remove.
        row: usize,
        /// Column to remove.
        col: usize,
        /// Actual rows.
        rows: usize,
        /// Actual columns.
        cols: usize,
    },
}

/// A `rows x cols` matrix of `f64`.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseMatrix {
    values: Array2<f64>,
}

impl DenseMatrix {
    /// Build a matrix from row-major `data`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, LinalgError> {
        let len = data.len();
        Array2::from_shape_vec((rows, cols), data)
            .map(Self::from)
            .map_err(|_| LinalgError::ShapeMismatch { rows, cols, len })
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self { values: Array2::eye(n) }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.values.ncols()
    }

    /// The value at `(row, col)`, or [`None`] outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied()
    }

    /// The backing array.
    pub fn as_array(&self) -> &Array2<f64> {
        &self.values
    }

    fn require_square(&self) -> Result<usize, LinalgError> {
        if self.rows() != self.cols() {
            return Err(LinalgError::NotSquare { rows: self.rows(), cols: self.cols() });
        }
        Ok(self.rows())
    }

    /// Determinant, by cofactor expansion along the first row.
    pub fn determinant(&self) -> Result<f64, LinalgError> {
        self.require_square()?;
        Ok(self.expand())
    }

    // square is checked by the caller; recursion depth is the order of the matrix
    fn expand(&self) -> f64 {
        let v = &self.values;
        match self.rows() {
            0 => 1.0,
            1 => v[(0, 0)],
            2 => v[(0, 0)] * v[(1, 1)] - v[(0, 1)] * v[(1, 0)],
            n => (0..n)
                .map(|col| sign(0, col) * v[(0, col)] * self.minor_of_square(0, col).expand())
                .sum(),
        }
    }

    /// This matrix without `row` and `col`.
    ///
    /// Fails with [`LinalgError::InvalidMinor`] when the matrix has fewer than two rows or columns, or when `row` or
    /// `col` is out of range.
    pub fn minor_matrix(&self, row: usize, col: usize) -> Result<Self, LinalgError> {
        if self.rows() < 2 || self.cols() < 2 || row >= self.rows() || col >= self.cols() {
            return Err(LinalgError::InvalidMinor { row, col, rows: self.rows(), cols: self.cols() });
        }
        Ok(self.minor_of_square(row, col))
    }

    fn minor_of_square(&self, row: usize, col: usize) -> Self {
        let keep_rows = (0..self.rows()).filter(|r| *r != row).collect_vec();
        let keep_cols = (0..self.cols()).filter(|c| *c != col).collect_vec();
        Self::from(self.values.select(Axis(0), &keep_rows).select(Axis(1), &keep_cols))
    }

    /// The matrix of signed minors: `(-1)^(row + col) * det(minor(row, col))` at every position.
    pub fn cofactor_matrix(&self) -> Result<Self, LinalgError> {
        let n = self.require_square()?;
        if n == 1 {
            return Ok(Self::identity(1));
        }

        let cofactors = (0..n)
            .cartesian_product(0..n)
            .map(|(row, col)| sign(row, col) * self.minor_of_square(row, col).expand())
            .collect_vec();
        Self::new(n, n, cofactors)
    }

    /// Transpose of the cofactor matrix.
    pub fn adjoint(&self) -> Result<Self, LinalgError> {
        Ok(self.cofactor_matrix()?.transpose())
    }

    /// `adjoint / determinant`.
    ///
    /// A singular matrix does not fail: its "inverse" is the identity. Callers solving equations must check the
    /// solution themselves, see [`Self::integer_solution`].
    pub fn inverse(&self) -> Result<Self, LinalgError> {
        let n = self.require_square()?;
        let determinant = self.expand();
        if determinant == 0.0 {
            log::debug!("{}x{} matrix is singular, using the identity as its inverse", n, n);
            return Ok(Self::identity(n));
        }
        Ok(self.adjoint()?.scale(1.0 / determinant))
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        Self::from(self.values.t().to_owned())
    }

    /// Multiply every value by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        Self::from(&self.values * factor)
    }

    /// Matrix product `self * other`.
    pub fn multiply(&self, other: &DenseMatrix) -> Result<Self, LinalgError> {
        if self.cols() != other.rows() {
            return Err(LinalgError::DimensionMismatch {
                left: (self.rows(), self.cols()),
                right: (other.rows(), other.cols()),
            });
        }
        Ok(Self::from(self.values.dot(&other.values)))
    }

    /// Solve `a * x = y` for `x`, as `inverse(a) * y`.
    ///
    /// The result is floating point. When `a` is singular the identity stands in for its inverse, so the result is
    /// `y` itself and is meaningless: validate it before use.
    pub fn solve_equation(a: &DenseMatrix, y: &DenseMatrix) -> Result<Self, LinalgError> {
        a.inverse()?.multiply(y)
    }

    /// Every value rounded to the nearest integer, in row-major order, provided each one lies within `epsilon` of it.
    ///
    /// [`None`] means the system this matrix solves has no integer solution. [`INTEGER_EPSILON`] is the usual
    /// tolerance.
    pub fn integer_solution(&self, epsilon: f64) -> Option<Vec<i64>> {
        self.values.iter()
            .map(|value| {
                let rounded = value.round();
                ((value - rounded).abs() < epsilon).then_some(rounded as i64)
            })
            .collect()
    }
}

impl From<Array2<f64>> for DenseMatrix {
    fn from(values: Array2<f64>) -> Self {
        Self { values }
    }
}

#[inline]
fn sign(row: usize, col: usize) -> f64 {
    if (row + col) % 2 == 0 { 1.0 } else { -1.0 }
}
