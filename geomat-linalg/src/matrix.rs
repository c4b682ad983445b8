#![allow(clippy::needless_range_loop)]
//! Dense matrix storage backed by faer.
//!
//! Wraps faer's `Mat<f64>` with the fixed-dimension access, arithmetic,
//! structural predicates, and coefficient traversal the reduction
//! algorithm builds on. Dimensions are set at construction and never
//! change; the grid itself is mutable in place.
//!
//! All structural predicates compare coefficients bitwise-exactly
//! against 0.0 and 1.0. There is no epsilon here; the reduction layer
//! owns the configurable zero test.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use faer::Mat;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinalgError {
    /// Construction with a zero dimension. Vectors are reported as n x 1.
    #[error("dimensions must be at least 1, got {rows} rows and {cols} columns")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Shape mismatch between the operands of an element-wise or
    /// product operation.
    #[error("incompatible dimensions: left is {left_rows}x{left_cols}, right is {right_rows}x{right_cols}")]
    IncompatibleDimensions {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    /// A square-only operation was invoked on a non-square matrix.
    #[error("operation requires a square matrix, got {rows}x{cols}")]
    NonSquare { rows: usize, cols: usize },

    /// Exact-zero divisor in an operation that checks for it.
    #[error("division by zero")]
    DivisionByZero,
}

/// A single matrix entry as produced by traversal: zero-based position
/// plus the value found there.
///
/// Coefficients are snapshots; writing back goes through the matrix's
/// own accessors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficient {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

/// A dense matrix of `f64` coefficients with fixed dimensions.
///
/// `new` seeds the main diagonal with ones, so a square `new(n, n)` is
/// the n x n identity. `Clone` is a deep copy; clones never alias.
///
/// Not internally synchronized: concurrent mutation of one instance
/// must be serialized by the caller.
#[derive(Debug, Clone)]
pub struct Matrix {
    inner: Mat<f64>,
}

impl Matrix {
    /// Create an identity-seeded matrix: 1.0 at `(d, d)` for
    /// `d < min(nrows, ncols)`, 0.0 everywhere else.
    pub fn new(nrows: usize, ncols: usize) -> Result<Self, LinalgError> {
        if nrows == 0 || ncols == 0 {
            return Err(LinalgError::InvalidDimensions {
                rows: nrows,
                cols: ncols,
            });
        }
        let inner = Mat::from_fn(nrows, ncols, |i, j| if i == j { 1.0 } else { 0.0 });
        Ok(Self { inner })
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != nrows * ncols`.
    pub fn from_row_major(nrows: usize, ncols: usize, data: &[f64]) -> Result<Self, LinalgError> {
        if nrows == 0 || ncols == 0 {
            return Err(LinalgError::InvalidDimensions {
                rows: nrows,
                cols: ncols,
            });
        }
        assert_eq!(data.len(), nrows * ncols);
        let inner = Mat::from_fn(nrows, ncols, |i, j| data[i * ncols + j]);
        Ok(Self { inner })
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.inner.nrows()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.inner.ncols()
    }

    /// Get the coefficient at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of range.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.check_index(row, col);
        self.inner.read(row, col)
    }

    /// Set the coefficient at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.check_index(row, col);
        self.inner.write(row, col, value);
    }

    fn check_index(&self, row: usize, col: usize) {
        assert!(
            row < self.nrows() && col < self.ncols(),
            "index ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.nrows(),
            self.ncols()
        );
    }

    fn check_same_shape(&self, other: &Matrix) -> Result<(), LinalgError> {
        if self.nrows() != other.nrows() || self.ncols() != other.ncols() {
            return Err(LinalgError::IncompatibleDimensions {
                left_rows: self.nrows(),
                left_cols: self.ncols(),
                right_rows: other.nrows(),
                right_cols: other.ncols(),
            });
        }
        Ok(())
    }

    fn require_square(&self) -> Result<(), LinalgError> {
        if !self.is_square() {
            return Err(LinalgError::NonSquare {
                rows: self.nrows(),
                cols: self.ncols(),
            });
        }
        Ok(())
    }

    /// Element-wise addition: self + other.
    pub fn add(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        self.check_same_shape(other)?;
        let inner = Mat::from_fn(self.nrows(), self.ncols(), |i, j| {
            self.inner.read(i, j) + other.inner.read(i, j)
        });
        Ok(Matrix { inner })
    }

    /// Element-wise subtraction: self - other.
    pub fn sub(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        self.check_same_shape(other)?;
        let inner = Mat::from_fn(self.nrows(), self.ncols(), |i, j| {
            self.inner.read(i, j) - other.inner.read(i, j)
        });
        Ok(Matrix { inner })
    }

    /// Scalar multiplication. Division is `scale(1.0 / c)` and is not
    /// special-cased for a zero divisor (IEEE infinities/NaN propagate).
    pub fn scale(&self, c: f64) -> Matrix {
        let inner = Mat::from_fn(self.nrows(), self.ncols(), |i, j| self.inner.read(i, j) * c);
        Matrix { inner }
    }

    /// Matrix product: self * other.
    ///
    /// Plain triple-nested sum of products, accumulating each output
    /// coefficient left to right. The summation order is part of the
    /// output contract, so this does not delegate to faer's product.
    pub fn mat_mul(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        if self.ncols() != other.nrows() {
            return Err(LinalgError::IncompatibleDimensions {
                left_rows: self.nrows(),
                left_cols: self.ncols(),
                right_rows: other.nrows(),
                right_cols: other.ncols(),
            });
        }
        let mut result = Mat::zeros(self.nrows(), other.ncols());
        for i in 0..self.nrows() {
            for j in 0..other.ncols() {
                let mut sum = 0.0;
                for k in 0..self.ncols() {
                    sum += self.inner.read(i, k) * other.inner.read(k, j);
                }
                result.write(i, j, sum);
            }
        }
        Ok(Matrix { inner: result })
    }

    /// Transpose in place by swapping `(i, j)` and `(j, i)` above the
    /// diagonal. Requires a square matrix.
    pub fn transpose(&mut self) -> Result<(), LinalgError> {
        self.require_square()?;
        let n = self.nrows();
        for i in 0..n {
            for j in (i + 1)..n {
                let tmp = self.inner.read(i, j);
                self.inner.write(i, j, self.inner.read(j, i));
                self.inner.write(j, i, tmp);
            }
        }
        Ok(())
    }

    /// Allocating transpose, valid for any shape.
    pub fn transposed(&self) -> Matrix {
        let inner = self.inner.transpose().to_owned();
        Matrix { inner }
    }

    /// Whether the matrix has as many rows as columns.
    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    /// Whether every diagonal coefficient is exactly 1.0 and every
    /// off-diagonal coefficient exactly 0.0. Requires square.
    pub fn is_identity(&self) -> Result<bool, LinalgError> {
        self.require_square()?;
        for c in self.coefficients() {
            let ok = if c.row == c.col {
                c.value == 1.0
            } else {
                c.value == 0.0
            };
            if !ok {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether `a[i][j] == a[j][i]` for every pair above the diagonal.
    /// Requires square.
    pub fn is_symmetric(&self) -> Result<bool, LinalgError> {
        for c in self.strict_upper_triangle()? {
            if c.value != self.inner.read(c.col, c.row) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether every coefficient strictly below the diagonal is exactly
    /// 0.0. Requires square.
    pub fn is_upper_triangular(&self) -> Result<bool, LinalgError> {
        for c in self.strict_lower_triangle()? {
            if c.value != 0.0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether every coefficient strictly above the diagonal is exactly
    /// 0.0. Requires square.
    pub fn is_lower_triangular(&self) -> Result<bool, LinalgError> {
        for c in self.strict_upper_triangle()? {
            if c.value != 0.0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether every off-diagonal coefficient is exactly 0.0. Requires
    /// square.
    pub fn is_diagonal(&self) -> Result<bool, LinalgError> {
        self.require_square()?;
        for c in self.coefficients() {
            if c.row != c.col && c.value != 0.0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether the matrix is in row-echelon form.
    ///
    /// Scans columns left to right with a pivot-row cursor `i`. Every
    /// column must be all zeros below row `i` — whether or not
    /// `a[i][col]` itself is a pivot — and the cursor advances only
    /// past a nonzero `a[i][col]`. Structural test only: any nonzero
    /// pivot value is accepted.
    pub fn is_echelon_form(&self) -> bool {
        let mut i = 0;
        let mut j = 0;
        while i < self.nrows() && j < self.ncols() {
            let pivot_found = self.inner.read(i, j) != 0.0;
            for ii in (i + 1)..self.nrows() {
                if self.inner.read(ii, j) != 0.0 {
                    return false;
                }
            }
            if pivot_found {
                i += 1;
            }
            j += 1;
        }
        true
    }

    /// All coefficients in row-major order.
    ///
    /// Each call produces an independent, restartable iterator. The
    /// matrix must not be mutated while an iterator is live (the borrow
    /// checker enforces this).
    pub fn coefficients(&self) -> impl Iterator<Item = Coefficient> + '_ {
        let ncols = self.ncols();
        (0..self.nrows()).flat_map(move |i| {
            (0..ncols).map(move |j| Coefficient {
                row: i,
                col: j,
                value: self.inner.read(i, j),
            })
        })
    }

    /// The main diagonal: `(d, d)` for `d < min(nrows, ncols)`.
    pub fn diagonal(&self) -> impl Iterator<Item = Coefficient> + '_ {
        let len = self.nrows().min(self.ncols());
        (0..len).map(move |d| Coefficient {
            row: d,
            col: d,
            value: self.inner.read(d, d),
        })
    }

    /// Coefficients strictly above the diagonal, row-major. Requires
    /// square.
    pub fn strict_upper_triangle(
        &self,
    ) -> Result<impl Iterator<Item = Coefficient> + '_, LinalgError> {
        self.require_square()?;
        let n = self.nrows();
        Ok((0..n).flat_map(move |i| {
            ((i + 1)..n).map(move |j| Coefficient {
                row: i,
                col: j,
                value: self.inner.read(i, j),
            })
        }))
    }

    /// Coefficients strictly below the diagonal, row-major. Requires
    /// square.
    pub fn strict_lower_triangle(
        &self,
    ) -> Result<impl Iterator<Item = Coefficient> + '_, LinalgError> {
        self.require_square()?;
        let n = self.nrows();
        Ok((1..n).flat_map(move |i| {
            (0..i).map(move |j| Coefficient {
                row: i,
                col: j,
                value: self.inner.read(i, j),
            })
        }))
    }
}

/// Exact comparison: equal dimensions and bitwise-equal coefficients.
impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        if self.nrows() != other.nrows() || self.ncols() != other.ncols() {
            return false;
        }
        self.coefficients()
            .zip(other.coefficients())
            .all(|(a, b)| a.value == b.value)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.nrows() {
            for j in 0..self.ncols() {
                if j > 0 {
                    write!(f, "\t")?;
                }
                write!(f, "{:.6}", self.inner.read(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// Operator forms of the checked methods.
//
// # Panics
//
// All of these panic on a dimension mismatch; use the inherent methods
// to recover from one instead.

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: &Matrix) -> Matrix {
        Matrix::add(self, rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: &Matrix) -> Matrix {
        Matrix::sub(self, rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, c: f64) -> Matrix {
        self.scale(c)
    }
}

impl Mul<&Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, mat: &Matrix) -> Matrix {
        mat.scale(self)
    }
}

impl Div<f64> for &Matrix {
    type Output = Matrix;

    fn div(self, c: f64) -> Matrix {
        self.scale(1.0 / c)
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        self.mat_mul(rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}
