//! Row-echelon reduction.
//!
//! `LinearSystem` owns a private copy of its input, reduces it lazily
//! on the first request, and hands out fresh copies of the result. The
//! elimination itself runs through an `IndexMatrix` so row swaps are
//! O(1) index updates; the permutation is collapsed into direct storage
//! once the reduction finishes.
//!
//! Pivot selection is the plain first-nonzero search in
//! column-then-row order, not magnitude-based partial pivoting. The
//! tie-break order is part of the output contract.

use tracing::{debug, trace};

use crate::matrix::Matrix;
use crate::view::IndexMatrix;

/// Zero-test strategy used by pivot search and the elimination skip
/// test.
///
/// The default is bitwise-exact comparison against 0.0, which preserves
/// the historical output contract. An absolute epsilon makes the pivot
/// search skip sub-tolerance values at the cost of that compatibility.
/// `Matrix`'s structural predicates always stay exact.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    eps: f64,
}

impl Tolerance {
    /// Bitwise-exact comparison: only 0.0 itself is zero.
    pub fn exact() -> Self {
        Self { eps: 0.0 }
    }

    /// Treat every value with `|x| <= eps` as zero.
    pub fn absolute(eps: f64) -> Self {
        Self { eps: eps.abs() }
    }

    /// Whether `x` counts as zero under this strategy.
    pub fn is_zero(&self, x: f64) -> bool {
        if self.eps == 0.0 {
            x == 0.0
        } else {
            x.abs() <= self.eps
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::exact()
    }
}

/// Reduces a matrix to row-echelon form.
///
/// Construction deep-copies the input; the caller's matrix is never
/// mutated. Whether a reduction is still pending is re-derived from
/// `Matrix::is_echelon_form` on every request rather than cached, so
/// the reduction runs at most once.
pub struct LinearSystem {
    a: Matrix,
    zero: Tolerance,
}

impl LinearSystem {
    /// Build a system over a private copy of `a`, with the exact zero
    /// test.
    pub fn new(a: &Matrix) -> Self {
        Self {
            a: a.clone(),
            zero: Tolerance::exact(),
        }
    }

    /// Build a system over a private copy of `a` with a custom zero
    /// test for pivoting.
    pub fn with_tolerance(a: &Matrix, zero: Tolerance) -> Self {
        Self { a: a.clone(), zero }
    }

    /// The row-echelon form of the input, as a fresh copy.
    ///
    /// Idempotent: the first call that finds the owned matrix not yet
    /// in echelon form reduces it; every call returns an equal,
    /// independently owned matrix.
    pub fn echelon_form(&mut self) -> Matrix {
        if !self.a.is_echelon_form() {
            self.reduce();
        }
        self.a.clone()
    }

    fn reduce(&mut self) {
        let row_count = self.a.nrows();
        let col_count = self.a.ncols();
        debug!("reducing {}x{} matrix to row-echelon form", row_count, col_count);

        let zero = self.zero;
        let mut view = IndexMatrix::new(&mut self.a);

        let mut i = 0;
        let mut j = 0;
        while i < row_count && j < col_count {
            let (pivot_row, pivot_col) = match find_pivot(&view, i, j, zero) {
                Some(found) => found,
                // The remaining submatrix is all zeros.
                None => break,
            };

            if pivot_row > i {
                view.swap_rows(pivot_row, i);
                trace!("pivot at ({}, {}) swapped into row {}", pivot_row, pivot_col, i);
            }
            j = pivot_col;

            let pivot = view.get(i, j);
            for ii in (i + 1)..row_count {
                let coeff = view.get(ii, j);
                if zero.is_zero(coeff) {
                    if coeff != 0.0 {
                        // Sub-tolerance noise: snap it so the echelon
                        // predicate certifies the result.
                        view.set(ii, j, 0.0);
                    }
                    continue;
                }
                let multiple = coeff / pivot;
                view.add_row_multiple(ii, -multiple, i);
                // The subtraction can leave residual floating-point
                // noise; the entry below a pivot must be exactly zero.
                view.set(ii, j, 0.0);
            }

            i += 1;
            j += 1;
        }

        view.collapse();
    }
}

/// First coefficient failing the zero test, scanning columns
/// `col..ncols` in the outer loop and rows `row..nrows` in the inner
/// loop.
fn find_pivot(
    view: &IndexMatrix<'_>,
    row: usize,
    col: usize,
    zero: Tolerance,
) -> Option<(usize, usize)> {
    for jj in col..view.ncols() {
        for ii in row..view.nrows() {
            if !zero.is_zero(view.get(ii, jj)) {
                return Some((ii, jj));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduces_with_row_swap_and_elimination() {
        let a = Matrix::from_row_major(3, 3, &[0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 4.0, 2.0]).unwrap();
        let mut system = LinearSystem::new(&a);
        let e = system.echelon_form();

        let expected =
            Matrix::from_row_major(3, 3, &[1.0, 1.0, 1.0, 0.0, 2.0, 1.0, 0.0, 0.0, -1.0]).unwrap();
        assert_eq!(e, expected);
        assert!(e.is_echelon_form());
    }

    #[test]
    fn test_input_is_not_mutated() {
        let a = Matrix::from_row_major(2, 2, &[0.0, 1.0, 1.0, 0.0]).unwrap();
        let mut system = LinearSystem::new(&a);
        let _ = system.echelon_form();
        assert_eq!(a.get(0, 0), 0.0);
        assert_eq!(a.get(1, 0), 1.0);
    }

    #[test]
    fn test_already_echelon_input_is_returned_unchanged() {
        let a = Matrix::from_row_major(2, 3, &[3.0, 1.0, 4.0, 0.0, 0.0, 2.0]).unwrap();
        let mut system = LinearSystem::new(&a);
        let e = system.echelon_form();
        assert_eq!(e, a);
    }

    #[test]
    fn test_idempotent_and_independent_copies() {
        let a = Matrix::from_row_major(2, 2, &[0.0, 1.0, 2.0, 3.0]).unwrap();
        let mut system = LinearSystem::new(&a);
        let first = system.echelon_form();
        let mut second = system.echelon_form();
        assert_eq!(first, second);
        second.set(0, 0, 42.0);
        assert_ne!(first, second);
        assert_eq!(system.echelon_form(), first);
    }

    #[test]
    fn test_zero_matrix_is_a_fixed_point() {
        let a = Matrix::from_row_major(3, 2, &[0.0; 6]).unwrap();
        let mut system = LinearSystem::new(&a);
        assert_eq!(system.echelon_form(), a);
    }

    #[test]
    fn test_pivot_search_skips_zero_columns() {
        let a = Matrix::from_row_major(2, 3, &[0.0, 0.0, 3.0, 0.0, 2.0, 1.0]).unwrap();
        let mut system = LinearSystem::new(&a);
        let e = system.echelon_form();
        // First pivot lives in column 1, found at row 1 and swapped up.
        let expected = Matrix::from_row_major(2, 3, &[0.0, 2.0, 1.0, 0.0, 0.0, 3.0]).unwrap();
        assert_eq!(e, expected);
    }

    #[test]
    fn test_tall_matrix() {
        let a = Matrix::from_row_major(3, 2, &[1.0, 2.0, 2.0, 4.0, 3.0, 5.0]).unwrap();
        let mut system = LinearSystem::new(&a);
        let e = system.echelon_form();
        assert!(e.is_echelon_form());
        // Row 1 is a multiple of row 0 and eliminates to zero; row 2
        // keeps a pivot in column 1 and is swapped above it.
        let expected = Matrix::from_row_major(3, 2, &[1.0, 2.0, 0.0, -1.0, 0.0, 0.0]).unwrap();
        assert_eq!(e, expected);
    }

    #[test]
    fn test_absolute_tolerance_skips_noise_pivots() {
        let a = Matrix::from_row_major(2, 2, &[1e-13, 1.0, 1.0, 1.0]).unwrap();
        let mut system = LinearSystem::with_tolerance(&a, Tolerance::absolute(1e-9));
        let e = system.echelon_form();
        // The noise entry is not a pivot: row 1 is swapped up and the
        // sub-tolerance value below the pivot is snapped to zero.
        assert_eq!(e.get(0, 0), 1.0);
        assert_eq!(e.get(1, 0), 0.0);
        assert!(e.is_echelon_form());
    }

    #[test]
    fn test_tolerance_zero_test() {
        let exact = Tolerance::exact();
        assert!(exact.is_zero(0.0));
        assert!(!exact.is_zero(1e-300));

        let abs = Tolerance::absolute(1e-9);
        assert!(abs.is_zero(0.0));
        assert!(abs.is_zero(-1e-10));
        assert!(!abs.is_zero(1e-8));
    }
}
