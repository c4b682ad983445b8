//! Permutation view over a borrowed matrix.
//!
//! `IndexMatrix` redirects element access through a row-index and a
//! column-index permutation, so swapping two rows is an O(1) update of
//! two integers instead of an O(cols) data move. The underlying storage
//! is only touched by writes through the view and by the final
//! `collapse`.

use crate::matrix::Matrix;

/// A non-owning view of a `Matrix` with permuted row and column
/// indices.
///
/// Both permutations start as the identity, so a fresh view reads and
/// writes exactly like the wrapped matrix. The view's lifetime is tied
/// to the mutable borrow of the target.
#[derive(Debug)]
pub struct IndexMatrix<'a> {
    target: &'a mut Matrix,
    row_order: Vec<usize>,
    col_order: Vec<usize>,
}

impl<'a> IndexMatrix<'a> {
    /// Wrap a matrix with identity permutations.
    pub fn new(target: &'a mut Matrix) -> Self {
        let row_order = (0..target.nrows()).collect();
        let col_order = (0..target.ncols()).collect();
        Self {
            target,
            row_order,
            col_order,
        }
    }

    /// Number of rows of the wrapped matrix.
    pub fn nrows(&self) -> usize {
        self.target.nrows()
    }

    /// Number of columns of the wrapped matrix.
    pub fn ncols(&self) -> usize {
        self.target.ncols()
    }

    /// Read through both permutations:
    /// `view[i, j] == target[row_order[i], col_order[j]]`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.target.get(self.row_order[i], self.col_order[j])
    }

    /// Write through both permutations.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.target.set(self.row_order[i], self.col_order[j], value);
    }

    /// Swap logical rows `i` and `ii`. O(1): only the two permutation
    /// entries move, the storage is untouched. Self-inverse.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `ii` is out of range.
    pub fn swap_rows(&mut self, i: usize, ii: usize) {
        self.row_order.swap(i, ii);
    }

    /// Elementary row operation: for every logical column `j`,
    /// `view[dest_row, j] += multiple * view[source_row, j]`.
    ///
    /// Writes go through the permutation, so the operation follows any
    /// prior swaps.
    pub fn add_row_multiple(&mut self, dest_row: usize, multiple: f64, source_row: usize) {
        for j in 0..self.ncols() {
            let value = self.get(dest_row, j) + multiple * self.get(source_row, j);
            self.set(dest_row, j, value);
        }
    }

    /// Copy every coefficient of the permuted view back into the
    /// target's direct storage, consuming the view.
    ///
    /// After this the permutation is materialized: `target[i, j]` holds
    /// what `view[i, j]` held. Buffered, so overlapping row cycles are
    /// handled correctly.
    pub fn collapse(mut self) {
        let nrows = self.nrows();
        let ncols = self.ncols();
        let mut values = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                values.push(self.get(i, j));
            }
        }
        for i in 0..nrows {
            for j in 0..ncols {
                self.target.set(i, j, values[i * ncols + j]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::from_row_major(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap()
    }

    #[test]
    fn test_fresh_view_is_transparent() {
        let mut m = sample();
        let view = IndexMatrix::new(&mut m);
        assert_eq!(view.get(0, 0), 1.0);
        assert_eq!(view.get(2, 1), 8.0);
    }

    #[test]
    fn test_swap_rows_redirects_access() {
        let mut m = sample();
        let mut view = IndexMatrix::new(&mut m);
        view.swap_rows(0, 2);
        assert_eq!(view.get(0, 0), 7.0);
        assert_eq!(view.get(2, 2), 3.0);
        // Storage is untouched.
        drop(view);
        assert_eq!(m.get(0, 0), 1.0);
    }

    #[test]
    fn test_swap_rows_is_self_inverse() {
        let mut m = sample();
        let mut view = IndexMatrix::new(&mut m);
        view.swap_rows(0, 1);
        view.swap_rows(0, 1);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(view.get(i, j), (i * 3 + j + 1) as f64);
            }
        }
    }

    #[test]
    fn test_set_writes_through_permutation() {
        let mut m = sample();
        let mut view = IndexMatrix::new(&mut m);
        view.swap_rows(0, 1);
        view.set(0, 0, -1.0);
        drop(view);
        // Logical row 0 is physical row 1 after the swap.
        assert_eq!(m.get(1, 0), -1.0);
        assert_eq!(m.get(0, 0), 1.0);
    }

    #[test]
    fn test_add_row_multiple_follows_swaps() {
        let mut m = sample();
        let mut view = IndexMatrix::new(&mut m);
        view.swap_rows(0, 2);
        // Logical row 2 is now [1, 2, 3]; add 2x logical row 0 ([7, 8, 9]).
        view.add_row_multiple(2, 2.0, 0);
        assert_eq!(view.get(2, 0), 15.0);
        assert_eq!(view.get(2, 1), 18.0);
        assert_eq!(view.get(2, 2), 21.0);
        drop(view);
        // The write landed in physical row 0.
        assert_eq!(m.get(0, 0), 15.0);
    }

    #[test]
    fn test_collapse_materializes_permutation() {
        let mut m = sample();
        let mut view = IndexMatrix::new(&mut m);
        view.swap_rows(0, 1);
        view.collapse();
        assert_eq!(m.get(0, 0), 4.0);
        assert_eq!(m.get(0, 2), 6.0);
        assert_eq!(m.get(1, 0), 1.0);
        assert_eq!(m.get(2, 0), 7.0);
    }

    #[test]
    fn test_collapse_handles_row_cycles() {
        let mut m = sample();
        let mut view = IndexMatrix::new(&mut m);
        // 3-cycle: logical 0 -> physical 1 -> physical 2 -> physical 0.
        view.swap_rows(0, 1);
        view.swap_rows(1, 2);
        view.collapse();
        assert_eq!(m.get(0, 0), 4.0);
        assert_eq!(m.get(1, 0), 7.0);
        assert_eq!(m.get(2, 0), 1.0);
    }
}
