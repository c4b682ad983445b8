//! geomat-linalg: dense matrices and row-echelon reduction
//!
//! Provides the dense `Matrix` type with structural predicates and
//! lazy coefficient traversal, the `IndexMatrix` permutation view that
//! swaps rows without moving data, the `LinearSystem` reduction driver,
//! and a size-checked dynamic `Vector`.

pub mod matrix;
pub mod reduction;
pub mod vector;
pub mod view;

pub use matrix::{Coefficient, LinalgError, Matrix};
pub use reduction::{LinearSystem, Tolerance};
pub use vector::Vector;
pub use view::IndexMatrix;
