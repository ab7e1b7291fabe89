//! # echelon
//!
//! Dense linear algebra over `f64`: Gauss-Jordan row reduction and the
//! quantities read off it (rank, null space, column space, elimination
//! matrix), determinants and cofactor inverses, eigenvalues and eigenvectors
//! by unshifted QR iteration, and a singular value decomposition built on
//! them.
//!
//! ## Quick start
//!
//! ```
//! use echelon::echelon as rref;
//! use echelon::{space, Matrix};
//!
//! let a = Matrix::from([[2.0, 1.0, -3.0], [4.0, 2.0, -6.0], [1.0, -1.0, -6.0]]);
//! assert_eq!(space::rank(&a), 2);
//! assert_eq!(space::null_space(&a), vec![vec![3.0, -3.0, 1.0]]);
//!
//! let r = rref::to_reduced_row_echelon_form(&a);
//! assert!(rref::is_reduced_row_echelon_form(&r));
//!
//! let b = Matrix::from([[4.0, 2.0], [1.0, 3.0]]);
//! assert_eq!(b.determinant().unwrap(), 10.0);
//! let ev = b.eigenvalues().unwrap();
//! assert_eq!((ev[0].re, ev[1].re), (5.0, 2.0));
//! ```
//!
//! ## Modules
//!
//! - [`Matrix`] — Heap-allocated row-major `Matrix<T = f64>` with runtime
//!   dimensions. Constructors, row views, elementary row operations,
//!   arithmetic, transpose, horizontal append. Public operations never
//!   mutate their receiver.
//!
//! - [`vector`] — Free functions on `&[f64]`: length, unit vectors, dot and
//!   cross products, angles, orthogonality and linear independence checks.
//!
//! - [`echelon`] — Row-echelon and reduced row-echelon forms, pivot entries,
//!   the elimination matrix, and the echelon-form predicates.
//!
//! - [`space`] — Rank, nullity, span, null space, column space.
//!
//! - [`linalg`] — Determinant, minors, cofactors, adjugate and inverse
//!   (inherent methods on `Matrix`), Gram-Schmidt QR, the eigen engine and
//!   SVD.
//!
//! - [`io`] — Whitespace text format for loading and saving matrices.
//!
//! - [`tolerance`] — Absolute `nearly_equal` comparison used by every
//!   structural check.
//!
//! - [`traits`] — Element traits:
//!   - [`Scalar`] — all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`LinalgScalar`] — `f64` and `Complex<f64>`, used by the elimination core
//!
//! ## Logging
//!
//! The QR iteration and the eigenvector solver report convergence and
//! fallbacks through the [`log`] facade at `debug`/`trace` level. Install any
//! logger to see them.

pub mod echelon;
pub mod error;
pub mod io;
pub mod linalg;
mod matrix;
pub mod space;
pub mod tolerance;
pub mod traits;
pub mod vector;

pub use error::{LinalgError, Result};
pub use linalg::{EigenSettings, QrDecomposition, Svd};
pub use matrix::{complex_to_real_vector, Matrix};
pub use traits::{LinalgScalar, Scalar};

pub use num_complex::Complex;
