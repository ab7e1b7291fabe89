//! Determinants, factorizations and spectral routines on `Matrix<f64>`.
//!
//! Most entry points are inherent methods on [`Matrix`](crate::Matrix)
//! (`determinant`, `qr`, `eigenvalues`, `eigenvectors`, `svd`, ...); this
//! module holds the result types and the complex-vector helpers used by the
//! eigenvector solver.

pub(crate) mod det;
pub(crate) mod eigen;
pub(crate) mod qr;
pub(crate) mod schur;
pub(crate) mod svd;

pub use eigen::{
    complex_null_space, normalize_eigenvector, solve_complex_homogeneous, validate_eigenpair,
    EigenSettings,
};
pub use qr::QrDecomposition;
pub use svd::Svd;
