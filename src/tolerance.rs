//! Absolute floating-point tolerance checks.
//!
//! Every structural routine in the crate (pivot detection, zero-row tests,
//! matrix comparison) goes through these helpers instead of `==`, so that
//! round-off accumulated during elimination does not produce phantom pivots.
//!
//! The threshold is **absolute**: `decimals = 10` accepts a difference of
//! `1e-10` whatever the magnitude of the operands. Callers working with
//! large entries must pick a coarser threshold.

use crate::traits::LinalgScalar;

/// Decimal places used by the structural predicates and `Matrix::approx_eq`.
pub const DEFAULT_DECIMALS: u32 = 10;

/// `10^(-decimals)`.
#[inline]
pub fn epsilon(decimals: u32) -> f64 {
    10f64.powi(-(decimals as i32))
}

/// `true` if `a == b` exactly or `|a - b| <= 10^(-decimals)`.
///
/// ```
/// use echelon::tolerance::nearly_equal;
///
/// assert!(nearly_equal(0.0001, 0.0009, 3));
/// assert!(!nearly_equal(1.0, 2.0, 1));
/// ```
#[inline]
pub fn nearly_equal(a: f64, b: f64, decimals: u32) -> bool {
    a == b || (a - b).abs() <= epsilon(decimals)
}

/// `true` if the modulus of `x` is within `10^(-decimals)` of zero.
#[inline]
pub fn is_negligible<T: LinalgScalar>(x: T, decimals: u32) -> bool {
    nearly_equal(x.modulus(), 0.0, decimals)
}
