use core::fmt::Debug;
use num_complex::Complex;
use num_traits::{Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for matrix elements the elimination core can reduce.
///
/// Covers `f64` and `Complex<f64>`. Zero tests go through [`modulus`],
/// so the same Gaussian elimination serves the real null-space routines
/// and the complex eigenvector solver.
///
/// [`modulus`]: LinalgScalar::modulus
pub trait LinalgScalar: Scalar {
    /// Absolute value / modulus: `|z|` for complex, `.abs()` for real.
    fn modulus(self) -> f64;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Real part.
    fn re(self) -> f64;

    /// Promote a real value into `Self`.
    fn from_real(r: f64) -> Self;
}

impl LinalgScalar for f64 {
    #[inline]
    fn modulus(self) -> f64 {
        self.abs()
    }

    #[inline]
    fn conj(self) -> f64 {
        self
    }

    #[inline]
    fn re(self) -> f64 {
        self
    }

    #[inline]
    fn from_real(r: f64) -> f64 {
        r
    }
}

impl LinalgScalar for Complex<f64> {
    #[inline]
    fn modulus(self) -> f64 {
        self.norm()
    }

    #[inline]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }

    #[inline]
    fn re(self) -> f64 {
        self.re
    }

    #[inline]
    fn from_real(r: f64) -> Self {
        Complex::new(r, 0.0)
    }
}
