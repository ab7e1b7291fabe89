use core::fmt;

use num_complex::Complex;

use crate::tolerance::{is_negligible, DEFAULT_DECIMALS};
use crate::traits::LinalgScalar;

use super::Matrix;

// ── Predicates ──────────────────────────────────────────────────────

impl<T: LinalgScalar> Matrix<T> {
    /// Whether every element is within the default tolerance of zero.
    ///
    /// The empty matrix counts as zero.
    pub fn is_zero(&self) -> bool {
        self.data
            .iter()
            .all(|&x| is_negligible(x, DEFAULT_DECIMALS))
    }

    /// Shape equality plus element-wise `|a - b| <= 10^(-decimals)`.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let a = Matrix::from([[1.0, 2.0]]);
    /// let b = Matrix::from([[1.0 + 1e-12, 2.0]]);
    /// assert!(a.approx_eq(&b, 10));
    /// assert!(!a.approx_eq(&a.transpose(), 10));
    /// ```
    pub fn approx_eq(&self, other: &Self, decimals: u32) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| is_negligible(a - b, decimals))
    }
}

// ── Real / complex conversions ──────────────────────────────────────

impl Matrix<f64> {
    /// Promote every element to `Complex<f64>` with zero imaginary part.
    pub fn to_complex(&self) -> Matrix<Complex<f64>> {
        Matrix {
            data: self.data.iter().map(|&x| Complex::new(x, 0.0)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

impl Matrix<Complex<f64>> {
    /// Real parts of every element.
    ///
    /// ```
    /// use echelon::Matrix;
    /// use num_complex::Complex;
    /// let z = Matrix::from([[Complex::new(1.0, 2.0), Complex::new(-3.0, 0.5)]]);
    /// assert_eq!(z.re().to_rows(), vec![vec![1.0, -3.0]]);
    /// ```
    pub fn re(&self) -> Matrix<f64> {
        Matrix {
            data: self.data.iter().map(|z| z.re).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

/// Real parts of a complex vector.
pub fn complex_to_real_vector(v: &[Complex<f64>]) -> Vec<f64> {
    v.iter().map(|z| z.re).collect()
}

// ── Display ─────────────────────────────────────────────────────────

/// One line per row, each entry followed by a single space.
///
/// This is the text format read back by [`crate::io::load`].
impl fmt::Display for Matrix<f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for x in row {
                write!(f, "{} ", x)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
