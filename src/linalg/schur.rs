use log::debug;
use num_complex::Complex;

use crate::error::Result;
use crate::matrix::Matrix;
use crate::tolerance::{nearly_equal, DEFAULT_DECIMALS};

/// Eigenvalues of the 2x2 block `[[a, b], [c, d]]` by the quadratic formula
/// on `λ² - (a + d)λ + (ad - bc)`.
///
/// The discriminant is formed as `(a - d)² + 4bc`, which equals
/// `tr² - 4·det` without the cancellation, so a symmetric block never gets a
/// negative one. The `+√disc` root comes first; a complex pair is returned
/// with the positive imaginary part first.
pub(crate) fn block_eigenvalues(a: f64, b: f64, c: f64, d: f64) -> [Complex<f64>; 2] {
    let tr = a + d;
    let diff = a - d;
    let mut disc = diff * diff + 4.0 * b * c;
    // Round-off on a repeated root must not invent an imaginary pair.
    let scale = diff * diff + 4.0 * (b * c).abs();
    if disc < 0.0 && (nearly_equal(disc, 0.0, DEFAULT_DECIMALS) || -disc <= 8.0 * f64::EPSILON * scale) {
        disc = 0.0;
    }
    if disc >= 0.0 {
        let s = disc.sqrt();
        [
            Complex::new((tr + s) / 2.0, 0.0),
            Complex::new((tr - s) / 2.0, 0.0),
        ]
    } else {
        let s = (-disc).sqrt() / 2.0;
        [Complex::new(tr / 2.0, s), Complex::new(tr / 2.0, -s)]
    }
}

/// Whether `t` is upper triangular apart from isolated 2x2 diagonal blocks:
/// nothing below the first sub-diagonal, and no two adjacent sub-diagonal
/// entries above `tol`.
fn is_quasi_triangular(t: &Matrix, tol: f64) -> bool {
    let n = t.nrows();
    for i in 2..n {
        for j in 0..i - 1 {
            if t[(i, j)].abs() > tol {
                return false;
            }
        }
    }
    (2..n).all(|i| t[(i, i - 1)].abs() <= tol || t[(i - 1, i - 2)].abs() <= tol)
}

/// Unshifted QR iteration `A ← R Q` until `A` is quasi-upper-triangular or
/// `max_iterations` is reached.
///
/// Each step is a similarity transform, so eigenvalues are preserved. Not
/// converging is not an error: the last iterate is returned as is.
pub(crate) fn quasi_triangular_form(a: &Matrix, max_iterations: usize, tol: f64) -> Result<Matrix> {
    let mut t = a.clone();
    for k in 0..max_iterations {
        if is_quasi_triangular(&t, tol) {
            debug!("QR iteration converged after {k} steps ({}x{})", t.nrows(), t.ncols());
            return Ok(t);
        }
        t = t.qr()?.recombine();
    }
    if is_quasi_triangular(&t, tol) {
        debug!("QR iteration converged after {max_iterations} steps");
    } else {
        debug!("QR iteration hit the {max_iterations}-step cap without converging");
    }
    Ok(t)
}

/// Read eigenvalues off a quasi-triangular matrix, top to bottom.
///
/// Sub-diagonal entries at or below `tol` are treated as zero; a remaining
/// non-zero sub-diagonal entry starts a 2x2 block.
pub(crate) fn block_diagonal_eigenvalues(t: &Matrix, tol: f64) -> Vec<Complex<f64>> {
    let n = t.nrows();
    let mut out = Vec::with_capacity(n);
    let mut i = 0;
    while i < n {
        if i + 1 < n && t[(i + 1, i)].abs() > tol {
            out.extend(block_eigenvalues(
                t[(i, i)],
                t[(i, i + 1)],
                t[(i + 1, i)],
                t[(i + 1, i + 1)],
            ));
            i += 2;
        } else {
            out.push(Complex::new(t[(i, i)], 0.0));
            i += 1;
        }
    }
    out
}
