use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;

/// Columns shorter than this after projection count as dependent.
const DEPENDENT_NORM: f64 = 1e-12;

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Remove the components of `v` along each of `basis` (modified
/// Gram-Schmidt), returning the projection coefficients.
fn orthogonalize(v: &mut [f64], basis: &[Vec<f64>]) -> Vec<f64> {
    basis
        .iter()
        .map(|q| {
            let c = dot(q, v);
            for (x, qi) in v.iter_mut().zip(q) {
                *x -= c * qi;
            }
            c
        })
        .collect()
}

/// First standard basis vector with a component outside `span(basis)`,
/// orthonormalized against `basis`.
fn complete_basis(n: usize, basis: &[Vec<f64>]) -> Vec<f64> {
    let mut best = vec![0.0; n];
    let mut best_norm = 0.0;
    for k in 0..n {
        let mut e = vec![0.0; n];
        e[k] = 1.0;
        orthogonalize(&mut e, basis);
        let len = norm(&e);
        // Any residual above 1/2 is numerically safe; otherwise keep the best.
        if len > 0.5 {
            return e.into_iter().map(|x| x / len).collect();
        }
        if len > best_norm {
            best_norm = len;
            best = e;
        }
    }
    if best_norm > 0.0 {
        best.iter_mut().for_each(|x| *x /= best_norm);
    }
    best
}

/// Orthogonal-triangular factorization `A = Q R` by Gram-Schmidt.
///
/// `Q` is `m x n` with orthonormal columns and `R` is `n x n` upper
/// triangular with a non-negative diagonal. When a column of `A` depends on
/// the ones before it, the matching column of `Q` is filled from the
/// standard basis and the diagonal of `R` gets a zero, so `Q` stays
/// orthonormal for rank-deficient input.
///
/// ```
/// use echelon::Matrix;
/// let a = Matrix::from([[1.0, 2.0], [3.0, 4.0]]);
/// let qr = a.qr().unwrap();
/// assert!(qr.q().dot(qr.r()).unwrap().approx_eq(&a, 10));
/// ```
#[derive(Debug, Clone)]
pub struct QrDecomposition {
    q: Matrix,
    r: Matrix,
}

impl QrDecomposition {
    /// Factor an `m x n` matrix with `m >= n`.
    pub fn new(a: &Matrix) -> Result<Self> {
        let (m, n) = a.shape();
        if m < n {
            return Err(LinalgError::ShapeMismatch {
                op: "qr",
                left: (m, n),
                right: (n, n),
            });
        }
        let mut basis: Vec<Vec<f64>> = Vec::with_capacity(n);
        let mut r: Matrix = Matrix::zeros(n, n);

        for j in 0..n {
            let mut v = a.column_vec(j)?;
            let coeffs = orthogonalize(&mut v, &basis);
            for (i, c) in coeffs.into_iter().enumerate() {
                r[(i, j)] = c;
            }
            let len = norm(&v);
            if len > DEPENDENT_NORM {
                r[(j, j)] = len;
                basis.push(v.into_iter().map(|x| x / len).collect());
            } else {
                basis.push(complete_basis(m, &basis));
            }
        }

        let q = Matrix::from_fn(m, n, |i, j| basis[j][i]);
        Ok(Self { q, r })
    }

    /// The factor with orthonormal columns.
    pub fn q(&self) -> &Matrix {
        &self.q
    }

    /// The upper triangular factor.
    pub fn r(&self) -> &Matrix {
        &self.r
    }

    /// `R Q`: one step of the unshifted QR iteration.
    pub(crate) fn recombine(&self) -> Matrix {
        &self.r * &self.q
    }
}

impl Matrix {
    /// Gram-Schmidt QR factorization. See [`QrDecomposition`].
    pub fn qr(&self) -> Result<QrDecomposition> {
        QrDecomposition::new(self)
    }
}
