use log::trace;

use crate::error::Result;
use crate::matrix::Matrix;

/// Residuals shorter than this are treated as zero during re-orthonormalization.
const DEPENDENT_NORM: f64 = 1e-12;

/// Singular value decomposition `A ≈ U · S · Vᵀ`.
///
/// For an `m x n` input, `u` is `m x n`, `s` is the `n x n` diagonal of
/// singular values and `v` is `n x n` with orthonormal columns. Singular
/// values follow the eigenvalue order of `AᵀA` and are not sorted.
///
/// ```
/// use echelon::Matrix;
/// let a = Matrix::from([[3.0, 1.0], [1.0, 3.0]]);
/// let svd = a.svd().unwrap();
/// assert!(svd.s.approx_eq(&Matrix::from_diagonal(&[4.0, 2.0]), 8));
/// let back = svd.u.dot(&svd.s).unwrap().dot(&svd.v.transpose()).unwrap();
/// assert!(back.approx_eq(&a, 8));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Svd {
    pub u: Matrix,
    pub s: Matrix,
    pub v: Matrix,
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Gram-Schmidt over `columns` in order. A column that collapses to zero
/// stays zero.
fn orthonormalize(columns: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
    let mut out: Vec<Vec<f64>> = Vec::with_capacity(columns.len());
    for mut v in columns {
        for q in &out {
            let c = dot(q, &v);
            for (x, qi) in v.iter_mut().zip(q) {
                *x -= c * qi;
            }
        }
        let len = dot(&v, &v).sqrt();
        if len > DEPENDENT_NORM {
            v.iter_mut().for_each(|x| *x /= len);
        } else {
            v.iter_mut().for_each(|x| *x = 0.0);
        }
        out.push(v);
    }
    out
}

impl Matrix {
    /// Singular value decomposition through the eigendecomposition of `AᵀA`.
    ///
    /// Eigenvalues of `AᵀA` below zero (round-off) are clamped before the
    /// square root. A zero singular value leaves a zero column in `U`. An
    /// empty input gives three empty matrices.
    pub fn svd(&self) -> Result<Svd> {
        let (m, n) = self.shape();
        if m == 0 || n == 0 {
            return Ok(Svd {
                u: Matrix::zeros(0, 0),
                s: Matrix::zeros(0, 0),
                v: Matrix::zeros(0, 0),
            });
        }

        let gram = self.transpose().dot(self)?;
        let values = gram.eigenvalues()?;
        let vectors = gram.eigenvectors()?;

        let sigma: Vec<f64> = values.iter().map(|l| l.re.max(0.0).sqrt()).collect();
        trace!("singular values {sigma:?}");

        let columns = orthonormalize(
            vectors
                .iter()
                .map(|v| v.iter().map(|z| z.re).collect())
                .collect(),
        );
        let v = Matrix::from_fn(n, n, |i, j| columns[j][i]);

        let av = self.dot(&v)?;
        let u = Matrix::from_fn(m, n, |i, j| {
            if sigma[j] > 0.0 {
                av[(i, j)] / sigma[j]
            } else {
                0.0
            }
        });

        Ok(Svd {
            u,
            s: Matrix::from_diagonal(&sigma),
            v,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(svd: &Svd) -> Matrix {
        svd.u
            .dot(&svd.s)
            .unwrap()
            .dot(&svd.v.transpose())
            .unwrap()
    }

    #[test]
    fn symmetric_two_by_two() {
        let a = Matrix::from([[3.0, 1.0], [1.0, 3.0]]);
        let svd = a.svd().unwrap();
        let h = 1.0 / 2f64.sqrt();
        let want = Matrix::from([[h, h], [h, -h]]);
        assert!(svd.u.approx_eq(&want, 3));
        assert!(svd.v.approx_eq(&want, 3));
        assert!(svd.s.approx_eq(&Matrix::from([[4.0, 0.0], [0.0, 2.0]]), 3));
    }

    #[test]
    fn tall_matrix_reconstructs() {
        let a = Matrix::from([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let svd = a.svd().unwrap();
        assert_eq!(svd.u.shape(), (3, 2));
        assert_eq!(svd.s.shape(), (2, 2));
        assert_eq!(svd.v.shape(), (2, 2));
        assert!(reconstruct(&svd).approx_eq(&a, 6));
        let vtv = svd.v.transpose().dot(&svd.v).unwrap();
        assert!(vtv.approx_eq(&Matrix::identity(2), 8));
    }

    #[test]
    fn repeated_singular_values_keep_v_orthogonal() {
        let svd = Matrix::<f64>::identity(3).svd().unwrap();
        assert!(svd.s.approx_eq(&Matrix::identity(3), 10));
        let vtv = svd.v.transpose().dot(&svd.v).unwrap();
        assert!(vtv.approx_eq(&Matrix::identity(3), 10));
    }

    #[test]
    fn rank_deficient_gives_zero_column() {
        let a = Matrix::from([[1.0, 1.0], [1.0, 1.0]]);
        let svd = a.svd().unwrap();
        let sigma: Vec<f64> = (0..2).map(|i| svd.s[(i, i)]).collect();
        assert!((sigma[0] - 2.0).abs() < 1e-8);
        assert!(sigma[1].abs() < 1e-6);
        assert!(reconstruct(&svd).approx_eq(&a, 6));
    }

    #[test]
    fn empty() {
        let svd = Matrix::<f64>::zeros(0, 0).svd().unwrap();
        assert!(svd.u.is_empty() && svd.s.is_empty() && svd.v.is_empty());
    }
}
