use log::{debug, trace};
use num_complex::Complex;

use crate::echelon::reduce::kernel;
use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;
use crate::tolerance::{is_negligible, DEFAULT_DECIMALS};

use super::schur::{block_diagonal_eigenvalues, block_eigenvalues, quasi_triangular_form};

/// Tuning knobs for the eigen engine.
///
/// ```
/// use echelon::linalg::EigenSettings;
/// let s = EigenSettings {
///     max_iterations: 200,
///     ..EigenSettings::default()
/// };
/// assert_eq!(s.deflation_tolerance, 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenSettings {
    /// Cap on QR iterations for matrices larger than 2x2.
    pub max_iterations: usize,
    /// Sub-diagonal entries at or below this are treated as converged zeros.
    pub deflation_tolerance: f64,
    /// Eigenvalues closer than `10^-grouping_decimals` share one eigenspace.
    pub grouping_decimals: u32,
    /// Zero threshold used while solving `(A - λI) v = 0`. Looser than the
    /// structural default because iterated eigenvalues carry error.
    pub solver_decimals: u32,
}

impl Default for EigenSettings {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            deflation_tolerance: 1e-9,
            grouping_decimals: 6,
            solver_decimals: 6,
        }
    }
}

impl Matrix {
    /// Eigenvalues with default [`EigenSettings`].
    ///
    /// Closed form for n ≤ 2 (`+√disc` root first, `+i` first for a complex
    /// pair). Larger matrices go through unshifted QR iteration and are read
    /// off the resulting 1x1 and 2x2 diagonal blocks, top to bottom. The
    /// result is not sorted.
    ///
    /// ```
    /// use echelon::Matrix;
    /// use num_complex::Complex;
    /// let a = Matrix::from([[0.0, -1.0], [1.0, 0.0]]);
    /// assert_eq!(
    ///     a.eigenvalues().unwrap(),
    ///     vec![Complex::new(0.0, 1.0), Complex::new(0.0, -1.0)]
    /// );
    /// ```
    pub fn eigenvalues(&self) -> Result<Vec<Complex<f64>>> {
        self.eigenvalues_with(&EigenSettings::default())
    }

    /// Eigenvalues using the iteration cap and deflation tolerance from
    /// `settings`.
    pub fn eigenvalues_with(&self, settings: &EigenSettings) -> Result<Vec<Complex<f64>>> {
        if !self.is_square() {
            return Err(LinalgError::NotSquare {
                op: "eigenvalues",
                shape: self.shape(),
            });
        }
        let a = |i, j| self[(i, j)];
        Ok(match self.nrows() {
            0 => Vec::new(),
            1 => vec![Complex::new(a(0, 0), 0.0)],
            2 => block_eigenvalues(a(0, 0), a(0, 1), a(1, 0), a(1, 1)).to_vec(),
            _ => {
                let tol = settings.deflation_tolerance;
                let t = quasi_triangular_form(self, settings.max_iterations, tol)?;
                block_diagonal_eigenvalues(&t, tol)
            }
        })
    }

    /// Eigenvectors with default [`EigenSettings`]; entry `i` belongs to
    /// `eigenvalues()[i]`.
    ///
    /// Every vector has unit norm and a canonical sign (see
    /// [`normalize_eigenvector`]). A repeated eigenvalue hands out the basis
    /// vectors of its eigenspace in order; once they run out (defective
    /// matrix) the remaining slots get zero vectors.
    pub fn eigenvectors(&self) -> Result<Vec<Vec<Complex<f64>>>> {
        self.eigenvectors_with(&EigenSettings::default())
    }

    /// Eigenvectors using `settings` for the eigenvalues, the grouping of
    /// repeated values and the null-space solve.
    pub fn eigenvectors_with(&self, settings: &EigenSettings) -> Result<Vec<Vec<Complex<f64>>>> {
        let values = self.eigenvalues_with(settings)?;
        let n = self.nrows();
        let mut spaces: Vec<Eigenspace> = Vec::new();
        let mut out = Vec::with_capacity(values.len());

        for lambda in values {
            let idx = match spaces
                .iter()
                .position(|s| is_negligible(s.value - lambda, settings.grouping_decimals))
            {
                Some(idx) => idx,
                None => {
                    trace!("solving eigenspace for λ = {lambda}");
                    spaces.push(Eigenspace::solve(self, lambda, settings.solver_decimals));
                    spaces.len() - 1
                }
            };
            out.push(spaces[idx].next_vector().unwrap_or_else(|| {
                debug!("eigenspace for λ = {lambda} exhausted, using zero vector");
                vec![Complex::new(0.0, 0.0); n]
            }));
        }
        Ok(out)
    }
}

/// Basis of one eigenspace, handed out one vector at a time.
struct Eigenspace {
    value: Complex<f64>,
    basis: Vec<Vec<Complex<f64>>>,
    next: usize,
}

impl Eigenspace {
    fn solve(a: &Matrix, lambda: Complex<f64>, decimals: u32) -> Self {
        let n = a.nrows();
        let basis = if is_negligible(lambda.im, decimals) {
            let shifted = Matrix::from_fn(n, n, |i, j| {
                if i == j {
                    a[(i, j)] - lambda.re
                } else {
                    a[(i, j)]
                }
            });
            kernel(&shifted, decimals)
                .into_iter()
                .map(|v| v.into_iter().map(|x| Complex::new(x, 0.0)).collect())
                .collect()
        } else {
            let shifted = Matrix::from_fn(n, n, |i, j| {
                let x = Complex::new(a[(i, j)], 0.0);
                if i == j {
                    x - lambda
                } else {
                    x
                }
            });
            kernel(&shifted, decimals)
        };
        let basis = basis
            .iter()
            .map(|v| normalize_with(v, decimals))
            .collect();
        Self {
            value: lambda,
            basis,
            next: 0,
        }
    }

    fn next_vector(&mut self) -> Option<Vec<Complex<f64>>> {
        let v = self.basis.get(self.next).cloned();
        self.next += 1;
        v
    }
}

// ── Complex homogeneous systems ─────────────────────────────────────

/// Basis of `{ x : A x = 0 }` over the complex numbers, by Gauss-Jordan
/// elimination. One vector per free column, in column order.
pub fn complex_null_space(a: &Matrix<Complex<f64>>) -> Vec<Vec<Complex<f64>>> {
    kernel(a, DEFAULT_DECIMALS)
}

/// One non-trivial solution of `A x = 0`: the first free column set to 1
/// and the pivot variables back-substituted. Returns the zero vector when
/// the only solution is trivial.
///
/// ```
/// use echelon::linalg::solve_complex_homogeneous;
/// use echelon::Matrix;
/// use num_complex::Complex;
///
/// let a = Matrix::from([[1.0, -1.0], [2.0, -2.0]]).to_complex();
/// assert_eq!(solve_complex_homogeneous(&a), vec![Complex::new(1.0, 0.0); 2]);
/// ```
pub fn solve_complex_homogeneous(a: &Matrix<Complex<f64>>) -> Vec<Complex<f64>> {
    complex_null_space(a)
        .into_iter()
        .next()
        .unwrap_or_else(|| vec![Complex::new(0.0, 0.0); a.ncols()])
}

// ── Normalization & checks ──────────────────────────────────────────

fn normalize_with(v: &[Complex<f64>], decimals: u32) -> Vec<Complex<f64>> {
    let norm = v.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt();
    if is_negligible(norm, decimals) {
        return v.to_vec();
    }
    let mut out: Vec<Complex<f64>> = v.iter().map(|&z| z / norm).collect();
    let lead = out.iter().find(|z| !is_negligible(**z, decimals));
    let flip = match lead {
        Some(z) if is_negligible(z.re, decimals) => z.im < 0.0,
        Some(z) => z.re < 0.0,
        None => false,
    };
    if flip {
        out.iter_mut().for_each(|z| *z = -*z);
    }
    // Negated zeros print as `-0`.
    for z in &mut out {
        if z.re == 0.0 {
            z.re = 0.0;
        }
        if z.im == 0.0 {
            z.im = 0.0;
        }
    }
    out
}

/// Scale `v` to unit norm and fix its sign.
///
/// The first coordinate that is not negligible ends up with a non-negative
/// real part, or a non-negative imaginary part when its real part is about
/// zero. The zero vector is returned unchanged.
///
/// ```
/// use echelon::linalg::normalize_eigenvector;
/// use num_complex::Complex;
/// let v = normalize_eigenvector(&[Complex::new(3.0, 4.0), Complex::new(0.0, 0.0)]);
/// assert_eq!(v[0], Complex::new(0.6, 0.8));
/// ```
pub fn normalize_eigenvector(v: &[Complex<f64>]) -> Vec<Complex<f64>> {
    normalize_with(v, DEFAULT_DECIMALS)
}

/// Whether `M v ≈ λ v` to `decimals` places in every coordinate.
pub fn validate_eigenpair(
    m: &Matrix,
    lambda: Complex<f64>,
    v: &[Complex<f64>],
    decimals: u32,
) -> Result<bool> {
    let mv = m.to_complex().mul_vector(v)?;
    Ok(mv
        .iter()
        .zip(v)
        .all(|(&lhs, &x)| is_negligible(lhs - lambda * x, decimals)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    fn r(re: f64) -> Complex<f64> {
        Complex::new(re, 0.0)
    }

    fn assert_vectors_near(got: &[Vec<Complex<f64>>], want: &[Vec<Complex<f64>>]) {
        assert_eq!(got.len(), want.len(), "got {got:?}");
        for (g, w) in got.iter().zip(want) {
            assert_eq!(g.len(), w.len());
            for (a, b) in g.iter().zip(w) {
                assert!((a - b).norm() < 1e-6, "got {got:?}, want {want:?}");
            }
        }
    }

    fn assert_values_near(got: &[Complex<f64>], want: &[Complex<f64>]) {
        assert_eq!(got.len(), want.len(), "got {got:?}");
        for (a, b) in got.iter().zip(want) {
            assert!((a - b).norm() < 1e-6, "got {got:?}, want {want:?}");
        }
    }

    // ── eigenvalues ─────────────────────────────────────────────────

    #[test]
    fn eigenvalues_small() {
        assert!(Matrix::<f64>::zeros(0, 0).eigenvalues().unwrap().is_empty());
        assert_eq!(Matrix::from([[-5.0]]).eigenvalues().unwrap(), vec![r(-5.0)]);
        assert_eq!(Matrix::<f64>::identity(2).eigenvalues().unwrap(), vec![r(1.0), r(1.0)]);
        assert_eq!(
            Matrix::from([[3.0, 0.0], [0.0, 4.0]]).eigenvalues().unwrap(),
            vec![r(4.0), r(3.0)]
        );
        assert_eq!(
            Matrix::from([[2.0, 1.0], [1.0, 2.0]]).eigenvalues().unwrap(),
            vec![r(3.0), r(1.0)]
        );
        assert_eq!(
            Matrix::from([[2.0, 1.0], [0.0, 2.0]]).eigenvalues().unwrap(),
            vec![r(2.0), r(2.0)]
        );
        assert_eq!(
            Matrix::from([[4.0, 2.0], [1.0, 3.0]]).eigenvalues().unwrap(),
            vec![r(5.0), r(2.0)]
        );
    }

    #[test]
    fn eigenvalues_triangular_fixed_points() {
        let a = Matrix::from([[1.0, 2.0, 3.0], [0.0, 4.0, 5.0], [0.0, 0.0, 6.0]]);
        assert_values_near(&a.eigenvalues().unwrap(), &[r(1.0), r(4.0), r(6.0)]);
        let a = Matrix::from([[2.0, 1.0, 0.0], [0.0, 2.0, 1.0], [0.0, 0.0, 2.0]]);
        assert_values_near(&a.eigenvalues().unwrap(), &[r(2.0); 3]);
        let a = Matrix::from([[5.0, 1.0, 0.0], [0.0, 5.0, 1.0], [0.0, 0.0, 5.0]]);
        assert_values_near(&a.eigenvalues().unwrap(), &[r(5.0); 3]);
    }

    #[test]
    fn eigenvalues_complex_blocks() {
        let a = Matrix::from([[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 3.0]]);
        assert_values_near(&a.eigenvalues().unwrap(), &[c(0.0, 1.0), c(0.0, -1.0), r(3.0)]);

        let a = Matrix::from([
            [0.0, -2.0, 0.0, 0.0],
            [2.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 1.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert_values_near(
            &a.eigenvalues().unwrap(),
            &[c(0.0, 2.0), c(0.0, -2.0), r(1.0), r(1.0)],
        );
    }

    #[test]
    fn eigenvalues_by_iteration() {
        let a = Matrix::from([[4.0, 1.0, 2.0], [1.0, 3.0, 0.0], [2.0, 0.0, 5.0]]);
        let ev = a.eigenvalues().unwrap();
        let trace: f64 = ev.iter().map(|z| z.re).sum();
        assert!((trace - 12.0).abs() < 1e-8);
        let det: Complex<f64> = ev.iter().product();
        assert!((det.re - a.determinant().unwrap()).abs() < 1e-6);
        for z in &ev {
            assert!(z.im.abs() < 1e-12);
        }
    }

    #[test]
    fn eigenvalues_rectangular() {
        let err = Matrix::from([[1.0, 2.0]]).eigenvalues().unwrap_err();
        assert!(matches!(err, LinalgError::NotSquare { op: "eigenvalues", .. }));
    }

    #[test]
    fn iteration_cap_is_not_an_error() {
        let a = Matrix::from([[2.0, 1.0, 0.0], [1.0, 2.0, 1.0], [0.0, 1.0, 2.0]]);
        let settings = EigenSettings {
            max_iterations: 1,
            ..EigenSettings::default()
        };
        assert_eq!(a.eigenvalues_with(&settings).unwrap().len(), 3);
    }

    // ── eigenvectors ────────────────────────────────────────────────

    #[test]
    fn eigenvectors_small() {
        assert!(Matrix::<f64>::zeros(0, 0).eigenvectors().unwrap().is_empty());
        assert_vectors_near(&Matrix::from([[7.0]]).eigenvectors().unwrap(), &[vec![r(1.0)]]);
        assert_vectors_near(
            &Matrix::<f64>::identity(2).eigenvectors().unwrap(),
            &[vec![r(1.0), r(0.0)], vec![r(0.0), r(1.0)]],
        );
        assert_vectors_near(
            &Matrix::from([[3.0, 0.0], [0.0, 4.0]]).eigenvectors().unwrap(),
            &[vec![r(0.0), r(1.0)], vec![r(1.0), r(0.0)]],
        );
    }

    #[test]
    fn eigenvectors_symmetric() {
        let h = 1.0 / 2f64.sqrt();
        assert_vectors_near(
            &Matrix::from([[2.0, 1.0], [1.0, 2.0]]).eigenvectors().unwrap(),
            &[vec![r(h), r(h)], vec![r(h), r(-h)]],
        );
    }

    #[test]
    fn eigenvectors_repeated_eigenvalue_spans_eigenspace() {
        let a = Matrix::from([[2.0, 1.0, 1.0], [1.0, 2.0, 1.0], [1.0, 1.0, 2.0]]);
        let values = a.eigenvalues().unwrap();
        let vectors = a.eigenvectors().unwrap();
        assert_eq!(values.iter().filter(|z| (z.re - 1.0).abs() < 1e-6).count(), 2);
        assert_eq!(values.iter().filter(|z| (z.re - 4.0).abs() < 1e-6).count(), 1);
        for (lambda, v) in values.iter().zip(&vectors) {
            let norm = v.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9, "‖v‖ = {norm} for λ = {lambda}");
            assert!(v.iter().all(|z| z.im.abs() < 1e-9));
            assert!(validate_eigenpair(&a, *lambda, v, 6).unwrap());
        }
        let real = Matrix::from_rows(
            vectors
                .iter()
                .map(|v| v.iter().map(|z| z.re).collect())
                .collect(),
        )
        .unwrap();
        assert_eq!(crate::space::rank(&real), 3);
    }

    #[test]
    fn eigenvectors_large_nearly_repeated() {
        let a = Matrix::from([
            [690.264118286155, 8.54e-10],
            [8.54e-10, 690.2641182866686],
        ]);
        let values = a.eigenvalues().unwrap();
        assert!(values.iter().all(|z| z.im == 0.0), "{values:?}");
        let vectors = a.eigenvectors().unwrap();
        for (lambda, v) in values.iter().zip(&vectors) {
            let norm = v.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
            assert!(validate_eigenpair(&a, *lambda, v, 6).unwrap());
        }
    }

    #[test]
    fn eigenvectors_defective() {
        assert_vectors_near(
            &Matrix::from([[2.0, 1.0], [0.0, 2.0]]).eigenvectors().unwrap(),
            &[vec![r(1.0), r(0.0)], vec![r(0.0), r(0.0)]],
        );
    }

    #[test]
    fn eigenvectors_complex() {
        let h = 1.0 / 2f64.sqrt();
        assert_vectors_near(
            &Matrix::from([[0.0, -1.0], [1.0, 0.0]]).eigenvectors().unwrap(),
            &[vec![c(0.0, h), r(h)], vec![c(0.0, h), r(-h)]],
        );
        let a = Matrix::from([[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 5.0]]);
        assert_vectors_near(
            &a.eigenvectors().unwrap(),
            &[
                vec![c(0.0, h), r(h), r(0.0)],
                vec![c(0.0, h), r(-h), r(0.0)],
                vec![r(0.0), r(0.0), r(1.0)],
            ],
        );
    }

    #[test]
    fn eigenpairs_are_consistent() {
        let a = Matrix::from([[4.0, 1.0, 2.0], [1.0, 3.0, 0.0], [2.0, 0.0, 5.0]]);
        let values = a.eigenvalues().unwrap();
        let vectors = a.eigenvectors().unwrap();
        for (lambda, v) in values.iter().zip(&vectors) {
            assert!(v.iter().any(|z| z.norm() > 0.1));
            assert!(validate_eigenpair(&a, *lambda, v, 6).unwrap());
        }
    }

    // ── solver & helpers ────────────────────────────────────────────

    #[test]
    fn complex_homogeneous() {
        let unique = Matrix::from([[1.0, 2.0], [3.0, 4.0]]).to_complex();
        assert_eq!(solve_complex_homogeneous(&unique), vec![r(0.0); 2]);
        let id = Matrix::<f64>::identity(3).to_complex();
        assert_eq!(solve_complex_homogeneous(&id), vec![r(0.0); 3]);

        let a = Matrix::from([[1.0, 2.0, -1.0], [2.0, 4.0, -2.0], [3.0, 6.0, -3.0]]).to_complex();
        assert_values_near(&solve_complex_homogeneous(&a), &[r(-2.0), r(1.0), r(0.0)]);

        let a = Matrix::from([
            [c(0.0, -1.0), r(-1.0), r(0.0)],
            [r(1.0), c(0.0, -1.0), r(0.0)],
            [r(0.0), r(0.0), c(5.0, -1.0)],
        ]);
        assert_values_near(&solve_complex_homogeneous(&a), &[c(0.0, 1.0), r(1.0), r(0.0)]);
    }

    #[test]
    fn complex_null_space_basis() {
        let a = Matrix::from([[1.0, 2.0, -1.0], [2.0, 4.0, -2.0], [3.0, 6.0, -3.0]]).to_complex();
        assert_eq!(complex_null_space(&a).len(), 2);
    }

    #[test]
    fn normalization() {
        assert_values_near(
            &normalize_eigenvector(&[c(3.0, 4.0), r(0.0)]),
            &[c(0.6, 0.8), r(0.0)],
        );
        assert_values_near(
            &normalize_eigenvector(&[r(1.0), r(2.0), r(2.0)]),
            &[r(1.0 / 3.0), r(2.0 / 3.0), r(2.0 / 3.0)],
        );
        assert_eq!(normalize_eigenvector(&[r(0.0); 3]), vec![r(0.0); 3]);
        assert_values_near(
            &normalize_eigenvector(&[c(1.0, 1.0), c(1.0, -1.0)]),
            &[c(0.5, 0.5), c(0.5, -0.5)],
        );
    }

    #[test]
    fn normalization_fixes_sign() {
        assert_values_near(&normalize_eigenvector(&[r(-3.0), r(4.0)]), &[r(0.6), r(-0.8)]);
        assert_values_near(
            &normalize_eigenvector(&[c(0.0, -1.0), r(0.0)]),
            &[c(0.0, 1.0), r(0.0)],
        );
        // Leading zero coordinate is skipped.
        assert_values_near(&normalize_eigenvector(&[r(0.0), r(-2.0)]), &[r(0.0), r(1.0)]);
    }

    #[test]
    fn normalization_leaves_no_negative_zero() {
        let v = normalize_eigenvector(&[r(-1.0), r(0.0)]);
        assert_eq!(v, vec![r(1.0), r(0.0)]);
        assert!(v.iter().all(|z| z.re.is_sign_positive() && z.im.is_sign_positive()));
        let v = normalize_eigenvector(&[c(0.0, -2.0), r(0.0)]);
        assert_eq!(v, vec![c(0.0, 1.0), r(0.0)]);
        assert!(v.iter().all(|z| z.re.is_sign_positive() && z.im.is_sign_positive()));
    }

    #[test]
    fn eigenpair_validation() {
        let a = Matrix::from([[4.0, 2.0], [1.0, 3.0]]);
        assert!(validate_eigenpair(&a, r(5.0), &[r(2.0), r(1.0)], 10).unwrap());
        assert!(validate_eigenpair(&a, r(2.0), &[r(-1.0), r(1.0)], 10).unwrap());
        assert!(!validate_eigenpair(&a, r(2.0), &[r(2.0), r(1.0)], 10).unwrap());
        assert!(validate_eigenpair(&a, r(5.0), &[r(1.0)], 10).is_err());
    }
}
