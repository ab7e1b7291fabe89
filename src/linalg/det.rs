use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;

fn require_square(m: &Matrix, op: &'static str) -> Result<()> {
    if !m.is_square() {
        return Err(LinalgError::NotSquare {
            op,
            shape: m.shape(),
        });
    }
    Ok(())
}

/// Cofactor sign `(-1)^(i+j)`.
#[inline]
fn sign(i: usize, j: usize) -> f64 {
    if (i + j) % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

impl Matrix {
    /// Determinant.
    ///
    /// Closed forms up to 3x3, Laplace expansion along the first row above
    /// that. The expansion costs O(n!), so keep `n` small (≤ 8 or so). The
    /// empty matrix has determinant 0.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let a = Matrix::from([[6.0, 1.0, 1.0], [4.0, -2.0, 5.0], [2.0, 8.0, 7.0]]);
    /// assert_eq!(a.determinant().unwrap(), -306.0);
    /// ```
    pub fn determinant(&self) -> Result<f64> {
        require_square(self, "determinant")?;
        Ok(self.det_unchecked())
    }

    fn det_unchecked(&self) -> f64 {
        let a = |i, j| self[(i, j)];
        match self.nrows() {
            0 => 0.0,
            1 => a(0, 0),
            2 => a(0, 0) * a(1, 1) - a(0, 1) * a(1, 0),
            3 => {
                a(0, 0) * (a(1, 1) * a(2, 2) - a(1, 2) * a(2, 1))
                    - a(0, 1) * (a(1, 0) * a(2, 2) - a(1, 2) * a(2, 0))
                    + a(0, 2) * (a(1, 0) * a(2, 1) - a(1, 1) * a(2, 0))
            }
            n => (0..n)
                .filter(|&j| a(0, j) != 0.0)
                .map(|j| sign(0, j) * a(0, j) * self.minor_unchecked(0, j).det_unchecked())
                .sum(),
        }
    }

    /// The matrix with row `i` and column `j` removed.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let m = Matrix::<f64>::identity(3).minor(0, 1).unwrap();
    /// assert_eq!(m.to_rows(), vec![vec![0.0, 0.0], vec![0.0, 1.0]]);
    /// ```
    pub fn minor(&self, i: usize, j: usize) -> Result<Matrix> {
        require_square(self, "minor")?;
        for index in [i, j] {
            if index >= self.nrows() {
                return Err(LinalgError::InvalidIndex {
                    op: "minor",
                    index,
                    len: self.nrows(),
                });
            }
        }
        Ok(self.minor_unchecked(i, j))
    }

    fn minor_unchecked(&self, i: usize, j: usize) -> Matrix {
        let n = self.nrows();
        Matrix::from_fn(n - 1, n - 1, |r, c| {
            let r = if r < i { r } else { r + 1 };
            let c = if c < j { c } else { c + 1 };
            self[(r, c)]
        })
    }

    /// Matrix of cofactors `(-1)^(i+j) det(minor(i, j))`.
    ///
    /// A 1x1 matrix has cofactor matrix `[[1]]`.
    pub fn cofactor_matrix(&self) -> Result<Matrix> {
        require_square(self, "cofactor_matrix")?;
        let n = self.nrows();
        if n == 1 {
            return Ok(Matrix::identity(1));
        }
        Ok(Matrix::from_fn(n, n, |i, j| {
            sign(i, j) * self.minor_unchecked(i, j).det_unchecked()
        }))
    }

    /// Transpose of the cofactor matrix.
    pub fn adjugate(&self) -> Result<Matrix> {
        require_square(self, "adjugate")?;
        Ok(self.cofactor_matrix()?.transpose())
    }

    /// `adjugate / det`. Fails with [`LinalgError::Singular`] when the
    /// determinant is exactly zero.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let a = Matrix::from([[4.0, -1.0], [-2.0, 0.0]]);
    /// let inv = a.inverse_by_determinant().unwrap();
    /// assert_eq!(inv.to_rows(), vec![vec![0.0, -0.5], vec![-1.0, -2.0]]);
    /// ```
    pub fn inverse_by_determinant(&self) -> Result<Matrix> {
        let det = self.determinant()?;
        if det == 0.0 {
            return Err(LinalgError::Singular);
        }
        Ok(self.adjugate()?.scale(1.0 / det))
    }

    /// Square with a non-zero determinant; exactly the matrices
    /// [`inverse_by_determinant`](Self::inverse_by_determinant) accepts.
    pub fn is_invertible(&self) -> bool {
        self.determinant().is_ok_and(|det| det != 0.0)
    }
}
