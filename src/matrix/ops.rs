use core::ops::{Add, Mul, Neg, Sub};

use crate::error::{LinalgError, Result};
use crate::traits::Scalar;

use super::Matrix;

impl<T: Scalar> Matrix<T> {
    fn check_same_shape(&self, op: &'static str, rhs: &Self) -> Result<()> {
        if self.shape() != rhs.shape() {
            return Err(LinalgError::ShapeMismatch {
                op,
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        Ok(())
    }

    fn zip_with(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Self {
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Matrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    fn map(&self, f: impl Fn(T) -> T) -> Self {
        Matrix {
            data: self.data.iter().map(|&a| f(a)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Element-wise sum. Shapes must match.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let a = Matrix::from([[-1.0, -1.0, -1.0]]);
    /// let b = Matrix::from([[1.0, 1.0, 1.0]]);
    /// assert!(a.add(&b).unwrap().is_zero());
    /// ```
    pub fn add(&self, rhs: &Self) -> Result<Self> {
        self.check_same_shape("add", rhs)?;
        Ok(self.zip_with(rhs, |a, b| a + b))
    }

    /// Element-wise difference. Shapes must match.
    pub fn sub(&self, rhs: &Self) -> Result<Self> {
        self.check_same_shape("sub", rhs)?;
        Ok(self.zip_with(rhs, |a, b| a - b))
    }

    /// Element-wise (Hadamard) product. Shapes must match.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let a = Matrix::from([[1.0, 2.0], [3.0, 4.0]]);
    /// let b = Matrix::from([[5.0, 6.0], [7.0, 8.0]]);
    /// assert_eq!(a.hadamard(&b).unwrap().to_rows(), vec![vec![5.0, 12.0], vec![21.0, 32.0]]);
    /// ```
    pub fn hadamard(&self, rhs: &Self) -> Result<Self> {
        self.check_same_shape("hadamard", rhs)?;
        Ok(self.zip_with(rhs, |a, b| a * b))
    }

    /// Multiply every element by `k`.
    pub fn scale(&self, k: T) -> Self {
        self.map(|a| a * k)
    }

    /// Whether `self * rhs` is defined (`ncols(self) == nrows(rhs)`).
    ///
    /// Two empty matrices can be multiplied.
    #[inline]
    pub fn can_multiply(&self, rhs: &Self) -> bool {
        self.ncols == rhs.nrows
    }

    /// Matrix product `self * rhs`.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let a = Matrix::from([[1.0, 2.0]]);
    /// let b = Matrix::from([[2.0], [3.0]]);
    /// assert_eq!(a.dot(&b).unwrap().to_rows(), vec![vec![8.0]]);
    /// assert!(b.dot(&b).is_err());
    /// ```
    pub fn dot(&self, rhs: &Self) -> Result<Self> {
        if !self.can_multiply(rhs) {
            return Err(LinalgError::ShapeMismatch {
                op: "dot",
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        Ok(self.matmul(rhs))
    }

    fn matmul(&self, rhs: &Self) -> Self {
        let (m, k, n) = (self.nrows, self.ncols, rhs.ncols);
        let mut out = Self::zeros(m, n);
        for i in 0..m {
            for p in 0..k {
                let a = self.data[i * k + p];
                if a == T::zero() {
                    continue;
                }
                let rhs_row = &rhs.data[p * n..(p + 1) * n];
                let out_row = &mut out.data[i * n..(i + 1) * n];
                for (o, &b) in out_row.iter_mut().zip(rhs_row) {
                    *o = *o + a * b;
                }
            }
        }
        out
    }

    /// Matrix-vector product, treating `v` as a column.
    pub fn mul_vector(&self, v: &[T]) -> Result<Vec<T>> {
        if v.len() != self.ncols {
            return Err(LinalgError::ShapeMismatch {
                op: "mul_vector",
                left: self.shape(),
                right: (v.len(), 1),
            });
        }
        Ok(self
            .rows()
            .map(|row| {
                row.iter()
                    .zip(v)
                    .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
            })
            .collect())
    }

    /// Transpose.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let m = Matrix::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    /// let t = m.transpose();
    /// assert_eq!(t.to_rows(), vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
    /// ```
    pub fn transpose(&self) -> Self {
        Matrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }

    /// Horizontal concatenation `[self | rhs]`.
    ///
    /// An empty operand yields a copy of the other one; otherwise the row
    /// counts must match.
    pub fn append(&self, rhs: &Self) -> Result<Self> {
        if self.nrows == 0 {
            return Ok(rhs.clone());
        }
        if rhs.nrows == 0 {
            return Ok(self.clone());
        }
        if self.nrows != rhs.nrows {
            return Err(LinalgError::ShapeMismatch {
                op: "append",
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        let ncols = self.ncols + rhs.ncols;
        let mut data = Vec::with_capacity(self.nrows * ncols);
        for i in 0..self.nrows {
            data.extend_from_slice(self.row(i));
            data.extend_from_slice(rhs.row(i));
        }
        Ok(Matrix {
            data,
            nrows: self.nrows,
            ncols,
        })
    }
}

// ── Operator overloads (panic on mismatch) ──────────────────────────

impl<T: Scalar> Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(
            self.ncols, rhs.nrows,
            "dimension mismatch: {}x{} * {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        self.matmul(rhs)
    }
}

impl Mul<f64> for &Matrix<f64> {
    type Output = Matrix<f64>;

    fn mul(self, k: f64) -> Matrix<f64> {
        self.scale(k)
    }
}

impl<T: Scalar> Add<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "dimension mismatch: {}x{} + {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl<T: Scalar> Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "dimension mismatch: {}x{} - {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self.map(|a| -a)
    }
}
