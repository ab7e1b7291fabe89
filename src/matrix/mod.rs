mod ops;
mod rows;
mod util;

pub use util::complex_to_real_vector;

use core::ops::{Index, IndexMut};

use crate::error::{LinalgError, Result};
use crate::traits::Scalar;

/// Dense heap-allocated matrix with runtime dimensions.
///
/// Row-major `Vec<T>` storage: row-oriented algorithms (elimination, row
/// swaps, row sorting) work on contiguous slices. Every public operation
/// takes `&self` and returns a new value; nothing mutates a caller's matrix.
///
/// The element type defaults to `f64`. `Matrix<Complex<f64>>` is used by the
/// eigenvector solver.
///
/// # Examples
///
/// ```
/// use echelon::Matrix;
///
/// let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 2);
///
/// let id: Matrix<f64> = Matrix::identity(3);
/// assert_eq!(id[(2, 2)], 1.0);
/// assert_eq!(id[(0, 2)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T = f64> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Create an `nrows x ncols` matrix of zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create an `n x n` identity matrix. `identity(0)` is the empty matrix.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let id: Matrix = Matrix::identity(2);
    /// assert_eq!(id.to_rows(), vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    /// assert!(Matrix::<f64>::identity(0).is_empty());
    /// ```
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Create a matrix from nested rows.
    ///
    /// Fails with [`LinalgError::Ragged`] if the rows have different lengths.
    /// An empty outer vector gives the `0 x 0` matrix.
    ///
    /// ```
    /// use echelon::{LinalgError, Matrix};
    /// let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    /// assert_eq!(m.shape(), (2, 3));
    ///
    /// let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
    /// assert!(matches!(err, LinalgError::Ragged { row: 1, .. }));
    /// ```
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(LinalgError::Ragged {
                    row: i,
                    expected: ncols,
                    got: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self { data, nrows, ncols })
    }

    /// Create a matrix from an owned `Vec<T>` in row-major order.
    ///
    /// Panics if `data.len() != nrows * ncols`.
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            nrows * ncols,
            "vec length {} does not match {}x{} matrix",
            data.len(),
            nrows,
            ncols,
        );
        Self { data, nrows, ncols }
    }

    /// Create an `n x 1` column matrix from a vector.
    pub fn from_column(v: &[T]) -> Self {
        Self {
            data: v.to_vec(),
            nrows: v.len(),
            ncols: 1,
        }
    }

    /// Build a diagonal matrix from its diagonal entries.
    pub fn from_diagonal(diag: &[T]) -> Self {
        let mut m = Self::zeros(diag.len(), diag.len());
        for (i, &d) in diag.iter().enumerate() {
            m[(i, i)] = d;
        }
        m
    }

    /// Nested-row copy of the matrix.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }

    /// Copy of column `j` as a vector.
    pub fn column_vec(&self, j: usize) -> Result<Vec<T>> {
        if j >= self.ncols {
            return Err(LinalgError::InvalidIndex {
                op: "column",
                index: j,
                len: self.ncols,
            });
        }
        Ok((0..self.nrows).map(|i| self[(i, j)]).collect())
    }

    /// Column `j` as an `nrows x 1` matrix.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m.column(1).unwrap().to_rows(), vec![vec![2.0], vec![4.0]]);
    /// assert!(m.column(2).is_err());
    /// ```
    pub fn column(&self, j: usize) -> Result<Self> {
        self.column_vec(j).map(|c| Self::from_column(&c))
    }
}

impl<T> Matrix<T> {
    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let m = Matrix::from_fn(2, 2, |i, j| (i * 2 + j) as f64);
    /// assert_eq!(m[(1, 0)], 2.0);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// `(nrows, ncols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Whether the matrix has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the matrix is square. The empty matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Row `i` as a slice. Panics if out of range.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    #[inline]
    pub(crate) fn row_mut(&mut self, i: usize) -> &mut [T] {
        &mut self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    /// Iterate over the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.nrows).map(move |i| self.row(i))
    }

    /// Row-major view of all elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.nrows && col < self.ncols,
            "index ({row}, {col}) out of range for {}x{} matrix",
            self.nrows,
            self.ncols
        );
        &self.data[row * self.ncols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.nrows && col < self.ncols,
            "index ({row}, {col}) out of range for {}x{} matrix",
            self.nrows,
            self.ncols
        );
        &mut self.data[row * self.ncols + col]
    }
}

impl<T: Scalar> TryFrom<Vec<Vec<T>>> for Matrix<T> {
    type Error = LinalgError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl<T: Scalar, const M: usize, const N: usize> From<[[T; N]; M]> for Matrix<T> {
    /// Convert a nested array literal into a matrix.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let m = Matrix::from([[1.0, 2.0], [3.0, 4.0]]);
    /// assert_eq!(m[(1, 1)], 4.0);
    /// ```
    fn from(rows: [[T; N]; M]) -> Self {
        let mut data = Vec::with_capacity(M * N);
        for row in rows.iter() {
            data.extend_from_slice(row);
        }
        Self {
            data,
            nrows: M,
            ncols: N,
        }
    }
}
