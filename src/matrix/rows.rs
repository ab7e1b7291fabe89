use crate::error::{LinalgError, Result};
use crate::traits::Scalar;

use super::Matrix;

// ── Elementary row operations (copy-on-write) ───────────────────────

impl<T: Scalar> Matrix<T> {
    fn check_row(&self, op: &'static str, i: usize) -> Result<()> {
        if i >= self.nrows {
            return Err(LinalgError::InvalidIndex {
                op,
                index: i,
                len: self.nrows,
            });
        }
        Ok(())
    }

    /// Return a copy with rows `i` and `j` exchanged.
    ///
    /// ```
    /// use echelon::Matrix;
    /// let m = Matrix::from([[1.0, 2.0], [3.0, 4.0]]);
    /// let s = m.swap_rows(0, 1).unwrap();
    /// assert_eq!(s.to_rows(), vec![vec![3.0, 4.0], vec![1.0, 2.0]]);
    /// assert_eq!(m[(0, 0)], 1.0); // original untouched
    /// ```
    pub fn swap_rows(&self, i: usize, j: usize) -> Result<Self> {
        self.check_row("swap_rows", i)?;
        self.check_row("swap_rows", j)?;
        let mut out = self.clone();
        out.swap_rows_in_place(i, j);
        Ok(out)
    }

    /// Return a copy with row `i` multiplied by `k`.
    pub fn scale_row(&self, i: usize, k: T) -> Result<Self> {
        self.check_row("scale_row", i)?;
        let mut out = self.clone();
        out.scale_row_in_place(i, k);
        Ok(out)
    }

    /// Return a copy with `row` added element-wise to row `i`.
    ///
    /// `row` must have exactly `ncols` entries.
    pub fn add_to_row(&self, i: usize, row: &[T]) -> Result<Self> {
        self.check_row("add_to_row", i)?;
        if row.len() != self.ncols {
            return Err(LinalgError::ShapeMismatch {
                op: "add_to_row",
                left: (1, self.ncols),
                right: (1, row.len()),
            });
        }
        let mut out = self.clone();
        for (a, &b) in out.row_mut(i).iter_mut().zip(row) {
            *a = *a + b;
        }
        Ok(out)
    }

    // ── In-place helpers for the elimination engines ───────────────

    pub(crate) fn swap_rows_in_place(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let n = self.ncols;
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        let (head, tail) = self.data.split_at_mut(hi * n);
        head[lo * n..(lo + 1) * n].swap_with_slice(&mut tail[..n]);
    }

    pub(crate) fn scale_row_in_place(&mut self, i: usize, k: T) {
        for x in self.row_mut(i) {
            *x = *x * k;
        }
    }

    /// `row[target] -= factor * row[source]`, with `target != source`.
    pub(crate) fn sub_scaled_row_in_place(&mut self, target: usize, source: usize, factor: T) {
        debug_assert_ne!(target, source);
        let n = self.ncols;
        for j in 0..n {
            let s = self.data[source * n + j];
            let t = &mut self.data[target * n + j];
            *t = *t - factor * s;
        }
    }

    /// Reorder rows so that new row `k` is old row `order[k]`.
    pub(crate) fn permute_rows(&self, order: &[usize]) -> Self {
        debug_assert_eq!(order.len(), self.nrows);
        let mut data = Vec::with_capacity(self.data.len());
        for &i in order {
            data.extend_from_slice(self.row(i));
        }
        Self {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}
