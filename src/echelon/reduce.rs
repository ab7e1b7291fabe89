//! Gauss-Jordan elimination core, generic over real and complex elements.

use crate::matrix::Matrix;
use crate::tolerance::is_negligible;
use crate::traits::LinalgScalar;

/// A matrix under reduction plus the running product of the row operations
/// applied to it, if that product is being tracked.
pub(crate) struct Elimination<T> {
    pub(crate) work: Matrix<T>,
    pub(crate) ops: Option<Matrix<T>>,
    decimals: u32,
}

impl<T: LinalgScalar> Elimination<T> {
    pub(crate) fn new(m: &Matrix<T>, decimals: u32) -> Self {
        Self {
            work: m.clone(),
            ops: None,
            decimals,
        }
    }

    /// Also accumulate every row operation on an identity matrix.
    pub(crate) fn tracking_ops(mut self) -> Self {
        self.ops = Some(Matrix::identity(self.work.nrows()));
        self
    }

    fn is_zero_row(&self, i: usize) -> bool {
        self.work
            .row(i)
            .iter()
            .all(|&x| is_negligible(x, self.decimals))
    }

    /// Reorder rows so that new row `k` is old row `order[k]`.
    pub(crate) fn permute(&mut self, order: &[usize]) {
        if order.iter().enumerate().all(|(k, &i)| k == i) {
            return;
        }
        self.work = self.work.permute_rows(order);
        if let Some(ops) = self.ops.as_mut() {
            *ops = ops.permute_rows(order);
        }
    }

    /// Stable partition: non-zero rows first, zero rows last.
    pub(crate) fn zero_rows_to_bottom(&mut self) {
        let (mut order, zeros): (Vec<usize>, Vec<usize>) =
            (0..self.work.nrows()).partition(|&i| !self.is_zero_row(i));
        order.extend(zeros);
        self.permute(&order);
    }

    fn scale_row(&mut self, i: usize, k: T) {
        self.work.scale_row_in_place(i, k);
        if let Some(ops) = self.ops.as_mut() {
            ops.scale_row_in_place(i, k);
        }
    }

    fn sub_scaled_row(&mut self, target: usize, source: usize, factor: T) {
        self.work.sub_scaled_row_in_place(target, source, factor);
        if let Some(ops) = self.ops.as_mut() {
            ops.sub_scaled_row_in_place(target, source, factor);
        }
    }

    fn leading_column(&self, i: usize) -> Option<usize> {
        self.work
            .row(i)
            .iter()
            .position(|&x| !is_negligible(x, self.decimals))
    }

    /// Normalize each row's leading entry to 1 and clear its column in every
    /// other row. Returns the `(row, col)` of each pivot in row order.
    ///
    /// Rows are not reordered here; pivots come out in the order the rows
    /// were found.
    pub(crate) fn reduce(&mut self) -> Vec<(usize, usize)> {
        self.zero_rows_to_bottom();
        let (nrows, ncols) = self.work.shape();
        let mut pivots = Vec::new();
        for i in 0..nrows {
            let Some(j) = self.leading_column(i) else {
                continue;
            };
            let pivot = self.work[(i, j)];
            self.scale_row(i, T::one() / pivot);
            self.work[(i, j)] = T::one();
            for z in 0..nrows {
                if z == i {
                    continue;
                }
                let factor = self.work[(z, j)];
                if is_negligible(factor, self.decimals) {
                    continue;
                }
                self.sub_scaled_row(z, i, factor);
                self.work[(z, j)] = T::zero();
            }
            pivots.push((i, j));
        }
        self.snap(ncols);
        pivots
    }

    /// Flush round-off residue so that later exact comparisons (row sort,
    /// zero-row tests) see clean zeros.
    fn snap(&mut self, ncols: usize) {
        for i in 0..self.work.nrows() {
            for j in 0..ncols {
                if is_negligible(self.work[(i, j)], self.decimals) {
                    self.work[(i, j)] = T::zero();
                }
            }
        }
    }
}

/// Basis of the null space of `m`, one vector per free column in ascending
/// column order.
///
/// For free column `c`: 1 at `c`, 0 at the other free columns, and minus the
/// reduced entry `[r][c]` at the pivot column of row `r`.
pub(crate) fn kernel<T: LinalgScalar>(m: &Matrix<T>, decimals: u32) -> Vec<Vec<T>> {
    let mut e = Elimination::new(m, decimals);
    let pivots = e.reduce();
    let ncols = m.ncols();
    let mut is_pivot = vec![false; ncols];
    for &(_, j) in &pivots {
        is_pivot[j] = true;
    }

    (0..ncols)
        .filter(|&c| !is_pivot[c])
        .map(|c| {
            let mut v = vec![T::zero(); ncols];
            v[c] = T::one();
            for &(row, col) in &pivots {
                let x = e.work[(row, c)];
                // Keep clean zeros positive.
                v[col] = if x == T::zero() { T::zero() } else { T::zero() - x };
            }
            v
        })
        .collect()
}
