//! Row reduction: echelon forms, the elimination matrix and pivot entries.
//!
//! All reductions follow the same recipe:
//!
//! 1. Zero rows move to the bottom (stable).
//! 2. Each row's leading entry is scaled to 1 and its column is cleared in
//!    every other row.
//! 3. Rows are sorted lexicographically descending, which puts pivots in
//!    increasing column order and zero rows last.
//!
//! Entries within [`DEFAULT_DECIMALS`] of zero count as zero throughout.
//!
//! ```
//! use echelon::echelon as rref;
//! use echelon::Matrix;
//!
//! let a = Matrix::from([
//!     [1.0, -2.0, 4.0, -5.0],
//!     [0.0, 3.0, 5.0, 7.0],
//!     [-3.0, 6.0, 3.0, 9.0],
//!     [2.0, -4.0, -2.0, -6.0],
//! ]);
//! let r = rref::to_reduced_row_echelon_form(&a);
//! let want = Matrix::from([
//!     [1.0, 0.0, 0.0, 2.6],
//!     [0.0, 1.0, 0.0, 3.0],
//!     [0.0, 0.0, 1.0, -0.4],
//!     [0.0, 0.0, 0.0, 0.0],
//! ]);
//! assert!(r.approx_eq(&want, 10));
//! assert!(rref::is_reduced_row_echelon_form(&r));
//! ```

pub(crate) mod reduce;


use core::cmp::Ordering;

use crate::matrix::Matrix;
use crate::tolerance::{is_negligible, nearly_equal, DEFAULT_DECIMALS};

use reduce::Elimination;

fn is_zero_row(row: &[f64]) -> bool {
    row.iter().all(|&x| is_negligible(x, DEFAULT_DECIMALS))
}

fn leading_column(row: &[f64]) -> Option<usize> {
    row.iter().position(|&x| !is_negligible(x, DEFAULT_DECIMALS))
}

/// Lexicographic comparison, larger rows first.
fn descending(a: &[f64], b: &[f64]) -> Ordering {
    a.iter()
        .zip(b)
        .find(|(x, y)| x != y)
        .and_then(|(x, y)| y.partial_cmp(x))
        .unwrap_or(Ordering::Equal)
}

fn descending_order(m: &Matrix) -> Vec<usize> {
    let mut order: Vec<usize> = (0..m.nrows()).collect();
    order.sort_by(|&i, &j| descending(m.row(i), m.row(j)));
    order
}

// ── Row ordering ────────────────────────────────────────────────────

/// Move all-zero rows to the bottom, keeping the relative order of both the
/// non-zero and the zero rows.
///
/// ```
/// use echelon::echelon as rref;
/// use echelon::Matrix;
/// let m = Matrix::from([[0.0, 0.0], [1.0, 2.0], [0.0, 0.0], [3.0, 4.0]]);
/// let s = rref::swap_zero_rows_to_bottom(&m);
/// assert_eq!(s.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![0.0, 0.0], vec![0.0, 0.0]]);
/// ```
pub fn swap_zero_rows_to_bottom(m: &Matrix) -> Matrix {
    let mut e = Elimination::new(m, DEFAULT_DECIMALS);
    e.zero_rows_to_bottom();
    e.work
}

/// Stable sort of the rows in lexicographically descending order: the first
/// coordinate where two rows differ decides, larger first.
pub fn sort_rows_descending(m: &Matrix) -> Matrix {
    m.permute_rows(&descending_order(m))
}

// ── Reduction ───────────────────────────────────────────────────────

fn reduce_sorted(e: &mut Elimination<f64>) {
    e.reduce();
    let order = descending_order(&e.work);
    e.permute(&order);
}

/// Row-echelon form by Gaussian elimination.
///
/// Every pivot is normalized to 1 and cleared from the rest of its column,
/// so the result coincides with [`to_reduced_row_echelon_form`]; a reduced
/// form is also a valid echelon form. An all-zero matrix comes back
/// unchanged.
pub fn to_row_echelon_form(m: &Matrix) -> Matrix {
    to_reduced_row_echelon_form(m)
}

/// Reduced row-echelon form by Gauss-Jordan elimination.
pub fn to_reduced_row_echelon_form(m: &Matrix) -> Matrix {
    let mut e = Elimination::new(m, DEFAULT_DECIMALS);
    reduce_sorted(&mut e);
    e.work
}

/// Product of every elementary row operation applied while reducing `m` to
/// RREF, row permutations included.
///
/// `elimination_matrix(m) * m == rref(m)`. For an invertible square matrix
/// this is the inverse. Returns the empty matrix when `m` has no columns.
///
/// ```
/// use echelon::echelon as rref;
/// use echelon::Matrix;
/// let a = Matrix::from([[2.0, 4.0], [0.0, -3.0]]);
/// let e = rref::elimination_matrix(&a);
/// let want = Matrix::from([[0.5, 2.0 / 3.0], [0.0, -1.0 / 3.0]]);
/// assert!(e.approx_eq(&want, 10));
/// ```
pub fn elimination_matrix(m: &Matrix) -> Matrix {
    if m.ncols() == 0 {
        return Matrix::zeros(0, 0);
    }
    let mut e = Elimination::new(m, DEFAULT_DECIMALS).tracking_ops();
    reduce_sorted(&mut e);
    // `ops` is always set by `tracking_ops`.
    e.ops.unwrap_or_else(|| Matrix::identity(m.nrows()))
}

/// `(row, col)` of every pivot of a matrix already in echelon form.
///
/// Scans row-major with a row pointer and a column pointer: a non-zero entry
/// under both pointers is a pivot and advances the row pointer, and the
/// column pointer advances every step. At most one pivot per row.
pub fn pivot_entries(m: &Matrix) -> Vec<(usize, usize)> {
    let mut pivots = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < m.nrows() && j < m.ncols() {
        if !is_negligible(m[(i, j)], DEFAULT_DECIMALS) {
            pivots.push((i, j));
            i += 1;
        }
        j += 1;
    }
    pivots
}

// ── Predicates ──────────────────────────────────────────────────────

fn zero_rows_at_bottom(m: &Matrix) -> bool {
    let mut seen_zero = false;
    for row in m.rows() {
        if is_zero_row(row) {
            seen_zero = true;
        } else if seen_zero {
            return false;
        }
    }
    true
}

fn pivots_move_right(m: &Matrix) -> bool {
    let mut last: Option<usize> = None;
    for j in m.rows().filter_map(leading_column) {
        if last.is_some_and(|l| j <= l) {
            return false;
        }
        last = Some(j);
    }
    true
}

fn pivots_are_one(m: &Matrix) -> bool {
    m.rows()
        .filter_map(|row| leading_column(row).map(|j| row[j]))
        .all(|p| nearly_equal(p, 1.0, DEFAULT_DECIMALS))
}

fn pivot_columns_cleared(m: &Matrix) -> bool {
    m.rows().enumerate().all(|(i, row)| match leading_column(row) {
        None => true,
        Some(j) => (0..m.nrows())
            .filter(|&z| z != i)
            .all(|z| is_negligible(m[(z, j)], DEFAULT_DECIMALS)),
    })
}

/// Zero rows at the bottom and each pivot strictly right of the one above.
pub fn is_row_echelon_form(m: &Matrix) -> bool {
    zero_rows_at_bottom(m) && pivots_move_right(m)
}

/// Row-echelon form, every pivot 1, and every pivot alone in its column.
pub fn is_reduced_row_echelon_form(m: &Matrix) -> bool {
    is_row_echelon_form(m) && pivots_are_one(m) && pivot_columns_cleared(m)
}
