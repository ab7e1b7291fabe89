//! Rank, nullity and the fundamental subspaces, read off the RREF.

use crate::echelon::reduce::kernel;
use crate::echelon::{pivot_entries, to_reduced_row_echelon_form, to_row_echelon_form};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::tolerance::{is_negligible, DEFAULT_DECIMALS};

/// Number of pivots in the reduced row-echelon form.
///
/// ```
/// use echelon::{space, Matrix};
/// assert_eq!(space::rank(&Matrix::identity(100)), 100);
/// assert_eq!(space::rank(&Matrix::from([[1.0, 2.0], [2.0, 4.0]])), 1);
/// ```
pub fn rank(m: &Matrix) -> usize {
    pivot_entries(&to_reduced_row_echelon_form(m)).len()
}

/// `ncols - rank`.
pub fn nullity(m: &Matrix) -> usize {
    m.ncols() - rank(m)
}

/// Number of independent vectors among the rows of `vectors`.
pub fn span(vectors: &Matrix) -> usize {
    rank(vectors)
}

/// Basis of `{ v : m v = 0 }`, one vector per free column.
///
/// For free column `c` the basis vector has 1 at `c`, 0 at every other free
/// column and `-rref[r][c]` at the column of the pivot in row `r`. A
/// full-column-rank or empty matrix has an empty basis.
///
/// ```
/// use echelon::{space, Matrix};
/// let a = Matrix::from([[2.0, 1.0, -3.0], [4.0, 2.0, -6.0], [1.0, -1.0, -6.0]]);
/// assert_eq!(space::null_space(&a), vec![vec![3.0, -3.0, 1.0]]);
/// ```
pub fn null_space(m: &Matrix) -> Vec<Vec<f64>> {
    kernel(m, DEFAULT_DECIMALS)
}

/// Pivot columns of `m` itself (not of its RREF), as an `nrows x rank`
/// matrix.
pub fn column_space(m: &Matrix) -> Matrix {
    let cols: Vec<usize> = pivot_entries(&to_reduced_row_echelon_form(m))
        .into_iter()
        .map(|(_, j)| j)
        .collect();
    if cols.is_empty() {
        return Matrix::zeros(0, 0);
    }
    Matrix::from_fn(m.nrows(), cols.len(), |i, k| m[(i, cols[k])])
}

/// 1 if the last row of the echelon form has a non-zero entry, else 0.
///
/// This is a coarse heuristic: it only separates "unique solution" from
/// "not unique" for square systems, and reports 0 for under-determined
/// systems that actually have infinitely many solutions.
pub fn number_of_solutions(m: &Matrix) -> usize {
    let r = to_row_echelon_form(m);
    match r.rows().last() {
        Some(row) if row.iter().any(|&x| !is_negligible(x, DEFAULT_DECIMALS)) => 1,
        _ => 0,
    }
}

/// Whether `m v ≈ 0`.
pub fn is_in_null_space(v: &[f64], m: &Matrix) -> Result<bool> {
    Ok(m
        .mul_vector(v)?
        .into_iter()
        .all(|x| is_negligible(x, DEFAULT_DECIMALS)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LinalgError;

    #[test]
    fn ranks() {
        assert_eq!(rank(&Matrix::zeros(0, 0)), 0);
        assert_eq!(rank(&Matrix::identity(100)), 100);
        let mut row = vec![0.0; 10];
        row[9] = 1.0;
        assert_eq!(rank(&Matrix::from_rows(vec![row]).unwrap()), 1);
        assert_eq!(rank(&Matrix::zeros(3, 3)), 0);
        let a = Matrix::from([[1.0, 2.0, 3.0], [0.0, 1.0, 2.0], [1.0, 3.0, 5.0]]);
        assert_eq!(rank(&a), 2);
    }

    #[test]
    fn nullities() {
        assert_eq!(nullity(&Matrix::from([[0.0]])), 1);
        assert_eq!(nullity(&Matrix::identity(4)), 0);
        let a = Matrix::from([[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
        assert_eq!(nullity(&a), 2);
    }

    #[test]
    fn rank_plus_nullity_is_ncols() {
        let a = Matrix::from([[1.0, -2.0, 1.0, 3.0], [-3.0, 6.0, -3.0, -9.0], [4.0, -8.0, 4.0, 12.0]]);
        assert_eq!(rank(&a) + nullity(&a), a.ncols());
    }

    #[test]
    fn spans() {
        assert_eq!(span(&Matrix::zeros(0, 0)), 0);
        assert_eq!(span(&Matrix::from([[9.0]])), 1);
        assert_eq!(span(&Matrix::from([[9.0], [9.0]])), 1);
        assert_eq!(span(&Matrix::from([[1.0, 1.0]])), 1);
        assert_eq!(span(&Matrix::from([[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]])), 2);
        assert_eq!(span(&Matrix::identity(3)), 3);
        assert_eq!(span(&Matrix::from([[1.0, 1.0, 1.0], [2.0, 2.0, 2.0], [3.0, 3.0, 3.0]])), 1);
        assert_eq!(span(&Matrix::from([[1.0, 0.0, 0.0], [0.0, 1.0, 1.0]])), 2);
    }

    #[test]
    fn null_spaces() {
        assert!(null_space(&Matrix::zeros(0, 0)).is_empty());
        assert!(null_space(&Matrix::from([[1.0]])).is_empty());
        assert!(null_space(&Matrix::identity(2)).is_empty());

        let a = Matrix::from([[1.0, -2.0, 1.0, 3.0], [-3.0, 6.0, -3.0, -9.0], [4.0, -8.0, 4.0, 12.0]]);
        assert_eq!(
            null_space(&a),
            vec![
                vec![2.0, 1.0, 0.0, 0.0],
                vec![-1.0, 0.0, 1.0, 0.0],
                vec![-3.0, 0.0, 0.0, 1.0],
            ]
        );
        for v in null_space(&a) {
            assert!(is_in_null_space(&v, &a).unwrap());
        }
    }

    #[test]
    fn column_spaces() {
        assert!(column_space(&Matrix::zeros(0, 0)).is_empty());
        assert_eq!(column_space(&Matrix::from([[1.0]])), Matrix::from([[1.0]]));
        assert_eq!(column_space(&Matrix::identity(2)), Matrix::identity(2));

        let a = Matrix::from([[-1.0, 2.0, 6.0, 5.0], [0.0, 3.0, -7.0, 9.0], [3.0, -6.0, -18.0, -15.0]]);
        assert_eq!(
            column_space(&a),
            Matrix::from([[-1.0, 2.0], [0.0, 3.0], [3.0, -6.0]])
        );

        let a = Matrix::from([
            [1.0, -2.0, 4.0, -5.0],
            [0.0, 3.0, 5.0, 7.0],
            [-3.0, 6.0, 3.0, 9.0],
            [2.0, -4.0, -2.0, -6.0],
        ]);
        assert_eq!(
            column_space(&a),
            Matrix::from([[1.0, -2.0, 4.0], [0.0, 3.0, 5.0], [-3.0, 6.0, 3.0], [2.0, -4.0, -2.0]])
        );
    }

    #[test]
    fn solution_counts() {
        assert_eq!(number_of_solutions(&Matrix::identity(2)), 1);
        assert_eq!(number_of_solutions(&Matrix::from([[1.0, 1.0], [0.0, 1.0]])), 1);
        assert_eq!(number_of_solutions(&Matrix::from([[1.0, 0.0], [0.0, 0.0]])), 0);
        assert_eq!(number_of_solutions(&Matrix::from([[1.0, 1.0], [1.0, 1.0]])), 0);
        assert_eq!(number_of_solutions(&Matrix::zeros(2, 2)), 0);
        assert_eq!(number_of_solutions(&Matrix::zeros(0, 0)), 0);
    }

    #[test]
    fn null_space_membership() {
        let a = Matrix::from([[1.0, -4.0, 3.0], [2.0, 4.0, 2.0], [-1.0, -5.0, 0.0]]);
        assert!(is_in_null_space(&[-5.0, 1.0, 3.0], &a).unwrap());

        let a = Matrix::from([[-3.0, 1.0, 9.0], [1.0, 1.0, 1.0]]);
        assert!(is_in_null_space(&[2.0, -3.0, 1.0], &a).unwrap());
        assert!(!is_in_null_space(&[2.0, 3.0, -1.0], &a).unwrap());
        assert!(!is_in_null_space(&[1.0, -1.0, 0.0], &a).unwrap());
        assert!(!is_in_null_space(&[0.0, 1.0, 0.0], &a).unwrap());

        let a = Matrix::from([
            [5.0, 3.0, 1.0, 5.0],
            [-10.0, -2.0, 1.0, -3.0],
            [-5.0, 1.0, 2.0, 4.0],
            [7.0, 1.0, -1.0, -2.0],
        ]);
        assert!(is_in_null_space(&[-1.0, 3.0, -4.0, 0.0], &a).unwrap());
        assert!(!is_in_null_space(&[1.0, 0.0, 1.0, 1.0], &a).unwrap());
    }

    #[test]
    fn null_space_membership_length_mismatch() {
        let a = Matrix::from([[1.0, 2.0]]);
        assert!(matches!(
            is_in_null_space(&[1.0], &a),
            Err(LinalgError::ShapeMismatch { .. })
        ));
    }
}
