use thiserror::Error;

/// Result type alias using [`LinalgError`].
pub type Result<T> = core::result::Result<T, LinalgError>;

/// Errors from matrix construction, arithmetic and decompositions.
///
/// ```
/// use echelon::{LinalgError, Matrix};
///
/// let a = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0]]).unwrap();
/// let err = a.determinant().unwrap_err();
/// assert!(matches!(err, LinalgError::NotSquare { .. }));
/// ```
#[derive(Debug, Error)]
pub enum LinalgError {
    /// Operand dimensions are incompatible for the operation.
    #[error("{op}: dimension mismatch {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// The operation needs a square matrix.
    #[error("{op}: matrix must be square, got {}x{}", .shape.0, .shape.1)]
    NotSquare {
        op: &'static str,
        shape: (usize, usize),
    },

    /// The determinant is exactly zero.
    #[error("matrix is singular")]
    Singular,

    /// A row or column index is out of range.
    #[error("{op}: index {index} out of range for length {len}")]
    InvalidIndex {
        op: &'static str,
        index: usize,
        len: usize,
    },

    /// Input rows do not all have the same length.
    #[error("row {row} has {got} entries, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// A token in a text matrix is not a decimal number.
    #[error("line {line}: cannot parse {token:?} as a number")]
    Parse { line: usize, token: String },

    /// Reading or writing a text matrix failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let e = LinalgError::ShapeMismatch {
            op: "dot",
            left: (2, 3),
            right: (4, 2),
        };
        assert_eq!(e.to_string(), "dot: dimension mismatch 2x3 vs 4x2");

        let e = LinalgError::NotSquare {
            op: "determinant",
            shape: (1, 3),
        };
        assert_eq!(e.to_string(), "determinant: matrix must be square, got 1x3");

        let e = LinalgError::InvalidIndex {
            op: "swap_rows",
            index: 5,
            len: 3,
        };
        assert_eq!(e.to_string(), "swap_rows: index 5 out of range for length 3");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let e: LinalgError = io.into();
        assert!(matches!(e, LinalgError::Io(_)));
    }
}
