//! Vector primitives on `&[f64]`.
//!
//! Vectors are plain slices in and `Vec<f64>` out. Anything that pairs two
//! vectors checks their lengths and fails with
//! [`LinalgError::ShapeMismatch`] rather than truncating.

use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;
use crate::space;
use crate::tolerance::{nearly_equal, DEFAULT_DECIMALS};

fn check_same_len(op: &'static str, a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(LinalgError::ShapeMismatch {
            op,
            left: (1, a.len()),
            right: (1, b.len()),
        });
    }
    Ok(())
}

/// Euclidean norm. The empty vector has length 0.
pub fn length(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// `v / |v|`. Empty and zero vectors are returned unchanged.
///
/// ```
/// use echelon::vector::unit_vector;
/// assert_eq!(unit_vector(&[4.0, -3.0]), vec![0.8, -0.6]);
/// assert_eq!(unit_vector(&[0.0, 0.0]), vec![0.0, 0.0]);
/// ```
pub fn unit_vector(v: &[f64]) -> Vec<f64> {
    let len = length(v);
    if len == 0.0 {
        return v.to_vec();
    }
    v.iter().map(|x| x / len).collect()
}

/// Whether `|v| ≈ 1`.
pub fn is_unit_vector(v: &[f64]) -> bool {
    nearly_equal(length(v), 1.0, DEFAULT_DECIMALS)
}

/// Multiply every coordinate by `k`.
pub fn scale_vector(v: &[f64], k: f64) -> Vec<f64> {
    v.iter().map(|x| x * k).collect()
}

/// Inner product.
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64> {
    check_same_len("dot", a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Cross product of two 3-vectors.
///
/// ```
/// use echelon::vector::cross;
/// assert_eq!(cross(&[1.0, 0.0, 2.0], &[-2.0, 1.0, 0.0]).unwrap(), [-2.0, -4.0, 1.0]);
/// assert!(cross(&[1.0, 0.0], &[0.0, 1.0]).is_err());
/// ```
pub fn cross(a: &[f64], b: &[f64]) -> Result<[f64; 3]> {
    if a.len() != 3 || b.len() != 3 {
        return Err(LinalgError::ShapeMismatch {
            op: "cross",
            left: (1, a.len()),
            right: (1, b.len()),
        });
    }
    Ok([
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ])
}

/// Radians to degrees.
pub fn radians_to_degrees(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Angle between two vectors in degrees.
///
/// Computed as `atan2(sqrt(|a|²|b|² - (a·b)²), a·b)`, which stays exact for
/// parallel vectors where `acos` of the cosine loses half the digits. A
/// zero vector gives `NaN`.
pub fn angle_between(a: &[f64], b: &[f64]) -> Result<f64> {
    let ab = dot(a, b)?;
    let aa = dot(a, a)?;
    let bb = dot(b, b)?;
    if aa == 0.0 || bb == 0.0 {
        return Ok(f64::NAN);
    }
    let sin_scaled = (aa * bb - ab * ab).max(0.0).sqrt();
    Ok(radians_to_degrees(sin_scaled.atan2(ab)))
}

/// `a·b ≈ 0`. A zero vector is orthogonal to everything.
pub fn are_orthogonal(a: &[f64], b: &[f64]) -> Result<bool> {
    Ok(nearly_equal(dot(a, b)?, 0.0, DEFAULT_DECIMALS))
}

/// Whether every distinct pair of `vectors` is orthogonal.
pub fn are_orthogonal_set(vectors: &[Vec<f64>]) -> Result<bool> {
    for (i, a) in vectors.iter().enumerate() {
        for b in &vectors[i + 1..] {
            if !are_orthogonal(a, b)? {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

// ── Linear independence ─────────────────────────────────────────────

/// Stack `vectors` as rows and compare the rank with their count.
///
/// No vectors at all counts as independent.
///
/// ```
/// use echelon::vector::are_linearly_independent_by_elimination;
/// assert!(are_linearly_independent_by_elimination(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap());
/// assert!(!are_linearly_independent_by_elimination(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap());
/// ```
pub fn are_linearly_independent_by_elimination(vectors: &[Vec<f64>]) -> Result<bool> {
    if vectors.is_empty() {
        return Ok(true);
    }
    let m = Matrix::from_rows(vectors.to_vec())?;
    Ok(space::rank(&m) == vectors.len())
}

/// Independent iff `|a·b| < |a||b|`. Equality (Cauchy-Schwarz) means one
/// vector is a multiple of the other.
pub fn are_linearly_independent_by_cauchy_schwarz(a: &[f64], b: &[f64]) -> Result<bool> {
    check_same_len("cauchy_schwarz", a, b)?;
    if a.is_empty() {
        return Ok(true);
    }
    let lhs = dot(a, b)?.abs();
    let rhs = length(a) * length(b);
    Ok(lhs < rhs && !nearly_equal(lhs, rhs, DEFAULT_DECIMALS))
}

/// Independent iff `|a + b| < |a| + |b|`. Equality (triangle inequality)
/// means the vectors point the same way.
pub fn are_linearly_independent_by_triangle_inequality(a: &[f64], b: &[f64]) -> Result<bool> {
    check_same_len("triangle_inequality", a, b)?;
    if a.is_empty() {
        return Ok(true);
    }
    let sum: Vec<f64> = a.iter().zip(b).map(|(x, y)| x + y).collect();
    let lhs = length(&sum);
    let rhs = length(a) + length(b);
    Ok(lhs < rhs && !nearly_equal(lhs, rhs, DEFAULT_DECIMALS))
}
