//! Triangular solves, dot products, and Givens rotations (§4.A).

use faer::MatRef;

/// A 2x2 orthogonal transform, or the explicit absence of one.
///
/// The original algorithm flags "no rotation needed" by returning a
/// negative zero for `s` and relying on the sign bit at the call site
/// (§9). This type replaces that sentinel with a proper variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rotation {
    Identity,
    Apply { c: f64, s: f64 },
}

/// Dot product of two equal-length slices.
pub fn dot(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

/// Copy column `j` of a column-major matrix out as an owned vector.
pub fn column(m: MatRef<f64>, j: usize) -> Vec<f64> {
    (0..m.nrows()).map(|i| m[(i, j)]).collect()
}

/// Solve `L x = rhs` in place, where `l` is upper triangular of order
/// `rhs.len()` with its diagonal already stored as reciprocals (§4.B).
/// Back-substitution from the last row to the first.
pub fn solve_upper(l: MatRef<f64>, rhs: &mut [f64]) {
    let n = rhs.len();
    for i in (0..n).rev() {
        let mut sum = rhs[i];
        for k in i + 1..n {
            sum -= l[(i, k)] * rhs[k];
        }
        rhs[i] = sum * l[(i, i)];
    }
}

/// Solve `Lᵀ x = rhs` in place, where `l` is upper triangular of order
/// `rhs.len()` with reciprocal diagonal. Forward substitution from the
/// first row to the last.
pub fn solve_upper_transpose(l: MatRef<f64>, rhs: &mut [f64]) {
    let n = rhs.len();
    for i in 0..n {
        let mut sum = rhs[i];
        for k in 0..i {
            sum -= l[(k, i)] * rhs[k];
        }
        rhs[i] = sum * l[(i, i)];
    }
}

/// Compute `(r, rotation)` such that applying `rotation` to the 2-vector
/// `(x, y)` produces `(r, 0)`.
///
/// Uses the numerically safe form from the source algorithm: pivot on
/// whichever of `x`, `y` has larger magnitude before dividing, so the
/// intermediate ratio never exceeds 1 in absolute value.
pub fn compute_rotation(x: f64, y: f64) -> (f64, Rotation) {
    if y == 0.0 {
        return (x, Rotation::Identity);
    }
    if x.abs() > y.abs() {
        let t = y / x;
        let c = 1.0 / t.mul_add(t, 1.0).sqrt();
        let s = c * t;
        (x / c, Rotation::Apply { c, s })
    } else {
        let t = x / y;
        let s = 1.0 / t.mul_add(t, 1.0).sqrt();
        let c = s * t;
        (y / s, Rotation::Apply { c, s })
    }
}

/// Apply a rotation to a pair of same-length slices in place, as if they
/// were two rows (or columns) being rotated together.
pub fn apply_rotation(rotation: Rotation, u: &mut [f64], v: &mut [f64]) {
    let Rotation::Apply { c, s } = rotation else {
        return;
    };
    debug_assert_eq!(u.len(), v.len());
    for (ui, vi) in u.iter_mut().zip(v.iter_mut()) {
        let t = c * *ui + s * *vi;
        *vi = c * *vi - s * *ui;
        *ui = t;
    }
}
