//! Machine-epsilon-scaled tolerances and near-equality comparisons (§4.F).

use std::sync::OnceLock;

/// The smallest positive value such that `1.0 + vsmall() > 1.0` under the
/// prevailing rounding, derived once by halving a seed from below until the
/// inequality first fails, then reporting the last value that still held.
///
/// This mirrors the iterative-halving derivation of the source algorithm
/// rather than using [`f64::EPSILON`] directly, so it tracks whatever
/// rounding behavior is actually in effect.
pub fn vsmall() -> f64 {
    static VSMALL: OnceLock<f64> = OnceLock::new();
    *VSMALL.get_or_init(|| {
        let mut small: f64 = 1.0;
        loop {
            let candidate = small * 0.5;
            if 1.0 + candidate <= 1.0 {
                return small;
            }
            small = candidate;
        }
    })
}

/// Elementwise near-equality with a mixed absolute/relative threshold:
/// `|p_i - q_i| <= eps_abs + 1e-10 * |p_i|` if `q_i >= 0`, else the same
/// threshold computed against `-p_i`.
///
/// The asymmetry (the reference value `q_i` picks which sign of `p_i` scales
/// the relative term) follows the comparison routine's original convention.
pub fn near_eq(p: f64, q: f64, eps_abs: f64) -> bool {
    let scale = if q >= 0.0 { p } else { -p };
    let threshold = eps_abs + 1e-10 * scale;
    (p - q).abs() <= threshold
}

/// [`near_eq`] applied elementwise, using `vsmall()` as `eps_abs`.
pub fn near_eq_slice(p: &[f64], q: &[f64]) -> bool {
    near_eq_slice_with(p, q, vsmall())
}

/// [`near_eq`] applied elementwise with an explicit absolute tolerance.
pub fn near_eq_slice_with(p: &[f64], q: &[f64], eps_abs: f64) -> bool {
    p.len() == q.len() && p.iter().zip(q).all(|(&a, &b)| near_eq(a, b, eps_abs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vsmall_is_tiny_but_positive() {
        let v = vsmall();
        assert!(v > 0.0);
        assert!(v <= f64::EPSILON);
        assert!(1.0 + v > 1.0);
    }

    #[test]
    fn test_near_eq_exact_match() {
        assert!(near_eq(1.0, 1.0, 1e-12));
        assert!(near_eq(0.0, 0.0, 1e-12));
    }

    #[test]
    fn test_near_eq_within_relative_threshold() {
        let p = 1_000_000.0;
        assert!(near_eq(p, p + 5e-5, 1e-12));
    }

    #[test]
    fn test_near_eq_rejects_outside_threshold() {
        assert!(!near_eq(1.0, 1.1, 1e-12));
    }

    #[test]
    fn test_near_eq_slice_length_mismatch_is_not_equal() {
        assert!(!near_eq_slice(&[1.0, 2.0], &[1.0]));
    }

    #[test]
    fn test_near_eq_slice_all_entries_checked() {
        assert!(near_eq_slice_with(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], 1e-9));
        assert!(!near_eq_slice_with(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.1], 1e-9));
    }
}
