//! In-place Cholesky factorization of a symmetric positive-definite matrix
//! (§4.B).

use faer::Mat;

use crate::error::{QpError, Result};

/// Factor `g` into the upper-triangular `L` with `G = L Lᵀ`, then overwrite
/// the diagonal of `L` with its reciprocals so that later triangular solves
/// (§4.A) multiply instead of divide.
///
/// Only the upper triangle of `g` is read. Rows are resolved from last to
/// first: row `n-1` has a single unknown (the diagonal pivot), and each
/// earlier row depends only on rows already resolved.
pub fn factor(g: &Mat<f64>) -> Result<Mat<f64>> {
    let n = g.nrows();
    let mut l = Mat::<f64>::zeros(n, n);

    for i in (0..n).rev() {
        for k in (i..n).rev() {
            let mut sum = g[(i, k)];
            for p in k + 1..n {
                sum -= l[(i, p)] * l[(k, p)];
            }
            if k == i {
                if sum <= 0.0 {
                    return Err(QpError::NotPositiveDefinite { row: i, pivot: sum });
                }
                l[(i, i)] = sum.sqrt();
            } else {
                l[(i, k)] = sum / l[(k, k)];
            }
        }
    }

    for i in 0..n {
        l[(i, i)] = 1.0 / l[(i, i)];
    }

    Ok(l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::primitives::{solve_upper, solve_upper_transpose};

    #[test]
    fn test_factor_identity() {
        let g = Mat::<f64>::identity(3, 3);
        let l = factor(&g).unwrap();
        for i in 0..3 {
            assert!((l[(i, i)] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_factor_reconstructs_g() {
        let mut g = Mat::<f64>::zeros(3, 3);
        g[(0, 0)] = 4.0;
        g[(0, 1)] = 2.0;
        g[(1, 0)] = 2.0;
        g[(1, 1)] = 5.0;
        g[(0, 2)] = 0.0;
        g[(2, 0)] = 0.0;
        g[(1, 2)] = 1.0;
        g[(2, 1)] = 1.0;
        g[(2, 2)] = 3.0;

        let l = factor(&g).unwrap();

        // Reconstruct L with real (non-reciprocal) diagonal and verify L*L^T == G.
        let mut real_l = l.clone();
        for i in 0..3 {
            real_l[(i, i)] = 1.0 / l[(i, i)];
        }
        for i in 0..3 {
            for j in 0..3 {
                let mut sum = 0.0;
                for k in i.max(j)..3 {
                    sum += real_l[(i, k)] * real_l[(j, k)];
                }
                assert!((sum - g[(i, j)]).abs() < 1e-10, "mismatch at ({i},{j})");
            }
        }
    }

    #[test]
    fn test_factor_rejects_indefinite() {
        let mut g = Mat::<f64>::zeros(2, 2);
        g[(0, 0)] = 1.0;
        g[(0, 1)] = 2.0;
        g[(1, 0)] = 2.0;
        g[(1, 1)] = 1.0;
        let err = factor(&g).unwrap_err();
        assert!(matches!(err, QpError::NotPositiveDefinite { .. }));
    }

    #[test]
    fn test_solve_round_trip_through_factor() {
        let mut g = Mat::<f64>::zeros(2, 2);
        g[(0, 0)] = 2.0;
        g[(0, 1)] = 0.0;
        g[(1, 0)] = 0.0;
        g[(1, 1)] = 8.0;
        let l = factor(&g).unwrap();

        let mut y = vec![4.0, 4.0];
        solve_upper(l.as_ref(), &mut y);
        solve_upper_transpose(l.as_ref(), &mut y);
        // x = G^{-1} [4,4] = [2, 0.5]
        assert!((y[0] - 2.0).abs() < 1e-10);
        assert!((y[1] - 0.5).abs() < 1e-10);
    }
}
