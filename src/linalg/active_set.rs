//! Incremental active-set factorization (§4.C).
//!
//! Maintains `J` (n×n, orthogonal up to the `G`-metric: `Jᵀ G J = I`) and `R`
//! (the upper-triangular factor of the active constraint normals in the
//! `J`-transformed space) as constraints are added to and dropped from the
//! working set, via Givens rotations rather than refactoring from scratch.
//!
//! Every rotation here is applied as a transform of a pair of columns of
//! `J`; the mirrored effect on `R` (or on an incoming column before it joins
//! `R`) is the same rotation applied to a pair of rows, since `R`'s rows
//! correspond to `J`'s columns through `R = Qᵀ L⁻¹ N`.

use faer::Mat;

use super::primitives::{compute_rotation, solve_upper_transpose, Rotation};

/// The candidate constraint was (numerically) linearly dependent on the
/// constraints already in the working set; the caller should drop a
/// constraint and retry rather than treat this as a hard failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearlyDependent;

/// `J` and `R`, plus the number of constraints currently factored into `R`.
///
/// `R` is allocated at its maximum possible order up front and only the
/// leading `niact × niact` block is meaningful; this trades the classic
/// packed-triangular array for a plain dense block, which needs no manual
/// offset arithmetic at the call sites (§9).
pub struct ActiveSetFactorization {
    j: Mat<f64>,
    r: Mat<f64>,
    niact: usize,
    n: usize,
}

impl ActiveSetFactorization {
    /// Initialize from the Cholesky factor `l` of `G` (`G = L Lᵀ`, `l` upper
    /// triangular with reciprocal diagonal, per [`super::cholesky::factor`]).
    /// `J` starts as `L⁻ᵀ`, the whole space is unconstrained, and `R` is
    /// empty.
    pub fn new(l: &Mat<f64>, r_max: usize) -> Self {
        let n = l.nrows();
        let mut j = Mat::<f64>::zeros(n, n);
        for k in 0..n {
            let mut e = vec![0.0; n];
            e[k] = 1.0;
            solve_upper_transpose(l.as_ref(), &mut e);
            for i in 0..n {
                j[(i, k)] = e[i];
            }
        }
        Self {
            j,
            r: Mat::<f64>::zeros(r_max, r_max),
            niact: 0,
            n,
        }
    }

    /// Number of constraints currently factored into `R`.
    pub fn niact(&self) -> usize {
        self.niact
    }

    /// `d = Jᵀ nhat`, the candidate constraint normal transformed into the
    /// current factorization's coordinates.
    pub fn transform(&self, nhat: &[f64]) -> Vec<f64> {
        let mut d = vec![0.0; self.n];
        for k in 0..self.n {
            let mut sum = 0.0;
            for i in 0..self.n {
                sum += self.j[(i, k)] * nhat[i];
            }
            d[k] = sum;
        }
        d
    }

    /// `z = J[:, niact..n] · d[niact..n]`, the step direction in the
    /// primal null space of the active constraints.
    pub fn null_space_direction(&self, d: &[f64]) -> Vec<f64> {
        let mut z = vec![0.0; self.n];
        for k in self.niact..self.n {
            let dk = d[k];
            if dk == 0.0 {
                continue;
            }
            for i in 0..self.n {
                z[i] += self.j[(i, k)] * dk;
            }
        }
        z
    }

    /// `r = R⁻¹ d[0..niact]`, the rate of change of the active multipliers.
    /// Back-substitution against the dense leading block of `R`.
    pub fn dual_direction(&self, d: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; self.niact];
        for i in (0..self.niact).rev() {
            let mut sum = d[i];
            for k in i + 1..self.niact {
                sum -= self.r[(i, k)] * out[k];
            }
            out[i] = sum / self.r[(i, i)];
        }
        out
    }

    /// Try to fold constraint normal `nhat` into the working set as the
    /// `niact`-th column.
    ///
    /// Zeroes `d[niact+1..n]` from the bottom up with Givens rotations
    /// applied to pairs of `J`'s columns; the surviving head of `d` becomes
    /// the new column of `R`. `J` is updated unconditionally, even on
    /// refusal: the rotations are an orthogonal change of basis for the
    /// null space and remain valid regardless of whether this particular
    /// constraint is accepted.
    pub fn try_add(&mut self, nhat: &[f64], vsmall: f64) -> Result<(), LinearlyDependent> {
        let mut d = self.transform(nhat);
        let norm_sq: f64 = nhat.iter().map(|v| v * v).sum();
        let norm = norm_sq.sqrt();

        for l in (self.niact + 1..self.n).rev() {
            if d[l] == 0.0 {
                continue;
            }
            let (new_val, rot) = compute_rotation(d[l - 1], d[l]);
            d[l - 1] = new_val;
            d[l] = 0.0;
            if let Rotation::Apply { c, s } = rot {
                for row in 0..self.n {
                    let a = self.j[(row, l - 1)];
                    let b = self.j[(row, l)];
                    self.j[(row, l - 1)] = c * a + s * b;
                    self.j[(row, l)] = -s * a + c * b;
                }
            }
        }

        let pivot = d[self.niact];
        if pivot.abs() <= vsmall * norm.max(1.0) {
            return Err(LinearlyDependent);
        }

        for i in 0..=self.niact {
            self.r[(i, self.niact)] = d[i];
        }
        self.niact += 1;
        Ok(())
    }

    /// Drop the constraint at active-set position `l` (0-based), shifting
    /// the constraints after it down by one and restoring `R`'s
    /// upper-triangular shape by chasing the resulting bulge down the
    /// diagonal with Givens rotations, mirrored onto `J`'s columns.
    pub fn drop(&mut self, l: usize) {
        for col in l..self.niact - 1 {
            for row in 0..=col + 1 {
                self.r[(row, col)] = self.r[(row, col + 1)];
            }
        }

        for col in l..self.niact - 1 {
            let (new_val, rot) = compute_rotation(self.r[(col, col)], self.r[(col + 1, col)]);
            self.r[(col, col)] = new_val;
            self.r[(col + 1, col)] = 0.0;
            if let Rotation::Apply { c, s } = rot {
                for k in col + 1..self.niact - 1 {
                    let a = self.r[(col, k)];
                    let b = self.r[(col + 1, k)];
                    self.r[(col, k)] = c * a + s * b;
                    self.r[(col + 1, k)] = -s * a + c * b;
                }
                for row in 0..self.n {
                    let a = self.j[(row, col)];
                    let b = self.j[(row, col + 1)];
                    self.j[(row, col)] = c * a + s * b;
                    self.j[(row, col + 1)] = -s * a + c * b;
                }
            }
        }

        self.niact -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::cholesky;

    fn identity_factorization(n: usize) -> ActiveSetFactorization {
        let g = Mat::<f64>::identity(n, n);
        let l = cholesky::factor(&g).unwrap();
        ActiveSetFactorization::new(&l, n)
    }

    #[test]
    fn test_new_j_is_identity_for_identity_g() {
        let fac = identity_factorization(3);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((fac.j[(i, j)] - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_add_single_axis_aligned_constraint() {
        let mut fac = identity_factorization(2);
        // nhat = e0: should become the first column of R with pivot 1.
        fac.try_add(&[1.0, 0.0], 1e-10).unwrap();
        assert_eq!(fac.niact(), 1);
        assert!((fac.r[(0, 0)] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_add_rejects_duplicate_direction() {
        let mut fac = identity_factorization(2);
        fac.try_add(&[1.0, 0.0], 1e-10).unwrap();
        // A second constraint parallel to the first has no component left
        // in the null space and must be refused.
        let err = fac.try_add(&[2.0, 0.0], 1e-10);
        assert_eq!(err, Err(LinearlyDependent));
        assert_eq!(fac.niact(), 1);
    }

    #[test]
    fn test_add_two_independent_then_drop_first() {
        let mut fac = identity_factorization(3);
        fac.try_add(&[1.0, 0.0, 0.0], 1e-10).unwrap();
        fac.try_add(&[0.0, 1.0, 0.0], 1e-10).unwrap();
        assert_eq!(fac.niact(), 2);

        fac.drop(0);
        assert_eq!(fac.niact(), 1);
        // The remaining constraint should still be solvable as a 1x1 system.
        let r = fac.dual_direction(&[2.0]);
        assert!((r[0] - 2.0 / fac.r[(0, 0)]).abs() < 1e-10);
    }

    #[test]
    fn test_null_space_direction_shrinks_as_constraints_are_added() {
        let mut fac = identity_factorization(2);
        let d = fac.transform(&[1.0, 1.0]);
        let z = fac.null_space_direction(&d);
        assert!(z.iter().any(|v| v.abs() > 1e-9));

        fac.try_add(&[1.0, 0.0], 1e-10).unwrap();
        fac.try_add(&[0.0, 1.0], 1e-10).unwrap();
        let d = fac.transform(&[1.0, 1.0]);
        let z = fac.null_space_direction(&d);
        for v in z {
            assert!(v.abs() < 1e-10);
        }
    }
}
