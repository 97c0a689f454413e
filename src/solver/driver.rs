//! The dual active-set main loop (§4.D).

use crate::error::{QpError, Result};
use crate::linalg::{ActiveSetFactorization, LinearlyDependent, column, dot};
use crate::tolerance::vsmall;

use super::problem::{QpProblem, QpSolution};

/// Run the Goldfarb–Idnani dual active-set algorithm to completion.
pub fn run(problem: &QpProblem) -> Result<QpSolution> {
    let n = problem.n;
    let m = problem.m;
    let meq = problem.meq;
    let eps = vsmall();

    let l = if problem.factorized {
        problem.g.clone()
    } else {
        crate::linalg::cholesky::factor(&problem.g)?
    };

    // x <- L^-T L^-1 a, the unconstrained minimizer.
    let mut x = problem.a.clone();
    crate::linalg::primitives::solve_upper(l.as_ref(), &mut x);
    crate::linalg::primitives::solve_upper_transpose(l.as_ref(), &mut x);
    let unconstrained = x.clone();
    let mut value = -0.5 * dot(&problem.a, &x);

    let r_max = n.min(m);
    let mut fac = ActiveSetFactorization::new(&l, r_max);
    let mut u: Vec<f64> = Vec::with_capacity(r_max);
    let mut iact: Vec<usize> = Vec::with_capacity(r_max);
    let mut iter = [0usize, 0usize];

    for j in 0..meq {
        force_add_equality(problem, &mut fac, &mut x, &mut value, &mut u, &mut iact, j)?;
    }

    'outer: loop {
        tracing::debug!(niact = fac.niact(), iter0 = iter[0], iter1 = iter[1], "step 1");

        let mut best: Option<(usize, f64)> = None;
        for j in meq..m {
            if iact.contains(&j) {
                continue;
            }
            let nhat = column(problem.c.as_ref(), j);
            let slack = dot(&nhat, &x) - problem.b[j];
            if best.is_none_or(|(_, best_slack)| slack < best_slack) {
                best = Some((j, slack));
            }
        }

        let (jstar, mut slack) = match best {
            Some((j, s)) if s < -eps => (j, s),
            _ => {
                return Ok(QpSolution {
                    x,
                    unconstrained,
                    value,
                    u,
                    niact: fac.niact(),
                    iact,
                    iter,
                });
            }
        };

        let nhat = column(problem.c.as_ref(), jstar);
        let mut u_new = 0.0;

        loop {
            let d = fac.transform(&nhat);
            let z = fac.null_space_direction(&d);
            let r = fac.dual_direction(&d);

            let zn = dot(&z, &nhat);
            let z_norm_sq = dot(&z, &z);
            let t1 = if z_norm_sq <= eps * eps { f64::INFINITY } else { -slack / zn };

            let mut t2 = f64::INFINITY;
            let mut lstar: Option<usize> = None;
            for k in meq..fac.niact() {
                if r[k] > 0.0 {
                    let candidate = u[k] / r[k];
                    if candidate < t2 {
                        t2 = candidate;
                        lstar = Some(k);
                    }
                }
            }

            let t = t1.min(t2);
            if !t.is_finite() {
                return Err(QpError::Infeasible);
            }

            let u_new_before_step = u_new;
            for k in 0..fac.niact() {
                u[k] += t * (-r[k]);
            }
            u_new += t;

            if t2 < t1 {
                let l = lstar.expect("t2 finite implies a minimizing position");
                fac.drop(l);
                iact.remove(l);
                u.remove(l);
                iter[1] += 1;
                slack = dot(&nhat, &x) - problem.b[jstar];
                continue;
            }

            for (xi, zi) in x.iter_mut().zip(&z) {
                *xi += t * zi;
            }
            value += t * zn * (0.5 * t - u_new_before_step);

            match fac.try_add(&nhat, eps) {
                Ok(()) => {
                    iact.push(jstar);
                    u.push(u_new);
                    iter[0] += 1;
                    continue 'outer;
                }
                Err(LinearlyDependent) => {
                    let l = lstar.ok_or(QpError::Infeasible)?;
                    fac.drop(l);
                    iact.remove(l);
                    u.remove(l);
                    iter[1] += 1;
                    slack = dot(&nhat, &x) - problem.b[jstar];
                }
            }
        }
    }
}

/// Force-add an equality constraint at initialization: take the exact
/// primal step that makes the constraint hold (an equality's step is
/// unbounded in both directions, so there is never a competing dual step
/// to consider).
fn force_add_equality(
    problem: &QpProblem,
    fac: &mut ActiveSetFactorization,
    x: &mut [f64],
    value: &mut f64,
    u: &mut Vec<f64>,
    iact: &mut Vec<usize>,
    j: usize,
) -> Result<()> {
    let nhat = column(problem.c.as_ref(), j);
    let d = fac.transform(&nhat);
    let z = fac.null_space_direction(&d);
    let zn = dot(&z, &nhat);
    let slack = dot(&nhat, x) - problem.b[j];

    if zn.abs() <= vsmall() {
        return Err(QpError::BadConfiguration(
            "equality constraints are linearly dependent".to_string(),
        ));
    }
    let t = -slack / zn;

    for (xi, zi) in x.iter_mut().zip(&z) {
        *xi += t * zi;
    }
    // u_new starts at 0 for a freshly introduced multiplier; the value
    // update uses that pre-step value, and only the committed multiplier
    // (pushed below) reflects the step just taken.
    *value += t * zn * 0.5 * t;
    let u_new = t;

    fac.try_add(&nhat, vsmall()).map_err(|_| {
        QpError::BadConfiguration("equality constraints are linearly dependent".to_string())
    })?;
    iact.push(j);
    u.push(u_new);
    Ok(())
}
