//! Problem harness (§4.E): shape validation, workspace sizing, and the
//! public solution record.

use faer::Mat;

use crate::error::{QpError, Result};

/// A strictly convex quadratic program, immutable for the duration of a
/// solve.
///
/// `minimize (1/2) xᵀGx - aᵀx subject to Cᵀx >= b`, with the first `meq`
/// columns of `C` treated as equalities.
pub struct QpProblem {
    pub n: usize,
    pub m: usize,
    pub meq: usize,
    /// `G` (or, when `factorized` is set, its Cholesky factor `L` with
    /// reciprocal diagonal, per [`crate::linalg::cholesky`]).
    pub g: Mat<f64>,
    pub a: Vec<f64>,
    pub c: Mat<f64>,
    pub b: Vec<f64>,
    pub factorized: bool,
}

impl QpProblem {
    /// Validate shapes and build a problem. `G` must be square and match
    /// `a`'s length; `C`'s row count must match `G`'s order; `b`'s length
    /// must match `C`'s column count; `meq` must not exceed the number of
    /// columns of `C`.
    pub fn new(
        g: Mat<f64>,
        a: Vec<f64>,
        c: Mat<f64>,
        b: Vec<f64>,
        meq: usize,
        factorized: bool,
    ) -> Result<Self> {
        let n = g.nrows();
        if g.ncols() != n {
            return Err(QpError::ShapeMismatch(format!(
                "G is {n}x{}, expected square",
                g.ncols()
            )));
        }
        if a.len() != n {
            return Err(QpError::ShapeMismatch(format!(
                "a has length {} but G has order {n}",
                a.len()
            )));
        }
        if c.nrows() != n {
            return Err(QpError::ShapeMismatch(format!(
                "C has {} rows but G has order {n}",
                c.nrows()
            )));
        }
        let m = c.ncols();
        if b.len() != m {
            return Err(QpError::ShapeMismatch(format!(
                "b has length {} but C has {m} columns",
                b.len()
            )));
        }
        if meq > m {
            return Err(QpError::BadConfiguration(format!(
                "meq ({meq}) exceeds m ({m})"
            )));
        }

        Ok(Self {
            n,
            m,
            meq,
            g,
            a,
            c,
            b,
            factorized,
        })
    }

    /// `2n + 2m + r(r+5)/2`, `r = min(n, m)` — the scratch size the source
    /// algorithm's shared arena would need. Kept only as a documented
    /// sizing fact; this rewrite allocates each piece of state as its own
    /// typed value rather than carving it out of one buffer (§9).
    pub fn workspace_len(&self) -> usize {
        let r = self.n.min(self.m);
        2 * self.n + 2 * self.m + r * (r + 5) / 2
    }
}

/// The outcome of a successful solve (§6, post-conditions).
#[derive(Debug, Clone, PartialEq)]
pub struct QpSolution {
    /// The constrained optimum.
    pub x: Vec<f64>,
    /// The unconstrained minimizer `G⁻¹a`, recorded before the main loop.
    pub unconstrained: Vec<f64>,
    /// `(1/2) xᵀGx - aᵀx` at the optimum.
    pub value: f64,
    /// Multipliers in activation order, `u[0..niact)`.
    pub u: Vec<f64>,
    /// Active constraint indices (0-based, into the columns of `C`), in
    /// activation order.
    pub iact: Vec<usize>,
    pub niact: usize,
    /// `iter[0]` counts main-loop additions, `iter[1]` counts drops.
    pub iter: [usize; 2],
}

/// Validate, solve, and return the solution (§4.E).
pub fn solve(problem: &QpProblem) -> Result<QpSolution> {
    tracing::debug!(
        n = problem.n,
        m = problem.m,
        meq = problem.meq,
        factorized = problem.factorized,
        workspace_len = problem.workspace_len(),
        "starting solve"
    );
    super::driver::run(problem)
}
