//! JSON regression file format and PASS/FAIL classification (§6, §7, §8).

use std::fs;
use std::path::Path;

use faer::Mat;
use serde::Deserialize;

use crate::error::{QpError, Result};
use crate::solver::{QpProblem, QpSolution};
use crate::tolerance::{near_eq, near_eq_slice, vsmall};

/// A single regression record, as read from a JSON input file (§6).
///
/// Required fields describe the problem; the rest are reference values the
/// harness compares the solver's output against.
#[derive(Debug, Deserialize)]
pub struct RegressionCase {
    #[serde(rename = "G")]
    pub g: Vec<Vec<f64>>,
    #[serde(rename = "a")]
    pub a: Vec<f64>,
    #[serde(rename = "C", default)]
    pub c: Vec<Vec<f64>>,
    #[serde(default)]
    pub b: Vec<f64>,
    #[serde(default)]
    pub meq: usize,
    #[serde(default)]
    pub factorized: bool,

    pub solution: Option<Vec<f64>>,
    pub value: Option<f64>,
    #[serde(rename = "unconstrained.solution")]
    pub unconstrained_solution: Option<Vec<f64>>,
    #[serde(rename = "Lagrangian")]
    pub lagrangian: Option<Vec<f64>>,
    pub iterations: Option<[usize; 2]>,
    pub iact: Option<Vec<usize>>,
}

/// Outcome of comparing a solve against a [`RegressionCase`]'s reference
/// fields (§7, §8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// All compared fields agree within tolerance.
    Pass,
    /// Primal optimum, value, and unconstrained solution agree, but the
    /// Lagrangian, iteration counts, or active set differ — these are
    /// sensitive to tie-breaking and non-unique for degenerate problems.
    PassWithMinorDifferences,
    /// Primal optimum, value, or unconstrained solution differs.
    Fail,
    /// The file was unreadable, unparseable, or its shapes didn't match.
    Skip,
}

/// Load and parse a regression file from `path`.
pub fn load(path: impl AsRef<Path>) -> Result<RegressionCase> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| QpError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| QpError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Build a [`QpProblem`] from a case's required fields.
pub fn to_problem(case: &RegressionCase) -> Result<QpProblem> {
    let n = case.g.len();
    let g = dense_from_rows(&case.g, n, n)?;
    let m = case.c.len();
    // C is stored row-major in the JSON record's nested-array convention
    // (one outer entry per row); the problem wants it column-major with m
    // columns of length n, so transpose on the way in.
    let c = dense_from_rows_transposed(&case.c, n, m)?;
    QpProblem::new(g, case.a.clone(), c, case.b.clone(), case.meq, case.factorized)
}

fn dense_from_rows(rows: &[Vec<f64>], expect_rows: usize, expect_cols: usize) -> Result<Mat<f64>> {
    if rows.len() != expect_rows {
        return Err(QpError::ShapeMismatch(format!(
            "expected {expect_rows} rows, found {}",
            rows.len()
        )));
    }
    let mut m = Mat::<f64>::zeros(expect_rows, expect_cols);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != expect_cols {
            return Err(QpError::ShapeMismatch(format!(
                "row {i} has {} entries, expected {expect_cols}",
                row.len()
            )));
        }
        for (j, &v) in row.iter().enumerate() {
            m[(i, j)] = v;
        }
    }
    Ok(m)
}

fn dense_from_rows_transposed(
    rows: &[Vec<f64>],
    n: usize,
    m: usize,
) -> Result<Mat<f64>> {
    if rows.is_empty() {
        return Ok(Mat::<f64>::zeros(n, 0));
    }
    if rows.len() != m {
        return Err(QpError::ShapeMismatch(format!(
            "expected {m} constraint rows, found {}",
            rows.len()
        )));
    }
    let mut c = Mat::<f64>::zeros(n, m);
    for (j, row) in rows.iter().enumerate() {
        if row.len() != n {
            return Err(QpError::ShapeMismatch(format!(
                "constraint row {j} has {} entries, expected {n}",
                row.len()
            )));
        }
        for (i, &v) in row.iter().enumerate() {
            c[(i, j)] = v;
        }
    }
    Ok(c)
}

/// Compare a solver outcome against a case's reference fields (§8). Returns
/// [`Verdict::Skip`] when the case carries no comparable reference fields at
/// all.
pub fn classify(case: &RegressionCase, solved: &Result<QpSolution>) -> Verdict {
    let eps = vsmall();

    let solution = match solved {
        Ok(sol) => sol,
        Err(_) => return Verdict::Fail,
    };

    let mut have_reference = false;
    let mut minor_mismatch = false;

    if let Some(expected) = &case.solution {
        have_reference = true;
        if !near_eq_slice(&solution.x, expected) {
            return Verdict::Fail;
        }
    }
    if let Some(expected) = case.value {
        have_reference = true;
        if !near_eq(solution.value, expected, eps) {
            return Verdict::Fail;
        }
    }
    if let Some(expected) = &case.unconstrained_solution {
        have_reference = true;
        if !near_eq_slice(&solution.unconstrained, expected) {
            return Verdict::Fail;
        }
    }

    if let Some(expected) = &case.iact {
        have_reference = true;
        let actual: Vec<usize> = solution.iact.clone();
        if actual != *expected {
            minor_mismatch = true;
        }
    }
    if let Some(expected) = case.iterations {
        have_reference = true;
        if solution.iter != expected {
            minor_mismatch = true;
        }
    }
    if let Some(expected) = &case.lagrangian {
        have_reference = true;
        let mut embedded = vec![0.0; expected.len()];
        for (slot, &idx) in solution.iact.iter().enumerate() {
            if idx < embedded.len() {
                embedded[idx] = solution.u[slot];
            }
        }
        if !near_eq_slice(&embedded, expected) {
            minor_mismatch = true;
        }
    }

    if !have_reference {
        return Verdict::Skip;
    }
    if minor_mismatch {
        Verdict::PassWithMinorDifferences
    } else {
        Verdict::Pass
    }
}
