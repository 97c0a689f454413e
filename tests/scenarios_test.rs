//! The concrete scenarios from the testable-properties section, run
//! end-to-end through the public API.

use faer::Mat;
use quadprog::error::QpError;
use quadprog::solver::QpProblem;

fn col_major(nrows: usize, cols: &[&[f64]]) -> Mat<f64> {
    let mut m = Mat::<f64>::zeros(nrows, cols.len());
    for (j, col) in cols.iter().enumerate() {
        for (i, &v) in col.iter().enumerate() {
            m[(i, j)] = v;
        }
    }
    m
}

#[test]
fn test_unconstrained_scalar() {
    let g = col_major(1, &[&[2.0]]);
    let problem = QpProblem::new(g, vec![4.0], Mat::zeros(1, 0), vec![], 0, false).unwrap();
    let sol = quadprog::solve(&problem).unwrap();
    assert!((sol.x[0] - 2.0).abs() < 1e-9);
    assert!((sol.value + 4.0).abs() < 1e-9);
}

#[test]
fn test_equality_constraint() {
    let g = Mat::<f64>::identity(2, 2);
    let c = col_major(2, &[&[1.0, 1.0]]);
    let problem = QpProblem::new(g, vec![0.0, 0.0], c, vec![1.0], 1, false).unwrap();
    let sol = quadprog::solve(&problem).unwrap();
    assert!((sol.x[0] - 0.5).abs() < 1e-9);
    assert!((sol.x[1] - 0.5).abs() < 1e-9);
    assert!((sol.value - 0.25).abs() < 1e-9);
}

#[test]
fn test_inequality_binding_vs_slack() {
    let g = Mat::<f64>::identity(2, 2);
    let c = col_major(2, &[&[1.0, 1.0]]);

    let binding = QpProblem::new(g.clone(), vec![0.0, 0.0], c.clone(), vec![1.0], 0, false).unwrap();
    let sol = quadprog::solve(&binding).unwrap();
    assert_eq!(sol.iact, vec![0]);
    assert!((sol.value - 0.25).abs() < 1e-9);

    let slack = QpProblem::new(g, vec![0.0, 0.0], c, vec![-1.0], 0, false).unwrap();
    let sol = quadprog::solve(&slack).unwrap();
    assert!(sol.iact.is_empty());
    assert!(sol.value.abs() < 1e-9);
}

#[test]
fn test_two_constraints_one_active() {
    let g = Mat::<f64>::identity(2, 2);
    let c = col_major(2, &[&[1.0, 0.0], &[0.0, 1.0]]);
    let problem = QpProblem::new(g, vec![1.0, 0.0], c, vec![2.0, -1.0], 0, false).unwrap();
    let sol = quadprog::solve(&problem).unwrap();
    assert!((sol.x[0] - 2.0).abs() < 1e-9);
    assert!(sol.x[1].abs() < 1e-9);
    assert_eq!(sol.iact, vec![0]);
    assert!((sol.u[0] - 1.0).abs() < 1e-9);
}

#[test]
fn test_non_positive_definite_is_rejected() {
    let g = col_major(2, &[&[1.0, 2.0], &[2.0, 1.0]]);
    let problem = QpProblem::new(g, vec![0.0, 0.0], Mat::zeros(2, 0), vec![], 0, false).unwrap();
    let err = quadprog::solve(&problem).unwrap_err();
    assert!(matches!(err, QpError::NotPositiveDefinite { .. }));
}
