//! Demonstrates the boundary cases enumerated in the testable-properties
//! section: no constraints, all-equality, and redundant constraints that
//! trigger the linear-dependence retry path.
//!
//! Run:
//! cargo run --example boundary_cases

use faer::Mat;
use quadprog::{QpProblem, solve};

fn run(name: &str, problem: QpProblem) {
    match solve(&problem) {
        Ok(solution) => println!(
            "{name}: x* = {:?}, value = {}, iact = {:?}",
            solution.x, solution.value, solution.iact
        ),
        Err(err) => println!("{name}: error: {err}"),
    }
}

fn main() {
    // m = 0: pure unconstrained.
    let g = Mat::<f64>::identity(2, 2);
    let unconstrained = QpProblem::new(g, vec![3.0, 4.0], Mat::zeros(2, 0), vec![], 0, false)
        .expect("valid problem");
    run("unconstrained", unconstrained);

    // meq = m: pure equality.
    let g = Mat::<f64>::identity(2, 2);
    let mut c = Mat::<f64>::zeros(2, 1);
    c[(0, 0)] = 1.0;
    c[(1, 0)] = 1.0;
    let pure_equality =
        QpProblem::new(g, vec![0.0, 0.0], c, vec![2.0], 1, false).expect("valid problem");
    run("pure equality", pure_equality);

    // m > n with a redundant constraint: the second column is a multiple of
    // the first (same direction, looser bound) and ends up refused once the
    // first is already active, forcing a drop-and-retry before the solve
    // can settle.
    let g = Mat::<f64>::identity(2, 2);
    let mut c = Mat::<f64>::zeros(2, 3);
    c[(0, 0)] = 1.0;
    c[(1, 0)] = 0.0;
    c[(0, 1)] = 2.0;
    c[(1, 1)] = 0.0;
    c[(0, 2)] = 0.0;
    c[(1, 2)] = 1.0;
    let redundant = QpProblem::new(g, vec![0.0, 0.0], c, vec![1.0, 1.5, 1.0], 0, false)
        .expect("valid problem");
    run("redundant constraints", redundant);
}
