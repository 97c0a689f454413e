//! A minimal, self-contained demonstration of the solver.
//!
//! Run:
//! cargo run --example simple

use faer::Mat;
use quadprog::{QpProblem, solve};

fn main() {
    // minimize (1/2)(x0^2 + x1^2) subject to x0 + x1 >= 1
    let g = Mat::<f64>::identity(2, 2);
    let a = vec![0.0, 0.0];
    let mut c = Mat::<f64>::zeros(2, 1);
    c[(0, 0)] = 1.0;
    c[(1, 0)] = 1.0;
    let b = vec![1.0];

    let problem = QpProblem::new(g, a, c, b, 0, false).expect("valid problem");
    match solve(&problem) {
        Ok(solution) => {
            println!("x*     = {:?}", solution.x);
            println!("value  = {}", solution.value);
            println!("iact   = {:?}", solution.iact);
            println!("u      = {:?}", solution.u);
        }
        Err(err) => eprintln!("solve failed: {err}"),
    }
}
