use faer::Mat;
use quadprog::solver::QpProblem;

fn main() {
    divan::main();
}

fn unconstrained(n: usize) -> QpProblem {
    let mut g = Mat::<f64>::zeros(n, n);
    for i in 0..n {
        g[(i, i)] = 2.0 + i as f64;
    }
    let a: Vec<f64> = (0..n).map(|i| i as f64 + 1.0).collect();
    QpProblem::new(g, a, Mat::zeros(n, 0), vec![], 0, false).unwrap()
}

fn box_constrained(n: usize) -> QpProblem {
    let mut g = Mat::<f64>::zeros(n, n);
    for i in 0..n {
        g[(i, i)] = 2.0 + i as f64;
    }
    let a: Vec<f64> = (0..n).map(|i| i as f64 + 1.0).collect();
    let m = n;
    let mut c = Mat::<f64>::zeros(n, m);
    for j in 0..m {
        c[(j, j)] = 1.0;
    }
    let b = vec![-1.0; m];
    QpProblem::new(g, a, c, b, 0, false).unwrap()
}

#[divan::bench(args = [2, 8, 32, 128])]
fn solve_unconstrained(n: usize) {
    let problem = unconstrained(n);
    divan::black_box(quadprog::solve(&problem).unwrap());
}

#[divan::bench(args = [2, 8, 32, 128])]
fn solve_box_constrained(n: usize) {
    let problem = box_constrained(n);
    divan::black_box(quadprog::solve(&problem).unwrap());
}
