//! The problem harness and dual active-set driver (§4.D, §4.E).

pub mod driver;
pub mod problem;

pub use problem::{QpProblem, QpSolution, solve};
