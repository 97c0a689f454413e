//! Strictly convex quadratic program solver
//!
//! Implements the Goldfarb–Idnani dual active-set method: minimizes
//! `(1/2) xᵀGx - aᵀx` subject to `Cᵀx >= b`, with the first `meq` columns of
//! `C` treated as equalities.

pub mod error;
pub mod linalg;
pub mod regression;
pub mod solver;
pub mod tolerance;

pub use error::{QpError, Result};
pub use solver::{QpProblem, QpSolution, solve};
