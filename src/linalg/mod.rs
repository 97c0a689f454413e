//! Dense linear-algebra building blocks for the active-set solver.
//!
//! Everything here works on small, dense, column-major matrices (`faer::Mat`)
//! and is free of any notion of a "problem" or "constraint" — those live in
//! [`crate::solver`].

pub mod active_set;
pub mod cholesky;
pub mod primitives;

pub use active_set::{ActiveSetFactorization, LinearlyDependent};
pub use primitives::{Rotation, apply_rotation, column, compute_rotation, dot};
