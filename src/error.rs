use thiserror::Error;

/// Error types for the quadratic program solver and its surrounding harness.
#[derive(Debug, Error)]
pub enum QpError {
    /// Cholesky factorization encountered a non-positive pivot: `G` is not
    /// symmetric positive-definite.
    #[error("G is not positive definite (pivot {pivot} at row {row} was not positive)")]
    NotPositiveDefinite { row: usize, pivot: f64 },

    /// The dual active-set loop found no finite step length; the feasible
    /// region is empty.
    #[error("problem is infeasible: no finite step satisfies the active constraints")]
    Infeasible,

    /// Raised by the harness before the solver runs: dimensions of `G`, `a`,
    /// `C`, `b`, or `meq` are inconsistent with each other.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Raised by the harness before the solver runs: a required field is
    /// missing or a configuration value is out of range.
    #[error("bad configuration: {0}")]
    BadConfiguration(String),

    /// A regression input file could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A regression input file was not valid JSON, or did not match the
    /// expected record shape.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for the solver and harness.
pub type Result<T> = std::result::Result<T, QpError>;
