//! Common domain types and the library-wide error structure.

pub mod types;

pub use types::*;

/// Errors surfaced by grid construction, boundary resolution and time stepping.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FdError {
    /// Caller-side precondition violation (sizes, ranges, scheme parameters).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Non-convergence in an iterative linear solve.
    #[error("convergence failure: {0}")]
    ConvergenceFailure(String),
    /// Numerical issue (singular system, non-finite state).
    #[error("numerical error: {0}")]
    NumericalError(String),
    /// Boundary variant the current code path cannot honour.
    #[error("unsupported boundary: {0}")]
    UnsupportedBoundary(String),
    /// Failure writing solver output.
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for FdError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Fails with [`FdError::InvalidInput`] unless `actual == expected`.
pub(crate) fn ensure_len(what: &str, actual: usize, expected: usize) -> Result<(), FdError> {
    if actual != expected {
        return Err(FdError::InvalidInput(format!(
            "{what} has {actual} points, expected {expected}"
        )));
    }
    Ok(())
}
