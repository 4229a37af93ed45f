//! Error types for the accrete engine.
//!
//! Organised by subsystem: grid construction, the nonlinear diffusion
//! solve, and the per-step state machine. Configuration errors live in
//! `accrete-engine` next to the configuration they describe.

use std::error::Error;
use std::fmt;

/// Errors from building or validating a radial [`Grid`](crate::Grid).
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// The grid has fewer cells than the stepper can work with.
    TooFewCells {
        /// Requested cell count.
        nx: usize,
        /// Minimum supported cell count.
        min: usize,
    },
    /// The gravitational parameter is not finite and positive.
    InvalidGm {
        /// The rejected value.
        value: f64,
    },
    /// A coordinate is NaN, infinite, zero or negative.
    InvalidCoordinate {
        /// Index of the offending cell.
        index: usize,
        /// The rejected value.
        value: f64,
    },
    /// `h[index]` is not strictly greater than `h[index - 1]`.
    NotIncreasing {
        /// Index of the first cell that breaks monotonicity.
        index: usize,
    },
    /// The inner radius is not below the outer radius.
    InvertedRadii {
        /// Requested inner radius.
        r_in: f64,
        /// Requested outer radius.
        r_out: f64,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewCells { nx, min } => {
                write!(f, "grid has {nx} cells, at least {min} required")
            }
            Self::InvalidGm { value } => {
                write!(f, "GM must be finite and positive, got {value}")
            }
            Self::InvalidCoordinate { index, value } => {
                write!(f, "h[{index}] = {value} is not finite and positive")
            }
            Self::NotIncreasing { index } => {
                write!(f, "h is not strictly increasing at index {index}")
            }
            Self::InvertedRadii { r_in, r_out } => {
                write!(f, "inner radius {r_in} must be below outer radius {r_out}")
            }
        }
    }
}

impl Error for GridError {}

/// Errors from the implicit nonlinear diffusion solve.
#[derive(Clone, Debug, PartialEq)]
pub enum SolverError {
    /// The chord iteration did not reach the tolerance within its budget.
    NotConverged {
        /// Iterations performed.
        iterations: usize,
        /// Relative change of the last iteration.
        residual: f64,
    },
    /// The iterate produced NaN or infinity.
    NonFinite {
        /// Index of the first non-finite cell.
        index: usize,
    },
    /// A zero pivot appeared during tridiagonal elimination.
    SingularMatrix {
        /// Row at which elimination broke down.
        index: usize,
    },
    /// The active range holds fewer than three cells.
    RangeTooShort {
        /// Inner active index.
        first: usize,
        /// Outer active index.
        last: usize,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConverged {
                iterations,
                residual,
            } => write!(
                f,
                "diffusion solve did not converge after {iterations} iterations \
                 (relative change {residual:e})"
            ),
            Self::NonFinite { index } => write!(f, "non-finite torque at cell {index}"),
            Self::SingularMatrix { index } => {
                write!(f, "singular tridiagonal system at row {index}")
            }
            Self::RangeTooShort { first, last } => {
                write!(f, "active range [{first}, {last}] is too short to solve")
            }
        }
    }
}

impl Error for SolverError {}

/// Errors from advancing the disk by one step.
///
/// A failed step leaves the state exactly as it was before the call.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// The requested time step is NaN, infinite, zero or negative.
    InvalidTimeStep {
        /// The rejected value.
        tau: f64,
    },
    /// The nonlinear diffusion solve failed.
    Solver(SolverError),
    /// Truncation collapsed the active range: the inner radius would
    /// exceed the outer radius.
    DomainExhausted {
        /// Inner active index when the collapse was detected.
        first: usize,
        /// Outer active index when the collapse was detected.
        last: usize,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimeStep { tau } => {
                write!(f, "time step must be finite and positive, got {tau}")
            }
            Self::Solver(e) => write!(f, "solver: {e}"),
            Self::DomainExhausted { first, last } => write!(
                f,
                "domain exhausted: inner radius exceeds outer radius (first {first}, last {last})"
            ),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Solver(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SolverError> for StepError {
    fn from(e: SolverError) -> Self {
        Self::Solver(e)
    }
}
