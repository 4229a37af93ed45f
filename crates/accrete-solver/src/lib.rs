//! Implicit nonlinear diffusion solver for the accrete disk engine.
//!
//! [`DiffusionStepper::advance`] performs one backward-Euler step of
//! `∂W(F)/∂t = ∂²F/∂h² + A·∂F/∂h + B·F + C` over the active range of the
//! grid. Each chord iteration is a tridiagonal solve
//! ([`Tridiagonal`]); iteration stops once the relative change of `F`
//! drops below the configured tolerance, and failure to get there within
//! the iteration cap is an error, never a silent fallback.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod nonlinear;
pub mod tridiagonal;

pub use nonlinear::{DiffusionStepper, SolveReport, SolverSettings, StepInput};
pub use tridiagonal::Tridiagonal;
