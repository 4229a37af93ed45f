//! Accrete: time-dependent evolution of accretion disks.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! accrete sub-crates. For most users, adding `accrete` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use accrete::prelude::*;
//!
//! // A black-hole transient with a Shakura–Sunyaev wind.
//! let mut config = EvolutionConfig::default();
//! config.calc.nx = 200;
//! config.disk.t_hot = 1e4;
//! config.wind.kind = WindKind::Ss73c;
//! config.wind.params = smallvec::smallvec![0.05];
//!
//! let mut evolution = Evolution::new(config).unwrap();
//! for _ in 0..10 {
//!     let metrics = evolution.step().unwrap();
//!     assert!(metrics.solver_iterations > 0);
//! }
//!
//! let state = evolution.state();
//! assert_eq!(state.i_t(), 10);
//! assert!(state.mdot_in() > 0.0);
//! assert!(state.mdisk() > 0.0);
//! assert!(state.magnitude(Passband::V).is_finite());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `accrete-core` | Constants, grid, opacity relations, spectra, errors |
//! | [`wind`] | `accrete-wind` | Wind trait, coefficients and built-in laws |
//! | [`solver`] | `accrete-solver` | Tridiagonal and nonlinear diffusion solves |
//! | [`engine`] | `accrete-engine` | Configuration, state, truncation, magnetosphere, stepper |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Constants, grid, opacity relations and errors (`accrete-core`).
///
/// Contains the [`core::Grid`], the [`core::OpacityRelation`] mapping
/// torque to surface density, Planck-function helpers and the
/// [`core::DiskSnapshot`] trait wind laws read the disk through.
pub use accrete_core as core;

/// Wind laws (`accrete-wind`).
///
/// The [`wind::WindModel`] trait is the extension point for user-defined
/// mass-loss prescriptions.
pub use accrete_wind as wind;

/// Tridiagonal and nonlinear diffusion solves (`accrete-solver`).
pub use accrete_solver as solver;

/// Configuration, disk state and the evolution stepper (`accrete-engine`).
///
/// [`engine::Evolution`] advances an [`engine::EvolutionState`] one
/// implicit diffusion step at a time.
pub use accrete_engine as engine;

/// Common imports for typical accrete usage.
///
/// ```rust
/// use accrete::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use accrete_core::{DiskSnapshot, Grid, GridScale, OpacityKind, Passband};

    // Errors
    pub use accrete_core::{GridError, SolverError, StepError};
    pub use accrete_engine::ConfigError;
    pub use accrete_wind::WindError;

    // Wind
    pub use accrete_wind::{WindCoefficients, WindKind, WindModel};

    // Engine
    pub use accrete_engine::{
        BoundaryCondition, DiskRegion, Evolution, EvolutionConfig, EvolutionState,
        InitialCondition, NeutronStarConfig, Normalisation, PropellerOutflow, StepMetrics,
    };
}
