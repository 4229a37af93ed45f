//! Time-stepping accretion-disk evolution engine.
//!
//! [`Evolution`] owns an [`EvolutionState`] together with the wind law,
//! the diffusion stepper and, for neutron-star primaries, the
//! [`Magnetosphere`]. Each call to [`Evolution::step`] runs
//!
//! 1. inner-edge truncation (magnetosphere only),
//! 2. one implicit nonlinear diffusion step,
//! 3. outer-edge truncation,
//!
//! on a staged copy of the state that is committed only if every stage
//! succeeds. Derived quantities (surface density, temperatures,
//! luminosities, magnitudes) are computed lazily on first access and
//! cached until the next committed step.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod config;
pub mod evolution;
pub mod initial;
pub mod magnetosphere;
pub mod metrics;
pub mod physics;
pub mod state;
mod structure;

pub use boundary::{BoundaryCondition, OuterTruncation};
pub use config::{
    BinaryConfig, CalculationConfig, ConfigError, DiskConfig, EvolutionConfig, FluxConfig,
    IrradiationConfig, NeutronStarConfig, WindConfig,
};
pub use evolution::Evolution;
pub use initial::{InitialCondition, Normalisation};
pub use magnetosphere::{Magnetosphere, PropellerOutflow};
pub use metrics::StepMetrics;
pub use physics::DiskPhysics;
pub use state::{DiskRegion, EvolutionState};
