//! Core types and traits for the accrete disk-evolution engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! radial [`Grid`] in the specific-angular-momentum coordinate, the vertical
//! structure relations ([`OpacityRelation`]), blackbody helpers, compact
//! object and binary geometry, the error taxonomy, and the read-only
//! [`DiskSnapshot`] view that wind laws consume.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod constants;
pub mod error;
pub mod grid;
pub mod opacity;
pub mod orbit;
pub mod spectrum;
pub mod traits;

pub use error::{GridError, SolverError, StepError};
pub use grid::{Grid, GridScale};
pub use opacity::{OpacityKind, OpacityRelation};
pub use spectrum::{Passband, RelativisticDisk};
pub use traits::{DensityLaw, DiskSnapshot};
