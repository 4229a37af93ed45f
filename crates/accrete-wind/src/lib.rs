//! Disk-wind laws for the accrete diffusion operator.
//!
//! Every law shares one contract: given a read-only
//! [`DiskSnapshot`](accrete_core::DiskSnapshot) it fills a
//! [`WindCoefficients`] triple `(A, B, C)` entering
//! `∂W/∂t = ∂²F/∂h² + A·∂F/∂h + B·F + C`.
//!
//! Laws whose coefficients depend only on radius are evaluated once;
//! [`WindModel::is_dynamic`] laws are re-evaluated before every step.
//! Use [`build_wind`] to construct a law from a [`WindKind`] selector and
//! its parameter list.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cambier2013;
pub mod coefficients;
pub mod error;
pub mod model;
pub mod shields1986;
pub mod ss73c;
pub mod test_laws;

pub use cambier2013::Cambier2013Wind;
pub use coefficients::WindCoefficients;
pub use error::WindError;
pub use model::{build_wind, NoWind, WindKind, WindModel, WindParams};
pub use shields1986::Shields1986Wind;
pub use ss73c::Ss73cWind;
pub use test_laws::{TestAWind, TestBWind, TestCWind};
