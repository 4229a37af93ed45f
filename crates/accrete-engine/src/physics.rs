//! Fixed physical parameters shared by every state of one run.

use accrete_core::constants::C;
use accrete_core::{constants, orbit, OpacityRelation, RelativisticDisk};

use crate::config::EvolutionConfig;

/// Immutable per-run physics consumed by the observer layer.
///
/// Built once from an [`EvolutionConfig`] and shared between a state and
/// its staged copies.
#[derive(Clone, Debug, PartialEq)]
pub struct DiskPhysics {
    /// Vertical-structure relation.
    pub oprel: OpacityRelation,
    /// Radiative efficiency of accretion.
    pub eta: f64,
    /// Irradiation factor at `H/R = 0.05`.
    pub c_irr: f64,
    /// Power-law index of the irradiation factor in `H/R`.
    pub irr_index: f64,
    /// Irradiation factor of the cold disk at `H/R = 0.05`.
    pub c_irr_cold: f64,
    /// Power-law index of the cold-disk irradiation factor.
    pub irr_index_cold: f64,
    /// Colour correction factor of the X-ray spectrum.
    pub colour_factor: f64,
    /// Lower edge of the X-ray band [Hz].
    pub nu_min: f64,
    /// Upper edge of the X-ray band [Hz].
    pub nu_max: f64,
    /// Cosine of the inclination.
    pub cos_i: f64,
    /// Distance to the source [cm].
    pub distance: f64,
    /// Mass inflow through the outer edge [g/s].
    pub mdot_out: f64,
    /// Relativistic disk supplying the X-ray colour temperature, if
    /// selected.
    pub relativistic: Option<RelativisticDisk>,
}

impl DiskPhysics {
    /// Derive the run physics from a validated configuration.
    pub fn from_config(config: &EvolutionConfig) -> Self {
        let gm = config.binary.gm();
        Self {
            oprel: OpacityRelation::new(config.disk.opacity, config.disk.alpha, config.disk.mu, gm),
            eta: orbit::efficiency(config.binary.kerr),
            c_irr: config.irradiation.c_irr,
            irr_index: config.irradiation.irr_index,
            c_irr_cold: config.irradiation.c_irr_cold,
            irr_index_cold: config.irradiation.irr_index_cold,
            colour_factor: config.flux.colour_factor,
            nu_min: constants::kev_to_hertz(config.flux.emin_kev),
            nu_max: constants::kev_to_hertz(config.flux.emax_kev),
            cos_i: config.flux.inclination_deg.to_radians().cos(),
            distance: config.flux.distance,
            mdot_out: config.disk.mdot_out,
            relativistic: config
                .flux
                .relativistic
                .then(|| RelativisticDisk::new(config.binary.kerr)),
        }
    }

    /// X-ray irradiation flux per unit area at radius `r` for irradiation
    /// factor `cirr` and accretion rate `mdot_in`.
    pub fn irradiation_flux(&self, cirr: f64, mdot_in: f64, r: f64) -> f64 {
        cirr * self.eta * mdot_in.max(0.0) * C * C / (4.0 * std::f64::consts::PI * r * r)
    }
}
