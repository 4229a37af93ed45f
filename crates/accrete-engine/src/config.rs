//! Run configuration, validation, and error types.
//!
//! [`EvolutionConfig`] is the construction input for an
//! [`Evolution`](crate::Evolution). [`validate()`](EvolutionConfig::validate)
//! checks every numeric and structural invariant up front; the constructor
//! calls it again so an unvalidated bundle can never start a run.

use std::error::Error;
use std::fmt;

use accrete_core::constants::{C, DAY, G, KPC, M_SUN};
use accrete_core::{orbit, GridError, GridScale, OpacityKind};
use accrete_wind::{build_wind, WindError, WindKind, WindParams};
use smallvec::SmallVec;

use crate::boundary::BoundaryCondition;
use crate::initial::{InitialCondition, Normalisation};
use crate::magnetosphere::PropellerOutflow;

// ── BinaryConfig ───────────────────────────────────────────────────

/// The accretor and its companion.
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryConfig {
    /// Accretor mass [g]. Default: 5 M☉.
    pub mx: f64,
    /// Companion mass [g]. Default: 0.5 M☉.
    pub mopt: f64,
    /// Orbital period [s]. Default: 0.25 d.
    pub period: f64,
    /// Dimensionless Kerr parameter of the accretor. Default: 0.
    pub kerr: f64,
}

impl Default for BinaryConfig {
    fn default() -> Self {
        Self {
            mx: 5.0 * M_SUN,
            mopt: 0.5 * M_SUN,
            period: 0.25 * DAY,
            kerr: 0.0,
        }
    }
}

impl BinaryConfig {
    /// Gravitational parameter of the accretor.
    pub fn gm(&self) -> f64 {
        G * self.mx
    }
}

// ── DiskConfig ─────────────────────────────────────────────────────

/// Disk physics and boundary policy.
#[derive(Clone, Debug, PartialEq)]
pub struct DiskConfig {
    /// Viscosity parameter. Default: 0.25.
    pub alpha: f64,
    /// Opacity law. Default: Kramers.
    pub opacity: OpacityKind,
    /// Mean molecular weight. Default: 0.62.
    pub mu: f64,
    /// Inner radius [cm]. `None` = ISCO of the accretor (or the stellar
    /// radius of a neutron star, whichever is larger).
    pub r_in: Option<f64>,
    /// Outer radius [cm]. `None` = 0.8 of the accretor's Roche lobe.
    pub r_out: Option<f64>,
    /// Shape of the initial torque profile. Default: `powerF` of order 6.
    pub initial: InitialCondition,
    /// Scale of the initial torque profile. Default: `F0 = 2e38`.
    pub normalisation: Normalisation,
    /// Mass inflow through the outer edge [g/s]. Default: 0.
    pub mdot_out: f64,
    /// Temperature tested against `t_hot` by outer truncation. Default: Teff.
    pub boundary: BoundaryCondition,
    /// Hot-state threshold temperature [K]; `0` disables outer
    /// truncation. Default: 0.
    pub t_hot: f64,
    /// Smallest inward move of the outer edge, in cells. Default: 2.
    pub min_outer_shift: usize,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            alpha: 0.25,
            opacity: OpacityKind::Kramers,
            mu: 0.62,
            r_in: None,
            r_out: None,
            initial: InitialCondition::PowerF { order: 6.0 },
            normalisation: Normalisation::F0(2e38),
            mdot_out: 0.0,
            boundary: BoundaryCondition::Teff,
            t_hot: 0.0,
            min_outer_shift: 2,
        }
    }
}

// ── IrradiationConfig ──────────────────────────────────────────────

/// Self-irradiation of the disk by the central X-ray source.
///
/// The irradiation factor is `Cirr = c_irr · (H / 0.05R)^irr_index`.
/// The cold disk beyond the outer edge of the active range has its own
/// pair of parameters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IrradiationConfig {
    /// Irradiation factor at `H/R = 0.05`. Default: 0.
    pub c_irr: f64,
    /// Power-law index in the relative semi-thickness. Default: 0.
    pub irr_index: f64,
    /// Irradiation factor of the cold disk. Default: 0.
    pub c_irr_cold: f64,
    /// Power-law index of the cold-disk irradiation factor. Default: 0.
    pub irr_index_cold: f64,
}

// ── FluxConfig ─────────────────────────────────────────────────────

/// Observer geometry and spectral band.
#[derive(Clone, Debug, PartialEq)]
pub struct FluxConfig {
    /// Colour correction factor of the X-ray spectrum. Default: 1.7.
    pub colour_factor: f64,
    /// Lower edge of the X-ray band [keV]. Default: 1.
    pub emin_kev: f64,
    /// Upper edge of the X-ray band [keV]. Default: 12.
    pub emax_kev: f64,
    /// Inclination of the disk axis to the line of sight [deg]. Default: 0.
    pub inclination_deg: f64,
    /// Distance to the source [cm]. Default: 10 kpc.
    pub distance: f64,
    /// Take the X-ray colour temperature from the relativistic disk
    /// around a Kerr hole instead of the viscous temperature. Default:
    /// off.
    pub relativistic: bool,
}

impl Default for FluxConfig {
    fn default() -> Self {
        Self {
            colour_factor: 1.7,
            emin_kev: 1.0,
            emax_kev: 12.0,
            inclination_deg: 0.0,
            distance: 10.0 * KPC,
            relativistic: false,
        }
    }
}

// ── WindConfig ─────────────────────────────────────────────────────

/// Wind law selector and its positional parameters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WindConfig {
    /// Which law. Default: no wind.
    pub kind: WindKind,
    /// Law parameters, in the order the law documents.
    pub params: WindParams,
}

impl WindConfig {
    /// Select `kind` with parameters copied from `params`.
    pub fn new(kind: WindKind, params: &[f64]) -> Self {
        Self {
            kind,
            params: SmallVec::from_slice(params),
        }
    }
}

// ── CalculationConfig ──────────────────────────────────────────────

/// Grid resolution and solver controls.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculationConfig {
    /// Number of grid cells. Default: 1000.
    pub nx: usize,
    /// Node spacing in `h`. Default: log.
    pub scale: GridScale,
    /// Time step used by [`Evolution::step`](crate::Evolution::step) [s].
    /// Default: 0.25 d.
    pub tau: f64,
    /// Relative tolerance of the nonlinear solve. Default: 1e-6.
    pub eps: f64,
    /// Iteration cap of the nonlinear solve. Default: 512.
    pub max_iterations: usize,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            nx: 1000,
            scale: GridScale::Log,
            tau: 0.25 * DAY,
            eps: 1e-6,
            max_iterations: 512,
        }
    }
}

// ── NeutronStarConfig ──────────────────────────────────────────────

/// Magnetised neutron-star accretor.
#[derive(Clone, Debug, PartialEq)]
pub struct NeutronStarConfig {
    /// Spin frequency [Hz].
    pub freq: f64,
    /// Stellar radius [cm]. Default: 10 km.
    pub rx: f64,
    /// Surface magnetic field at the pole [G].
    pub bx: f64,
    /// Alfvén radius in units of its spherical estimate. Default: 1.
    pub epsilon_alfven: f64,
    /// Inverse plasma beta of the field threading the disk. A positive
    /// value selects the propeller torque profile. Default: 0.
    pub inverse_beta: f64,
    /// Dead-disk radius [cm]; `0` disables inner truncation. Default: 0.
    pub r_dead: f64,
    /// Share of the inflow ejected in the propeller regime. Default: no
    /// outflow.
    pub outflow: PropellerOutflow,
}

impl Default for NeutronStarConfig {
    fn default() -> Self {
        Self {
            freq: 0.0,
            rx: 1e6,
            bx: 0.0,
            epsilon_alfven: 1.0,
            inverse_beta: 0.0,
            r_dead: 0.0,
            outflow: PropellerOutflow::NoOutflow,
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a configuration or building a run.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The radial grid could not be built.
    Grid(GridError),
    /// The wind law could not be built.
    Wind(WindError),
    /// Boundary-condition selector is neither `Teff` nor `Tirr`.
    UnknownBoundaryCondition {
        /// The rejected selector.
        name: String,
    },
    /// A numeric parameter is outside its admissible range.
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The outer truncation step would allow single-cell moves.
    MinOuterShiftTooSmall {
        /// The configured value.
        configured: usize,
    },
    /// Propeller outflow selector is not a known law.
    UnknownOutflow {
        /// The rejected selector.
        name: String,
    },
    /// Propeller outflow law got the wrong number of parameters.
    OutflowParameters {
        /// Selector of the law.
        outflow: &'static str,
        /// Parameters the law takes.
        expected: usize,
        /// Parameters supplied.
        got: usize,
    },
    /// A positive dead-disk radius lies inside corotation.
    DeadRadiusInsideCorotation {
        /// Configured dead-disk radius [cm].
        r_dead: f64,
        /// Corotation radius [cm].
        r_cor: f64,
    },
    /// The initial profile cannot be scaled to the requested value.
    UnusableNormalisation {
        /// Description of the failure.
        reason: String,
    },
    /// An explicit torque profile does not match the grid.
    ProfileLengthMismatch {
        /// Grid length.
        expected: usize,
        /// Profile length.
        got: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Wind(e) => write!(f, "wind: {e}"),
            Self::UnknownBoundaryCondition { name } => {
                write!(f, "unknown boundary condition '{name}', expected Teff or Tirr")
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid {name} = {value}")
            }
            Self::MinOuterShiftTooSmall { configured } => {
                write!(f, "min_outer_shift {configured} is below minimum of 2")
            }
            Self::UnknownOutflow { name } => write!(
                f,
                "unknown outflow '{name}', expected no-outflow, propeller or const"
            ),
            Self::OutflowParameters {
                outflow,
                expected,
                got,
            } => write!(f, "outflow '{outflow}' takes {expected} parameters, got {got}"),
            Self::DeadRadiusInsideCorotation { r_dead, r_cor } => write!(
                f,
                "dead-disk radius {r_dead:e} cm is inside corotation radius {r_cor:e} cm"
            ),
            Self::UnusableNormalisation { reason } => {
                write!(f, "cannot normalise initial profile: {reason}")
            }
            Self::ProfileLengthMismatch { expected, got } => {
                write!(f, "torque profile has {got} cells, grid has {expected}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Wind(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<WindError> for ConfigError {
    fn from(e: WindError) -> Self {
        Self::Wind(e)
    }
}

// ── EvolutionConfig ────────────────────────────────────────────────

/// Complete configuration for constructing an
/// [`Evolution`](crate::Evolution).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvolutionConfig {
    /// Accretor and companion.
    pub binary: BinaryConfig,
    /// Disk physics and boundary policy.
    pub disk: DiskConfig,
    /// Self-irradiation.
    pub irradiation: IrradiationConfig,
    /// Observer geometry and X-ray band.
    pub flux: FluxConfig,
    /// Wind law.
    pub wind: WindConfig,
    /// Grid and solver controls.
    pub calc: CalculationConfig,
    /// Neutron-star magnetosphere; `None` for a black hole or white dwarf.
    pub ns: Option<NeutronStarConfig>,
}

impl EvolutionConfig {
    /// Validate all numeric and structural invariants.
    ///
    /// Pure: builds nothing but the wind law, which is discarded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Binary parameters.
        let b = &self.binary;
        positive("mx", b.mx)?;
        positive("mopt", b.mopt)?;
        positive("period", b.period)?;
        if !(b.kerr.is_finite() && b.kerr.abs() <= 1.0) {
            return Err(ConfigError::InvalidParameter {
                name: "kerr",
                value: b.kerr,
            });
        }

        // 2. Disk physics.
        let d = &self.disk;
        positive("alpha", d.alpha)?;
        positive("mu", d.mu)?;
        finite("mdot_out", d.mdot_out)?;
        if !(d.t_hot.is_finite() && d.t_hot >= 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "t_hot",
                value: d.t_hot,
            });
        }
        if d.min_outer_shift < 2 {
            return Err(ConfigError::MinOuterShiftTooSmall {
                configured: d.min_outer_shift,
            });
        }
        d.initial.validate()?;
        d.normalisation.validate()?;

        // 3. Radii resolve to a non-empty interval.
        let (r_in, r_out) = (self.r_in(), self.r_out());
        positive("r_in", r_in)?;
        if !(r_out.is_finite() && r_out > r_in) {
            return Err(GridError::InvertedRadii { r_in, r_out }.into());
        }

        // 4. Irradiation and observer.
        finite("c_irr", self.irradiation.c_irr)?;
        finite("irr_index", self.irradiation.irr_index)?;
        finite("c_irr_cold", self.irradiation.c_irr_cold)?;
        finite("irr_index_cold", self.irradiation.irr_index_cold)?;
        let fl = &self.flux;
        positive("colour_factor", fl.colour_factor)?;
        positive("emin_kev", fl.emin_kev)?;
        if !(fl.emax_kev.is_finite() && fl.emax_kev > fl.emin_kev) {
            return Err(ConfigError::InvalidParameter {
                name: "emax_kev",
                value: fl.emax_kev,
            });
        }
        finite("inclination_deg", fl.inclination_deg)?;
        positive("distance", fl.distance)?;
        if fl.relativistic && b.kerr.abs() >= 1.0 {
            return Err(ConfigError::InvalidParameter {
                name: "kerr",
                value: b.kerr,
            });
        }

        // 5. Wind law must build from its parameters.
        build_wind(self.wind.kind, &self.wind.params)?;

        // 6. Grid and solver controls.
        let c = &self.calc;
        if c.nx < accrete_core::Grid::MIN_CELLS {
            return Err(GridError::TooFewCells {
                nx: c.nx,
                min: accrete_core::Grid::MIN_CELLS,
            }
            .into());
        }
        positive("tau", c.tau)?;
        positive("eps", c.eps)?;
        if c.max_iterations == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_iterations",
                value: 0.0,
            });
        }

        // 7. Neutron-star parameters.
        if let Some(ns) = &self.ns {
            positive("freq", ns.freq)?;
            positive("rx", ns.rx)?;
            if !(ns.bx.is_finite() && ns.bx >= 0.0) {
                return Err(ConfigError::InvalidParameter {
                    name: "bx",
                    value: ns.bx,
                });
            }
            positive("epsilon_alfven", ns.epsilon_alfven)?;
            finite("inverse_beta", ns.inverse_beta)?;
            finite("r_dead", ns.r_dead)?;
            ns.outflow.validate()?;
            let r_cor = ns.r_cor(b.gm());
            if ns.r_dead > 0.0 && ns.r_dead < r_cor {
                return Err(ConfigError::DeadRadiusInsideCorotation {
                    r_dead: ns.r_dead,
                    r_cor,
                });
            }
        }

        Ok(())
    }

    /// Inner radius, resolving the default.
    pub fn r_in(&self) -> f64 {
        self.disk.r_in.unwrap_or_else(|| {
            let isco = orbit::r_isco(self.binary.kerr) * self.binary.gm() / (C * C);
            match &self.ns {
                Some(ns) => isco.max(ns.rx),
                None => isco,
            }
        })
    }

    /// Outer radius, resolving the default.
    pub fn r_out(&self) -> f64 {
        self.disk.r_out.unwrap_or_else(|| {
            0.8 * orbit::roche_lobe_radius(self.binary.mx, self.binary.mopt, self.binary.period)
        })
    }
}

impl NeutronStarConfig {
    /// Magnetic dipole moment `μ = Bx·Rx³ / 2`.
    pub fn mu_magn(&self) -> f64 {
        0.5 * self.bx * self.rx.powi(3)
    }

    /// Corotation radius around an accretor of gravitational parameter `gm`.
    pub fn r_cor(&self, gm: f64) -> f64 {
        (gm / (4.0 * std::f64::consts::PI.powi(2) * self.freq * self.freq)).cbrt()
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
