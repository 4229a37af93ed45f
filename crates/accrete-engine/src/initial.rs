//! Initial torque profiles and their normalisation.
//!
//! Every shape is written in `x = (h - h_in) / (h_out - h_in)` and equals
//! one at the outer edge, so the normalisation fixes `F0 = F(h_out)`.

use std::f64::consts::FRAC_PI_2;

use accrete_core::{DensityLaw, Grid, OpacityRelation};

use crate::config::ConfigError;

/// Shape of the initial torque profile.
#[derive(Clone, Debug, PartialEq)]
pub enum InitialCondition {
    /// `F ∝ x^order`.
    PowerF {
        /// Power-law index.
        order: f64,
    },
    /// `Σ ∝ x^order`.
    PowerSigma {
        /// Power-law index.
        order: f64,
    },
    /// `F ∝ sin(πx/2)`.
    SineF,
}

impl InitialCondition {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::PowerF { order } | Self::PowerSigma { order } => {
                if order.is_finite() && order >= 0.0 {
                    Ok(())
                } else {
                    Err(ConfigError::InvalidParameter {
                        name: "initial order",
                        value: order,
                    })
                }
            }
            Self::SineF => Ok(()),
        }
    }

    /// Unnormalised profile with `F(h_out) = 1`.
    pub fn shape(&self, grid: &Grid, oprel: &OpacityRelation) -> Vec<f64> {
        let h = grid.h();
        let h_in = h[0];
        let h_out = h[h.len() - 1];
        let one_minus_m = 1.0 - oprel.m();
        h.iter()
            .map(|&hi| {
                let x = (hi - h_in) / (h_out - h_in);
                match *self {
                    Self::PowerF { order } => x.powf(order),
                    Self::PowerSigma { order } => {
                        (hi / h_out).powf((3.0 - oprel.n()) / one_minus_m)
                            * x.powf(order / one_minus_m)
                    }
                    Self::SineF => (FRAC_PI_2 * x).sin(),
                }
            })
            .collect()
    }
}

/// How the profile amplitude is fixed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Normalisation {
    /// Torque at the outer edge [g cm² s⁻²].
    F0(f64),
    /// Initial disk mass [g].
    Mdisk0(f64),
    /// Accretion rate of a steady disk with the same outer torque [g/s].
    Mdot0(f64),
}

impl Normalisation {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let (name, value) = match *self {
            Self::F0(v) => ("F0", v),
            Self::Mdisk0(v) => ("Mdisk0", v),
            Self::Mdot0(v) => ("Mdot0", v),
        };
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidParameter { name, value })
        }
    }
}

/// Build the normalised initial torque over the whole grid.
pub fn initial_torque(
    grid: &Grid,
    initial: &InitialCondition,
    normalisation: Normalisation,
    oprel: &OpacityRelation,
) -> Result<Vec<f64>, ConfigError> {
    let shape = initial.shape(grid, oprel);
    let h = grid.h();
    let f0 = match normalisation {
        Normalisation::F0(f0) => f0,
        Normalisation::Mdot0(mdot) => mdot * (h[h.len() - 1] - h[0]),
        Normalisation::Mdisk0(mass) => {
            let unit_mass = disk_mass(grid, &shape, oprel);
            if !(unit_mass.is_finite() && unit_mass > 0.0) {
                return Err(ConfigError::UnusableNormalisation {
                    reason: format!("profile has mass {unit_mass}"),
                });
            }
            (mass / unit_mass).powf(1.0 / (1.0 - oprel.m()))
        }
    };
    Ok(shape.into_iter().map(|s| f0 * s).collect())
}

/// Mass of the disk with torque `f` over the whole grid.
pub(crate) fn disk_mass(grid: &Grid, f: &[f64], oprel: &OpacityRelation) -> f64 {
    let sigma: Vec<f64> = f
        .iter()
        .zip(grid.h())
        .map(|(&f, &h)| oprel.sigma(oprel.w(f, h), h))
        .collect();
    grid.integrate_disk(&sigma, 0, grid.len() - 1)
}
