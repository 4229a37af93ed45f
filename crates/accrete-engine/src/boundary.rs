//! Outer-edge truncation of the active disk.
//!
//! When the disk is fading, the outermost nodes whose selected
//! temperature has dropped below `T_hot` leave the active range. The edge
//! only ever moves inward, and only in jumps of at least
//! `min_outer_shift` cells so that a node hovering around `T_hot` cannot
//! make the edge flicker.

use std::fmt;
use std::str::FromStr;

use accrete_core::StepError;

use crate::config::ConfigError;
use crate::state::EvolutionState;

// ── BoundaryCondition ──────────────────────────────────────────────

/// Which temperature is compared with `T_hot`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryCondition {
    /// Effective temperature including irradiation.
    #[default]
    Teff,
    /// Irradiation temperature alone.
    Tirr,
}

impl BoundaryCondition {
    /// The selected temperature profile of `state`.
    pub fn temperature<'a>(&self, state: &'a EvolutionState) -> &'a [f64] {
        match self {
            Self::Teff => state.tph(),
            Self::Tirr => state.tirr(),
        }
    }

    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Teff => "Teff",
            Self::Tirr => "Tirr",
        }
    }
}

impl FromStr for BoundaryCondition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Teff" => Ok(Self::Teff),
            "Tirr" => Ok(Self::Tirr),
            other => Err(ConfigError::UnknownBoundaryCondition {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── OuterTruncation ────────────────────────────────────────────────

/// Outer-edge policy of one run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OuterTruncation {
    /// Temperature compared with `t_hot`.
    pub boundary: BoundaryCondition,
    /// Hot-disk threshold [K]; `0` disables truncation.
    pub t_hot: f64,
    /// Smallest inward move of the edge, in cells.
    pub min_shift: usize,
}

impl OuterTruncation {
    /// Whether truncation may run at all for this configuration.
    pub fn is_enabled(&self) -> bool {
        self.t_hot > 0.0
    }

    /// Apply truncation to `state` after a diffusion step.
    ///
    /// Runs only while the accretion rate is not rising. Returns the new
    /// outer index when the edge moved.
    pub(crate) fn apply(&self, state: &mut EvolutionState) -> Result<Option<usize>, StepError> {
        if !self.is_enabled() || state.mdot_in() > state.mdot_in_prev() {
            return Ok(None);
        }
        let moved = new_last(
            self.boundary.temperature(state),
            state.first(),
            state.last(),
            self.t_hot,
            self.min_shift,
        )?;
        if let Some(last) = moved {
            state.set_last(last);
        }
        Ok(moved)
    }
}

/// Locate the new outer index for temperature profile `temps`.
///
/// Walks inward from `last` past every node colder than `t_hot`. The
/// result is reported only when it lies at least `min_shift` cells inside
/// `last`. Fails with [`StepError::DomainExhausted`] when fewer than
/// three active nodes would remain.
pub fn new_last(
    temps: &[f64],
    first: usize,
    last: usize,
    t_hot: f64,
    min_shift: usize,
) -> Result<Option<usize>, StepError> {
    let mut ii = last;
    while temps[ii] < t_hot {
        if ii <= first + 2 {
            return Err(StepError::DomainExhausted { first, last });
        }
        ii -= 1;
    }
    if last - ii >= min_shift {
        Ok(Some(ii))
    } else {
        Ok(None)
    }
}
