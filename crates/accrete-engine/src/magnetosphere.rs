//! Magnetic torque and inner-edge truncation for a neutron-star accretor.
//!
//! The stellar dipole threads the inner disk. With a positive inverse
//! plasma beta it adds a torque `Fmagn(R)` that spins the disk up inside
//! corotation and down outside it; otherwise the disk feels the field
//! only through a constant torque at its inner boundary. The inner edge
//! follows the magnetospheric radius while the accretion rate declines
//! and is pinned at the dead-disk radius once it reaches it. Outside
//! corotation a [`PropellerOutflow`] law decides how much of the inflow
//! is thrown out instead of reaching the stellar surface.

use std::f64::consts::PI;
use std::fmt;

use accrete_core::{Grid, StepError};

use crate::config::{ConfigError, NeutronStarConfig};
use crate::state::EvolutionState;

/// Torque efficiency of the magnetosphere-disk coupling.
pub const K_T: f64 = 1.0 / 3.0;

/// Magnetospheric radius in units of the Alfvén radius at which the
/// boundary torque is evaluated.
pub const XI: f64 = 0.7;

// ── PropellerOutflow ───────────────────────────────────────────────

/// Share of the inner-edge accretion rate ejected by the magnetosphere.
///
/// Every law ejects nothing while the magnetospheric radius lies inside
/// corotation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PropellerOutflow {
    /// Everything reaching the inner edge is accreted.
    #[default]
    NoOutflow,
    /// Everything is ejected in the propeller regime.
    Propeller,
    /// A fixed share in `[0, 1]` is ejected in the propeller regime.
    Partial {
        /// Ejected share.
        share: f64,
    },
}

impl PropellerOutflow {
    /// Build a law from its selector and positional parameters:
    /// `no-outflow`, `propeller` or `const <share>`.
    pub fn from_selector(name: &str, params: &[f64]) -> Result<Self, ConfigError> {
        let (outflow, expected) = match name {
            "no-outflow" => (Self::NoOutflow, 0),
            "propeller" => (Self::Propeller, 0),
            "const" => (
                Self::Partial {
                    share: params.first().copied().unwrap_or(f64::NAN),
                },
                1,
            ),
            other => {
                return Err(ConfigError::UnknownOutflow {
                    name: other.to_string(),
                })
            }
        };
        if params.len() != expected {
            return Err(ConfigError::OutflowParameters {
                outflow: outflow.as_str(),
                expected,
                got: params.len(),
            });
        }
        outflow.validate()?;
        Ok(outflow)
    }

    /// Canonical selector.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoOutflow => "no-outflow",
            Self::Propeller => "propeller",
            Self::Partial { .. } => "const",
        }
    }

    /// Check the ejected share.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Partial { share } if !(0.0..=1.0).contains(&share) => {
                Err(ConfigError::InvalidParameter {
                    name: "outflow share",
                    value: share,
                })
            }
            _ => Ok(()),
        }
    }

    /// Ejected share for magnetospheric radius `r_m` and corotation
    /// radius `r_cor`.
    pub fn fraction(self, r_m: f64, r_cor: f64) -> f64 {
        if r_m <= r_cor {
            return 0.0;
        }
        match self {
            Self::NoOutflow => 0.0,
            Self::Propeller => 1.0,
            Self::Partial { share } => share,
        }
    }
}

impl fmt::Display for PropellerOutflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Magnetosphere ──────────────────────────────────────────────────

/// Neutron-star magnetosphere on a fixed grid.
///
/// Torque profiles are precomputed once per run and shared by every state
/// of that run.
#[derive(Clone, Debug, PartialEq)]
pub struct Magnetosphere {
    gm: f64,
    mu_magn: f64,
    r_cor: f64,
    r_dead: f64,
    r_m_min: f64,
    epsilon_alfven: f64,
    inverse_beta: f64,
    outflow: PropellerOutflow,
    fmagn: Vec<f64>,
    dfmagn_dh: Vec<f64>,
    d2fmagn_dh2: Vec<f64>,
}

impl Magnetosphere {
    /// Precompute the magnetic torque and its derivatives on `grid`.
    pub fn new(ns: &NeutronStarConfig, grid: &Grid) -> Self {
        let gm = grid.gm();
        let mu_magn = ns.mu_magn();
        let r_cor = ns.r_cor(gm);
        let ib = ns.inverse_beta;
        let mu2 = mu_magn * mu_magn;

        let profile = |inner: &dyn Fn(f64) -> f64, outer: &dyn Fn(f64) -> f64| -> Vec<f64> {
            grid.r()
                .iter()
                .map(|&r| if r < r_cor { inner(r / r_cor) } else { outer(r_cor / r) })
                .collect()
        };

        let brackets = profile(
            &|x: f64| -1.0 + 2.0 * x.powf(1.5) - 2.0 / 3.0 * x.powi(3),
            &|y: f64| 1.0 - 2.0 / 3.0 * y.powf(1.5),
        );
        let fmagn = brackets
            .iter()
            .zip(grid.r())
            .map(|(b, r)| ib * mu2 / 3.0 / r.powi(3) * b)
            .collect();

        let brackets = profile(&|x: f64| 1.0 - x.powf(1.5), &|y: f64| -1.0 + y.powf(1.5));
        let dfmagn_dh = brackets
            .iter()
            .zip(grid.h())
            .map(|(b, h)| ib * 2.0 * mu2 * gm.powi(3) / h.powi(7) * b)
            .collect();

        let brackets = profile(&|x: f64| -7.0 + 4.0 * x.powf(1.5), &|y: f64| 7.0 - 10.0 * y.powf(1.5));
        let d2fmagn_dh2 = brackets
            .iter()
            .zip(grid.r())
            .map(|(b, r)| ib * 2.0 * mu2 / gm / r.powi(4) * b)
            .collect();

        Self {
            gm,
            mu_magn,
            r_cor,
            r_dead: ns.r_dead,
            r_m_min: ns.rx.max(grid.r()[0]),
            epsilon_alfven: ns.epsilon_alfven,
            inverse_beta: ib,
            outflow: ns.outflow,
            fmagn,
            dfmagn_dh,
            d2fmagn_dh2,
        }
    }

    /// Magnetic dipole moment [G cm³].
    pub fn mu_magn(&self) -> f64 {
        self.mu_magn
    }

    /// Corotation radius [cm].
    pub fn r_cor(&self) -> f64 {
        self.r_cor
    }

    /// Magnetic torque on every node.
    pub fn fmagn(&self) -> &[f64] {
        &self.fmagn
    }

    /// `∂Fmagn/∂h` on every node.
    pub fn dfmagn_dh(&self) -> &[f64] {
        &self.dfmagn_dh
    }

    /// `∂²Fmagn/∂h²` on every node; enters the diffusion step as an
    /// extra source term.
    pub fn d2fmagn_dh2(&self) -> &[f64] {
        &self.d2fmagn_dh2
    }

    /// Alfvén radius for accretion rate `mdot` [cm].
    pub fn r_alfven(&self, mdot: f64) -> f64 {
        self.epsilon_alfven * (self.mu_magn.powi(4) / (mdot * mdot * self.gm)).powf(1.0 / 7.0)
    }

    /// Magnetospheric radius for accretion rate `mdot` [cm]: the Alfvén
    /// radius, no smaller than the stellar radius or the grid's inner
    /// edge and no larger than a configured dead-disk radius.
    pub fn magnetospheric_radius(&self, mdot: f64) -> f64 {
        let r_m = self.r_m_min.max(self.r_alfven(mdot));
        if self.r_dead > 0.0 {
            r_m.min(self.r_dead)
        } else {
            r_m
        }
    }

    /// Share of the accretion rate `mdot` ejected by the propeller.
    pub fn ejected_fraction(&self, mdot: f64) -> f64 {
        self.outflow
            .fraction(self.magnetospheric_radius(mdot), self.r_cor)
    }

    /// The propeller outflow law.
    pub fn outflow(&self) -> PropellerOutflow {
        self.outflow
    }

    /// Adjust an initial torque profile for the magnetic field.
    ///
    /// Without a disk-threading field every node gains the corotation
    /// boundary torque `k_t·μ²/R_cor³`; with one, the magnetic torque is
    /// subtracted relative to its value at the inner node.
    pub fn initial_shift(&self, f: &mut [f64]) {
        if self.inverse_beta <= 0.0 {
            let f_in = K_T * self.mu_magn * self.mu_magn / self.r_cor.powi(3);
            for f in f.iter_mut() {
                *f += f_in;
            }
        } else {
            let f0 = self.fmagn[0];
            for (f, fm) in f.iter_mut().zip(&self.fmagn) {
                *f += -fm + f0;
            }
        }
    }

    /// Boundary torque for an inner edge at radius `r_m`.
    pub fn boundary_torque(&self, r_m: f64) -> f64 {
        if self.inverse_beta > 0.0 {
            return 0.0;
        }
        let k = K_T * XI.powf(-3.5) * self.mu_magn * self.mu_magn;
        if r_m <= self.r_cor {
            k / self.r_cor.powi(3)
        } else {
            k / r_m.powi(3)
        }
    }

    /// Move the inner edge of `state` out to the magnetospheric radius.
    ///
    /// Does nothing without a dead-disk radius or while the accretion rate
    /// is rising. Returns the new inner index when truncation ran.
    pub(crate) fn truncate_inner(
        &self,
        state: &mut EvolutionState,
    ) -> Result<Option<usize>, StepError> {
        // `mdot_in_prev` is recorded from this same torque field at the
        // start of the step, so the rate check never skips a step here.
        if self.r_dead <= 0.0 || state.mdot_in() > state.mdot_in_prev() {
            return Ok(None);
        }
        let r_m = self.magnetospheric_radius(state.mdot_in());
        let (first, last) = (state.first(), state.last());
        let ii = scan_inner(state.r(), first, last, r_m)?;
        if self.newly_pinned(r_m, first, ii) {
            log::info!(
                "step {}: inner edge reached dead-disk radius {:e} cm at node {ii}",
                state.i_t(),
                self.r_dead
            );
        }
        let f_in = self.boundary_torque(state.r()[ii]);
        state.set_inner_edge(ii, f_in);
        Ok(Some(ii))
    }

    /// Whether a move of the inner edge from `first` to `ii` for radius
    /// `r_m` lands it on the dead-disk radius.
    fn newly_pinned(&self, r_m: f64, first: usize, ii: usize) -> bool {
        self.r_dead > 0.0 && r_m >= self.r_dead && ii != first
    }
}

/// Index of the innermost node whose outer neighbour lies beyond `r_m`.
///
/// Fails with [`StepError::DomainExhausted`] when fewer than three active
/// nodes would remain.
pub fn scan_inner(r: &[f64], first: usize, last: usize, r_m: f64) -> Result<usize, StepError> {
    (first..last.saturating_sub(2))
        .find(|&ii| r[ii + 1] > r_m)
        .ok_or(StepError::DomainExhausted { first, last })
}

/// Kepler frequency at radius `r` around `gm` [Hz].
pub fn kepler_frequency(gm: f64, r: f64) -> f64 {
    (gm / r.powi(3)).sqrt() / (2.0 * PI)
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrete_test_utils::assert_rel_eq;
    use accrete_test_utils::fixtures::physical_grid;

    fn ns(inverse_beta: f64) -> NeutronStarConfig {
        NeutronStarConfig {
            freq: 100.0,
            bx: 1e8,
            inverse_beta,
            ..NeutronStarConfig::default()
        }
    }

    #[test]
    fn corotation_matches_kepler_frequency() {
        let grid = physical_grid(100);
        let m = Magnetosphere::new(&ns(0.0), &grid);
        assert_rel_eq(kepler_frequency(grid.gm(), m.r_cor()), 100.0, 1e-12);
    }

    #[test]
    fn no_threading_field_means_no_magnetic_torque() {
        let grid = physical_grid(50);
        let m = Magnetosphere::new(&ns(0.0), &grid);
        assert!(m.fmagn().iter().all(|&x| x == 0.0));
        assert!(m.dfmagn_dh().iter().all(|&x| x == 0.0));
        assert!(m.d2fmagn_dh2().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn uniform_shift_without_threading_field() {
        let grid = physical_grid(20);
        let m = Magnetosphere::new(&ns(0.0), &grid);
        let mut f = vec![1.0; 20];
        m.initial_shift(&mut f);
        let expected = 1.0 + K_T * m.mu_magn().powi(2) / m.r_cor().powi(3);
        for x in f {
            assert_rel_eq(x, expected, 1e-12);
        }
    }

    #[test]
    fn threaded_shift_keeps_inner_torque() {
        let grid = physical_grid(20);
        let m = Magnetosphere::new(&ns(1.0), &grid);
        let mut f = vec![1e30; 20];
        m.initial_shift(&mut f);
        assert_eq!(f[0], 1e30);
        for i in 1..20 {
            assert_rel_eq(f[i], 1e30 - m.fmagn()[i] + m.fmagn()[0], 1e-12);
        }
    }

    #[test]
    fn magnetic_torque_derivative_is_consistent() {
        let grid = physical_grid(2000);
        let m = Magnetosphere::new(&ns(1.0), &grid);
        let h = grid.h();
        for i in [200, 800, 1500] {
            let numeric = (m.fmagn()[i + 1] - m.fmagn()[i - 1]) / (h[i + 1] - h[i - 1]);
            assert_rel_eq(numeric, m.dfmagn_dh()[i], 1e-3);
        }
    }

    #[test]
    fn magnetic_torque_curvature_is_consistent() {
        let grid = physical_grid(2000);
        let m = Magnetosphere::new(&ns(1.0), &grid);
        let h = grid.h();
        for i in [200, 800, 1500] {
            let numeric =
                (m.dfmagn_dh()[i + 1] - m.dfmagn_dh()[i - 1]) / (h[i + 1] - h[i - 1]);
            assert_rel_eq(numeric, m.d2fmagn_dh2()[i], 1e-3);
        }
    }

    #[test]
    fn threaded_field_gives_free_inner_boundary() {
        let grid = physical_grid(20);
        assert_eq!(Magnetosphere::new(&ns(1.0), &grid).boundary_torque(1e9), 0.0);
    }

    #[test]
    fn boundary_torque_saturates_inside_corotation() {
        let grid = physical_grid(20);
        let m = Magnetosphere::new(&ns(0.0), &grid);
        let inside = m.boundary_torque(0.5 * m.r_cor());
        assert_eq!(inside, m.boundary_torque(m.r_cor()));
        assert_rel_eq(m.boundary_torque(2.0 * m.r_cor()), inside / 8.0, 1e-12);
    }

    #[test]
    fn alfven_radius_shrinks_with_accretion_rate() {
        let grid = physical_grid(20);
        let m = Magnetosphere::new(&ns(0.0), &grid);
        assert_rel_eq(m.r_alfven(1e16) / m.r_alfven(1e18), 100f64.powf(2.0 / 7.0), 1e-12);
    }

    #[test]
    fn scan_stops_before_magnetospheric_radius() {
        let r: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_eq!(scan_inner(&r, 0, 9, 3.5), Ok(2));
        assert_eq!(scan_inner(&r, 0, 9, 4.0), Ok(3));
        assert_eq!(scan_inner(&r, 5, 9, 2.0), Ok(5));
        assert_eq!(
            scan_inner(&r, 0, 9, 8.5),
            Err(StepError::DomainExhausted { first: 0, last: 9 })
        );
    }

    #[test]
    fn pinning_is_reported_once() {
        let grid = physical_grid(20);
        let config = NeutronStarConfig {
            r_dead: 1e9,
            ..ns(0.0)
        };
        let m = Magnetosphere::new(&config, &grid);
        assert!(m.newly_pinned(1e9, 3, 5));
        assert!(!m.newly_pinned(1e9, 5, 5));
        assert!(!m.newly_pinned(5e8, 3, 5));
        assert!(!Magnetosphere::new(&ns(0.0), &grid).newly_pinned(1e9, 3, 5));
    }

    #[test]
    fn magnetospheric_radius_is_clamped() {
        let grid = physical_grid(20);
        let free = Magnetosphere::new(&ns(0.0), &grid);
        assert_rel_eq(free.magnetospheric_radius(1e40), 1e6, 1e-12);
        assert_eq!(free.magnetospheric_radius(1e16), free.r_alfven(1e16));

        let dead = Magnetosphere::new(
            &NeutronStarConfig {
                r_dead: 2e8,
                ..ns(0.0)
            },
            &grid,
        );
        assert_eq!(dead.magnetospheric_radius(1e6), 2e8);
    }

    #[test]
    fn outflow_selectors_parse() {
        assert_eq!(
            PropellerOutflow::from_selector("no-outflow", &[]),
            Ok(PropellerOutflow::NoOutflow)
        );
        assert_eq!(
            PropellerOutflow::from_selector("propeller", &[]),
            Ok(PropellerOutflow::Propeller)
        );
        assert_eq!(
            PropellerOutflow::from_selector("const", &[0.25]),
            Ok(PropellerOutflow::Partial { share: 0.25 })
        );
        assert_eq!(
            PropellerOutflow::from_selector("eject", &[]),
            Err(ConfigError::UnknownOutflow {
                name: "eject".into()
            })
        );
        assert_eq!(
            PropellerOutflow::from_selector("const", &[]),
            Err(ConfigError::OutflowParameters {
                outflow: "const",
                expected: 1,
                got: 0
            })
        );
        assert!(matches!(
            PropellerOutflow::from_selector("const", &[1.5]),
            Err(ConfigError::InvalidParameter { .. })
        ));
        assert_eq!(PropellerOutflow::Partial { share: 0.1 }.to_string(), "const");
    }

    #[test]
    fn outflow_needs_propeller_regime() {
        let r_cor = 1e8;
        for law in [
            PropellerOutflow::NoOutflow,
            PropellerOutflow::Propeller,
            PropellerOutflow::Partial { share: 0.4 },
        ] {
            assert_eq!(law.fraction(0.5 * r_cor, r_cor), 0.0);
        }
        assert_eq!(PropellerOutflow::NoOutflow.fraction(2.0 * r_cor, r_cor), 0.0);
        assert_eq!(PropellerOutflow::Propeller.fraction(2.0 * r_cor, r_cor), 1.0);
        assert_eq!(
            PropellerOutflow::Partial { share: 0.4 }.fraction(2.0 * r_cor, r_cor),
            0.4
        );
    }

    #[test]
    fn weak_inflow_is_propelled_away() {
        let grid = physical_grid(50);
        let m = Magnetosphere::new(
            &NeutronStarConfig {
                outflow: PropellerOutflow::Propeller,
                ..ns(0.0)
            },
            &grid,
        );
        assert!(m.magnetospheric_radius(1e12) > m.r_cor());
        assert_eq!(m.ejected_fraction(1e12), 1.0);
        assert!(m.magnetospheric_radius(1e20) < m.r_cor());
        assert_eq!(m.ejected_fraction(1e20), 0.0);
    }
}
