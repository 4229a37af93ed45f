//! The mutable disk state and its lazily cached observables.

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use accrete_core::constants::{C, SIGMA_SB};
use accrete_core::spectrum::{planck_lambda, planck_nu1_nu2};
use accrete_core::{DensityLaw, DiskSnapshot, Grid, Passband, SolverError};
use accrete_solver::{DiffusionStepper, SolveReport, StepInput};
use accrete_wind::{WindCoefficients, WindModel};

use crate::config::ConfigError;
use crate::magnetosphere::Magnetosphere;
use crate::physics::DiskPhysics;
use crate::structure::DiskStructure;

/// Part of the grid an observable is integrated over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiskRegion {
    /// The active range `[first, last]`.
    #[default]
    Hot,
    /// The cold disk from `last` out to the grid's outer node.
    Cold,
}

/// Snapshot of an evolving disk.
///
/// Holds the fixed grid, the viscous torque `F` on every node, the active
/// range `[first, last]`, simulated time and step index, the inner
/// boundary torque `F_in`, and the current wind coefficients. Derived
/// quantities are computed on first access and cached until the state
/// next changes; readers never mutate anything else.
///
/// Arrays returned by the readers span the whole grid and are zero
/// outside `[first, last]`.
///
/// Cloning deep-copies the grid and torque field and starts the copy with
/// an empty cache.
pub struct EvolutionState {
    grid: Grid,
    physics: Arc<DiskPhysics>,
    magnetosphere: Option<Arc<Magnetosphere>>,
    f: Vec<f64>,
    first: usize,
    last: usize,
    t: f64,
    i_t: u64,
    f_in: f64,
    mdot_in_prev: f64,
    wind: WindCoefficients,
    structure: DiskStructure,
}

impl EvolutionState {
    /// A state at `t = 0` with the whole grid active and `F_in = f[0]`.
    pub fn new(
        grid: Grid,
        f: Vec<f64>,
        physics: Arc<DiskPhysics>,
        magnetosphere: Option<Arc<Magnetosphere>>,
    ) -> Result<Self, ConfigError> {
        if f.len() != grid.len() {
            return Err(ConfigError::ProfileLengthMismatch {
                expected: grid.len(),
                got: f.len(),
            });
        }
        if let Some(index) = f.iter().position(|x| !x.is_finite()) {
            return Err(ConfigError::InvalidParameter {
                name: "initial torque",
                value: f[index],
            });
        }
        let nx = grid.len();
        Ok(Self {
            f_in: f[0],
            wind: WindCoefficients::zeros(nx),
            grid,
            physics,
            magnetosphere,
            f,
            first: 0,
            last: nx - 1,
            t: 0.0,
            i_t: 0,
            mdot_in_prev: f64::NEG_INFINITY,
            structure: DiskStructure::default(),
        })
    }

    // ── Primary state ───────────────────────────────────────────

    /// The fixed radial grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Specific angular momentum of every node.
    pub fn h(&self) -> &[f64] {
        self.grid.h()
    }

    /// Radius of every node.
    pub fn r(&self) -> &[f64] {
        self.grid.r()
    }

    /// Viscous torque on every node.
    pub fn f(&self) -> &[f64] {
        &self.f
    }

    /// Inner active index.
    pub fn first(&self) -> usize {
        self.first
    }

    /// Outer active index.
    pub fn last(&self) -> usize {
        self.last
    }

    /// Simulated time [s].
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Number of committed steps.
    pub fn i_t(&self) -> u64 {
        self.i_t
    }

    /// Torque held at the inner boundary.
    pub fn f_in(&self) -> f64 {
        self.f_in
    }

    /// Mass inflow through the outer boundary [g/s].
    pub fn mdot_out(&self) -> f64 {
        self.physics.mdot_out
    }

    /// Accretion rate through the inner edge [g/s].
    ///
    /// The torque gradient between the two innermost active nodes, plus
    /// the magnetic torque gradient for a magnetised accretor.
    pub fn mdot_in(&self) -> f64 {
        let (i, h) = (self.first, self.grid.h());
        let viscous = (self.f[i + 1] - self.f[i]) / (h[i + 1] - h[i]);
        match &self.magnetosphere {
            Some(m) => viscous + m.dfmagn_dh()[i],
            None => viscous,
        }
    }

    /// Share of [`mdot_in`](Self::mdot_in) ejected by the propeller;
    /// zero without a magnetosphere.
    pub fn ejected_fraction(&self) -> f64 {
        self.magnetosphere
            .as_ref()
            .map_or(0.0, |m| m.ejected_fraction(self.mdot_in()))
    }

    /// Part of the inner-edge rate that reaches the accretor [g/s].
    pub fn mdot_acc(&self) -> f64 {
        (1.0 - self.ejected_fraction()) * self.mdot_in()
    }

    /// Part of the inner-edge rate ejected by the propeller [g/s].
    pub fn mdot_ejected(&self) -> f64 {
        self.ejected_fraction() * self.mdot_in()
    }

    /// Accretion rate at the start of the most recent step; `-∞` before
    /// the first step.
    pub fn mdot_in_prev(&self) -> f64 {
        self.mdot_in_prev
    }

    /// Wind coefficients used by the most recent step.
    pub fn wind(&self) -> &WindCoefficients {
        &self.wind
    }

    /// Fixed physics of the run.
    pub fn physics(&self) -> &DiskPhysics {
        &self.physics
    }

    /// Magnetosphere of a neutron-star accretor.
    pub fn magnetosphere(&self) -> Option<&Magnetosphere> {
        self.magnetosphere.as_deref()
    }

    // ── Derived quantities (cached) ─────────────────────────────

    /// Disk mass per unit `h`, `W(F, h)`.
    pub fn w(&self) -> &[f64] {
        self.structure.w.get_or_init(|| {
            let oprel = &self.physics.oprel;
            self.per_node(|i| oprel.w(self.f[i], self.grid.h()[i]))
        })
    }

    /// Surface density [g cm⁻²].
    pub fn sigma(&self) -> &[f64] {
        self.structure.sigma.get_or_init(|| {
            let w = self.w();
            self.per_node(|i| self.physics.oprel.sigma(w[i], self.grid.h()[i]))
        })
    }

    /// Semi-thickness [cm].
    pub fn height(&self) -> &[f64] {
        self.structure.height.get_or_init(|| {
            let sigma = self.sigma();
            self.per_node(|i| {
                self.physics
                    .oprel
                    .height(self.grid.h()[i], self.f[i], sigma[i])
            })
        })
    }

    /// Effective temperature of viscous heating alone [K].
    pub fn tph_vis(&self) -> &[f64] {
        self.structure.tph_vis.get_or_init(|| {
            let gm = self.grid.gm();
            self.per_node(|i| viscous_temperature(gm, self.grid.h()[i], self.f[i]))
        })
    }

    /// Colour temperature of the X-ray spectrum [K].
    ///
    /// Scales the viscous temperature, or the relativistic disk
    /// temperature at the accreted rate when one is configured.
    pub fn tph_x(&self) -> &[f64] {
        self.structure.tph_x.get_or_init(|| {
            let fcol = self.physics.colour_factor;
            match &self.physics.relativistic {
                Some(disk) => {
                    let (gm, mdot) = (self.grid.gm(), self.mdot_acc());
                    self.per_node(|i| fcol * disk.temperature(self.grid.r()[i], gm, mdot))
                }
                None => self.tph_vis().iter().map(|t| fcol * t).collect(),
            }
        })
    }

    /// Irradiation factor.
    pub fn cirr(&self) -> &[f64] {
        self.structure.cirr.get_or_init(|| {
            let p = &self.physics;
            if p.irr_index == 0.0 {
                return self.per_node(|_| p.c_irr);
            }
            let height = self.height();
            self.per_node(|i| p.c_irr * (height[i] / self.grid.r()[i] / 0.05).powf(p.irr_index))
        })
    }

    /// Irradiation flux absorbed per unit area [erg cm⁻² s⁻¹].
    ///
    /// Only the accreted part of the inflow irradiates.
    pub fn qx(&self) -> &[f64] {
        self.structure.qx.get_or_init(|| {
            let mdot = self.mdot_acc();
            if mdot < 0.0 && self.physics.c_irr != 0.0 {
                log::debug!("step {}: negative Mdot_in {mdot:e} does not irradiate", self.i_t);
            }
            let cirr = self.cirr();
            self.per_node(|i| {
                self.physics
                    .irradiation_flux(cirr[i], mdot, self.grid.r()[i])
            })
        })
    }

    /// Irradiation temperature [K].
    pub fn tirr(&self) -> &[f64] {
        self.structure.tirr.get_or_init(|| {
            self.qx()
                .iter()
                .map(|q| (q / SIGMA_SB).powf(0.25))
                .collect()
        })
    }

    /// Effective temperature including irradiation [K].
    pub fn tph(&self) -> &[f64] {
        self.structure.tph.get_or_init(|| {
            self.tph_vis()
                .iter()
                .zip(self.qx())
                .map(|(t, q)| (t.powi(4) + q / SIGMA_SB).powf(0.25))
                .collect()
        })
    }

    /// Effective temperature of the cold disk [K], zero outside
    /// `[last, nx - 1]`.
    ///
    /// Viscous heating of the frozen torque plus irradiation with the
    /// cold-disk factor.
    pub fn tph_cold(&self) -> &[f64] {
        self.structure.tph_cold.get_or_init(|| {
            let p = &self.physics;
            let (gm, h, r) = (self.grid.gm(), self.grid.h(), self.grid.r());
            let mdot = self.mdot_acc();
            let mut out = vec![0.0; self.grid.len()];
            for i in self.last..self.grid.len() {
                let f = self.f[i].max(0.0);
                let cirr = if p.c_irr_cold == 0.0 || p.irr_index_cold == 0.0 {
                    p.c_irr_cold
                } else {
                    let sigma = p.oprel.sigma(p.oprel.w(f, h[i]), h[i]);
                    let z0 = p.oprel.height(h[i], f, sigma);
                    p.c_irr_cold * (z0 / r[i] / 0.05).powf(p.irr_index_cold)
                };
                let q = p.irradiation_flux(cirr, mdot, r[i]);
                out[i] = (viscous_temperature(gm, h[i], f).powi(4) + q / SIGMA_SB).powf(0.25);
            }
            out
        })
    }

    /// Mass of the active disk [g].
    pub fn mdisk(&self) -> f64 {
        *self
            .structure
            .mdisk
            .get_or_init(|| self.integrate(self.sigma()))
    }

    /// X-ray luminosity in the configured band [erg/s].
    pub fn lx(&self) -> f64 {
        *self.structure.lx.get_or_init(|| {
            let p = &self.physics;
            self.luminosity(self.tph_x(), p.nu_min, p.nu_max) / p.colour_factor.powi(4)
        })
    }

    /// Bolometric luminosity of viscous heating [erg/s].
    pub fn lbol(&self) -> f64 {
        *self.structure.lbol.get_or_init(|| {
            let flux: Vec<f64> = self
                .tph_vis()
                .iter()
                .map(|t| 2.0 * SIGMA_SB * t.powi(4))
                .collect();
            self.integrate(&flux)
        })
    }

    /// Mass-loss rate through the wind [g/s].
    ///
    /// `-∫ (A·∂F/∂h + B·F + C) dh` over the active range.
    pub fn mdot_wind(&self) -> f64 {
        *self.structure.mdot_wind.get_or_init(|| {
            let (h, f, w) = (self.grid.h(), &self.f, &self.wind);
            let (first, last) = (self.first, self.last);
            let rate = |i: usize| {
                let lo = if i == first { i } else { i - 1 };
                let hi = if i == last { i } else { i + 1 };
                let df_dh = (f[hi] - f[lo]) / (h[hi] - h[lo]);
                w.a[i] * df_dh + w.b[i] * f[i] + w.c[i]
            };
            -(first..last)
                .map(|i| 0.5 * (rate(i) + rate(i + 1)) * (h[i + 1] - h[i]))
                .sum::<f64>()
        })
    }

    /// Apparent magnitude in `band`.
    pub fn magnitude(&self, band: Passband) -> f64 {
        *self.structure.magnitude(band).get_or_init(|| {
            let p = &self.physics;
            let flux = self.i_lambda(band.lambda()) * p.cos_i / (p.distance * p.distance);
            -2.5 * (flux / band.zero_point()).log10()
        })
    }

    // ── Derived quantities (uncached) ───────────────────────────

    /// Disk-integrated spectral radiance per unit wavelength,
    /// `∫ B_λ(Tph) dA`, over the active range.
    pub fn i_lambda(&self, lambda: f64) -> f64 {
        self.i_lambda_region(DiskRegion::Hot, lambda)
    }

    /// [`i_lambda`](Self::i_lambda) over `region`.
    pub fn i_lambda_region(&self, region: DiskRegion, lambda: f64) -> f64 {
        let (lo, hi, tph) = match region {
            DiskRegion::Hot => (self.first, self.last, self.tph()),
            DiskRegion::Cold => (self.last, self.grid.len() - 1, self.tph_cold()),
        };
        let mut b = vec![0.0; self.grid.len()];
        for i in lo..=hi {
            b[i] = planck_lambda(tph[i], lambda);
        }
        self.grid.integrate_disk(&b, lo, hi)
    }

    /// Observed spectral flux density per unit frequency at wavelength
    /// `lambda` [erg s⁻¹ cm⁻² Hz⁻¹].
    pub fn flux(&self, lambda: f64) -> f64 {
        self.flux_region(DiskRegion::Hot, lambda)
    }

    /// [`flux`](Self::flux) of `region`.
    pub fn flux_region(&self, region: DiskRegion, lambda: f64) -> f64 {
        let p = &self.physics;
        self.i_lambda_region(region, lambda) * lambda * lambda / C * p.cos_i
            / (p.distance * p.distance)
    }

    /// Luminosity of both faces between `nu1` and `nu2` for a temperature
    /// profile `t` indexed like the grid [erg/s].
    pub fn luminosity(&self, t: &[f64], nu1: f64, nu2: f64) -> f64 {
        let b: Vec<f64> = self
            .active()
            .map(|i| 2.0 * PI * planck_nu1_nu2(t[i], nu1, nu2))
            .collect();
        self.integrate_active(&b)
    }

    // ── Mutation (crate-internal) ───────────────────────────────

    /// Record the pre-step accretion rate and advance the clock.
    pub(crate) fn begin_step(&mut self, tau: f64) {
        self.mdot_in_prev = self.mdot_in();
        self.t += tau;
        self.i_t += 1;
    }

    /// Replace the wind coefficients.
    pub(crate) fn set_wind(&mut self, wind: WindCoefficients) {
        self.wind = wind;
        self.invalidate();
    }

    /// Re-evaluate the wind law on this state.
    pub(crate) fn update_wind(&mut self, model: &dyn WindModel) {
        let mut out = std::mem::replace(&mut self.wind, WindCoefficients::zeros(0));
        model.update(&*self, &mut out);
        self.set_wind(out);
    }

    /// Move the inner edge and set the inner boundary torque.
    pub(crate) fn set_inner_edge(&mut self, first: usize, f_in: f64) {
        self.first = first;
        self.f_in = f_in;
        self.invalidate();
    }

    /// Move the outer edge.
    pub(crate) fn set_last(&mut self, last: usize) {
        self.last = last;
        self.invalidate();
    }

    /// Advance `F` by one diffusion step of length `tau`, adding
    /// `extra_c` to the wind source term.
    pub(crate) fn solve(
        &mut self,
        stepper: &DiffusionStepper,
        extra_c: Option<&[f64]>,
        tau: f64,
    ) -> Result<SolveReport, SolverError> {
        let input = StepInput {
            tau,
            first: self.first,
            last: self.last,
            f_in: self.f_in,
            mdot_out: self.physics.mdot_out,
        };
        let combined;
        let coefficients = match extra_c {
            Some(extra) => {
                let mut c = self.wind.clone();
                for (c, x) in c.c.iter_mut().zip(extra) {
                    *c += x;
                }
                combined = c;
                &combined
            }
            None => &self.wind,
        };
        let report = stepper.advance(
            &self.physics.oprel,
            self.grid.h(),
            coefficients,
            input,
            &mut self.f,
        )?;
        self.invalidate();
        Ok(report)
    }

    fn invalidate(&mut self) {
        self.structure = DiskStructure::default();
    }

    // ── Helpers ─────────────────────────────────────────────────

    fn active(&self) -> std::ops::RangeInclusive<usize> {
        self.first..=self.last
    }

    /// Grid-length array from a per-node formula on the active range.
    fn per_node(&self, value: impl Fn(usize) -> f64) -> Vec<f64> {
        let mut out = vec![0.0; self.grid.len()];
        for i in self.active() {
            out[i] = value(i);
        }
        out
    }

    /// `∫ y dA` over the active range for a grid-length `y`.
    fn integrate(&self, y: &[f64]) -> f64 {
        self.grid.integrate_disk(y, self.first, self.last)
    }

    /// `∫ y dA` for `y` holding only the active nodes.
    fn integrate_active(&self, y: &[f64]) -> f64 {
        let mut full = vec![0.0; self.grid.len()];
        full[self.first..=self.last].copy_from_slice(y);
        self.integrate(&full)
    }

    #[cfg(test)]
    pub(crate) fn cached_entries(&self) -> usize {
        self.structure.populated()
    }
}

/// Effective temperature of viscous heating alone for torque `f` at `h`.
fn viscous_temperature(gm: f64, h: f64, f: f64) -> f64 {
    gm * h.powf(-1.75) * (3.0 * f.max(0.0) / (8.0 * PI * SIGMA_SB)).powf(0.25)
}

impl Clone for EvolutionState {
    fn clone(&self) -> Self {
        Self {
            grid: self.grid.clone(),
            physics: Arc::clone(&self.physics),
            magnetosphere: self.magnetosphere.clone(),
            f: self.f.clone(),
            first: self.first,
            last: self.last,
            t: self.t,
            i_t: self.i_t,
            f_in: self.f_in,
            mdot_in_prev: self.mdot_in_prev,
            wind: self.wind.clone(),
            structure: DiskStructure::default(),
        }
    }
}

impl fmt::Debug for EvolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvolutionState")
            .field("nx", &self.grid.len())
            .field("t", &self.t)
            .field("i_t", &self.i_t)
            .field("first", &self.first)
            .field("last", &self.last)
            .field("f_in", &self.f_in)
            .field("mdot_in_prev", &self.mdot_in_prev)
            .field("magnetosphere", &self.magnetosphere.is_some())
            .finish()
    }
}

impl DiskSnapshot for EvolutionState {
    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn f(&self) -> &[f64] {
        &self.f
    }

    fn first(&self) -> usize {
        self.first
    }

    fn last(&self) -> usize {
        self.last
    }

    fn mdot_in(&self) -> f64 {
        EvolutionState::mdot_in(self)
    }

    fn t(&self) -> f64 {
        self.t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EvolutionConfig, IrradiationConfig, NeutronStarConfig};
    use crate::magnetosphere::PropellerOutflow;
    use accrete_core::RelativisticDisk;
    use accrete_test_utils::assert_rel_eq;
    use accrete_test_utils::fixtures::physical_grid;

    fn state_with(config: &EvolutionConfig, nx: usize) -> EvolutionState {
        let grid = physical_grid(nx);
        let h_out = grid.h()[nx - 1];
        let f: Vec<f64> = grid.h().iter().map(|h| 1e37 * h / h_out).collect();
        EvolutionState::new(grid, f, Arc::new(DiskPhysics::from_config(config)), None).unwrap()
    }

    fn state(nx: usize) -> EvolutionState {
        state_with(&EvolutionConfig::default(), nx)
    }

    #[test]
    fn readers_are_idempotent() {
        let s = state(100);
        assert_eq!(s.cached_entries(), 0);
        let sigma = s.sigma().to_vec();
        let tph = s.tph().to_vec();
        let m = s.mdisk();
        let v = s.magnitude(Passband::V);
        assert!(s.cached_entries() > 0);
        assert_eq!(s.sigma(), sigma.as_slice());
        assert_eq!(s.tph(), tph.as_slice());
        assert_eq!(s.mdisk().to_bits(), m.to_bits());
        assert_eq!(s.magnitude(Passband::V).to_bits(), v.to_bits());
    }

    #[test]
    fn cache_fills_lazily() {
        let s = state(50);
        let _ = s.sigma();
        // sigma depends on w, nothing else.
        assert_eq!(s.cached_entries(), 2);
    }

    #[test]
    fn clone_starts_with_empty_cache_and_owns_its_torque() {
        let mut s = state(50);
        let _ = s.tph();
        let copy = s.clone();
        assert_eq!(copy.cached_entries(), 0);
        s.set_last(40);
        assert_eq!(copy.last(), 49);
        assert_eq!(copy.f(), s.f());
        assert_ne!(copy.f().as_ptr(), s.f().as_ptr());
        assert_ne!(copy.grid().h().as_ptr(), s.grid().h().as_ptr());
    }

    #[test]
    fn mutation_invalidates() {
        let mut s = state(50);
        let before = s.mdisk();
        s.set_last(30);
        assert_eq!(s.cached_entries(), 0);
        assert!(s.mdisk() < before);
    }

    #[test]
    fn arrays_vanish_outside_active_range() {
        let mut s = state(50);
        s.set_inner_edge(5, 0.0);
        s.set_last(40);
        let sigma = s.sigma();
        assert!(sigma[..5].iter().all(|&x| x == 0.0));
        assert!(sigma[41..].iter().all(|&x| x == 0.0));
        assert!(sigma[5..=40].iter().all(|&x| x > 0.0));
    }

    #[test]
    fn linear_torque_gives_constant_accretion_rate() {
        let s = state(100);
        let h = s.h();
        assert_rel_eq(s.mdot_in(), 1e37 / h[h.len() - 1], 1e-9);
    }

    #[test]
    fn disk_mass_is_integral_of_w_over_h() {
        let s = state(400);
        let h = s.h();
        let w = s.w();
        let by_h: f64 = (0..h.len() - 1)
            .map(|i| 0.5 * (w[i] + w[i + 1]) * (h[i + 1] - h[i]))
            .sum();
        assert_rel_eq(s.mdisk(), by_h, 1e-2);
    }

    #[test]
    fn irradiation_heats_disk() {
        let mut config = EvolutionConfig::default();
        config.irradiation = IrradiationConfig {
            c_irr: 1e-3,
            ..Default::default()
        };
        let s = state_with(&config, 100);
        let (tph, tvis, tirr) = (s.tph(), s.tph_vis(), s.tirr());
        for i in 1..100 {
            assert!(tph[i] >= tvis[i]);
            assert!(tph[i] >= tirr[i]);
        }
        assert!(tirr[50] > 0.0);
    }

    #[test]
    fn bolometric_exceeds_band_luminosity() {
        let s = state(200);
        assert!(s.lbol() > 0.0);
        assert!(s.lx() > 0.0);
        assert!(s.lx() < s.lbol());
    }

    #[test]
    fn brighter_disk_has_smaller_magnitude() {
        let dim = state(100);
        let mut bright = state(100);
        for f in bright.f.iter_mut() {
            *f *= 10.0;
        }
        assert!(bright.magnitude(Passband::V) < dim.magnitude(Passband::V));
    }

    #[test]
    fn flux_relates_to_i_lambda() {
        let s = state(100);
        let lambda = Passband::B.lambda();
        let p = s.physics();
        let expected = s.i_lambda(lambda) * lambda * lambda / C / (p.distance * p.distance);
        assert_rel_eq(s.flux(lambda), expected, 1e-12);
    }

    #[test]
    fn no_wind_loses_no_mass() {
        assert_eq!(state(30).mdot_wind(), 0.0);
    }

    #[test]
    fn profile_length_must_match() {
        let grid = physical_grid(10);
        let physics = Arc::new(DiskPhysics::from_config(&EvolutionConfig::default()));
        assert_eq!(
            EvolutionState::new(grid, vec![0.0; 9], physics, None).err(),
            Some(ConfigError::ProfileLengthMismatch {
                expected: 10,
                got: 9
            })
        );
    }

    fn magnetised(config: &EvolutionConfig, outflow: PropellerOutflow) -> EvolutionState {
        let grid = physical_grid(100);
        let h_out = grid.h()[99];
        let f: Vec<f64> = grid.h().iter().map(|h| 1e37 * h / h_out).collect();
        let ns = NeutronStarConfig {
            freq: 100.0,
            bx: 1e12,
            outflow,
            ..NeutronStarConfig::default()
        };
        let m = Arc::new(Magnetosphere::new(&ns, &grid));
        let physics = Arc::new(DiskPhysics::from_config(config));
        EvolutionState::new(grid, f, physics, Some(m)).unwrap()
    }

    #[test]
    fn inflow_is_accreted_without_magnetosphere() {
        let s = state(50);
        assert_eq!(s.ejected_fraction(), 0.0);
        assert_eq!(s.mdot_acc(), s.mdot_in());
        assert_eq!(s.mdot_ejected(), 0.0);
    }

    #[test]
    fn propeller_ejects_inflow_and_stops_irradiation() {
        let mut config = EvolutionConfig::default();
        config.irradiation.c_irr = 1e-3;
        let s = magnetised(&config, PropellerOutflow::Propeller);
        let m = s.magnetosphere().unwrap();
        assert!(m.magnetospheric_radius(s.mdot_in()) > m.r_cor());
        assert!(s.mdot_in() > 0.0);
        assert_eq!(s.ejected_fraction(), 1.0);
        assert_eq!(s.mdot_acc(), 0.0);
        assert_eq!(s.mdot_ejected(), s.mdot_in());
        assert!(s.qx().iter().all(|&q| q == 0.0));

        let accreting = magnetised(&config, PropellerOutflow::NoOutflow);
        assert!(accreting.qx()[50] > 0.0);
    }

    #[test]
    fn partial_outflow_splits_inflow() {
        let s = magnetised(
            &EvolutionConfig::default(),
            PropellerOutflow::Partial { share: 0.25 },
        );
        assert_eq!(s.ejected_fraction(), 0.25);
        assert_rel_eq(s.mdot_acc(), 0.75 * s.mdot_in(), 1e-15);
        assert_rel_eq(s.mdot_acc() + s.mdot_ejected(), s.mdot_in(), 1e-15);
    }

    #[test]
    fn cold_disk_lies_beyond_outer_edge() {
        let mut s = state(50);
        assert_eq!(s.flux_region(DiskRegion::Cold, Passband::V.lambda()), 0.0);
        s.set_last(30);
        let cold = s.tph_cold();
        assert!(cold[..30].iter().all(|&t| t == 0.0));
        assert!(cold[30..].iter().all(|&t| t > 0.0));
        assert!(s.flux_region(DiskRegion::Cold, Passband::V.lambda()) > 0.0);
        assert!(s.sigma()[31..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn hot_region_is_the_default_flux() {
        let s = state(60);
        let lambda = Passband::R.lambda();
        assert_eq!(
            s.flux_region(DiskRegion::Hot, lambda).to_bits(),
            s.flux(lambda).to_bits()
        );
    }

    #[test]
    fn cold_irradiation_heats_only_cold_disk() {
        let mut config = EvolutionConfig::default();
        config.irradiation.c_irr_cold = 1e-2;
        let mut lit = state_with(&config, 50);
        let mut dark = state(50);
        lit.set_last(30);
        dark.set_last(30);
        assert!(lit.tph_cold()[40] > dark.tph_cold()[40]);
        assert_eq!(lit.tph()[20], dark.tph()[20]);

        config.irradiation.irr_index_cold = 1.0;
        let mut indexed = state_with(&config, 50);
        indexed.set_last(30);
        assert!(indexed.tph_cold()[40] > dark.tph_cold()[40]);
    }

    #[test]
    fn relativistic_colour_temperature() {
        let mut config = EvolutionConfig::default();
        config.flux.relativistic = true;
        let s = state_with(&config, 100);
        let disk = RelativisticDisk::new(0.0);
        let gm = s.grid().gm();
        let tph_x = s.tph_x();
        assert_eq!(tph_x[0], 0.0);
        for i in [20, 60, 99] {
            let expected = 1.7 * disk.temperature(s.r()[i], gm, s.mdot_acc());
            assert_rel_eq(tph_x[i], expected, 1e-12);
        }
        assert!(s.lx() > 0.0);
    }
}
