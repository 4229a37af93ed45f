//! The [`Evolution`] stepper: owns a disk state and advances it.

use std::sync::Arc;
use std::time::Instant;

use accrete_core::{Grid, StepError};
use accrete_solver::{DiffusionStepper, SolverSettings};
use accrete_wind::{build_wind, WindModel};

use crate::boundary::OuterTruncation;
use crate::config::{ConfigError, EvolutionConfig};
use crate::initial::initial_torque;
use crate::magnetosphere::Magnetosphere;
use crate::metrics::StepMetrics;
use crate::physics::DiskPhysics;
use crate::state::EvolutionState;

/// A single accretion-disk run.
///
/// Each [`step_by`](Self::step_by) runs on a staged copy of the current
/// [`EvolutionState`]:
///
/// 1. re-evaluate a dynamic wind law,
/// 2. truncate the inner edge (magnetosphere only),
/// 3. solve one implicit diffusion step,
/// 4. truncate the outer edge.
///
/// The copy replaces the current state only if every stage succeeds, so
/// after an error the previous state is still valid and inspectable.
pub struct Evolution {
    config: EvolutionConfig,
    state: EvolutionState,
    wind: Box<dyn WindModel>,
    stepper: DiffusionStepper,
    outer: OuterTruncation,
    magnetosphere: Option<Arc<Magnetosphere>>,
    last_metrics: StepMetrics,
}

impl Evolution {
    /// Build a run from `config`, including the grid and initial profile.
    pub fn new(config: EvolutionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(
            config.binary.gm(),
            config.r_in(),
            config.r_out(),
            config.calc.nx,
            config.calc.scale,
        )?;
        let physics = DiskPhysics::from_config(&config);
        let f = initial_torque(
            &grid,
            &config.disk.initial,
            config.disk.normalisation,
            &physics.oprel,
        )?;
        Self::assemble(config, grid, f, physics)
    }

    /// Build a run on an explicit grid and torque profile.
    ///
    /// The grid must belong to the configured accretor. The neutron-star
    /// shift is still applied to `f`.
    pub fn with_profile(
        config: EvolutionConfig,
        grid: Grid,
        f: Vec<f64>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        grid.validate()?;
        if (grid.gm() - config.binary.gm()).abs() > 1e-9 * config.binary.gm() {
            return Err(ConfigError::InvalidParameter {
                name: "grid gm",
                value: grid.gm(),
            });
        }
        if f.len() != grid.len() {
            return Err(ConfigError::ProfileLengthMismatch {
                expected: grid.len(),
                got: f.len(),
            });
        }
        let physics = DiskPhysics::from_config(&config);
        Self::assemble(config, grid, f, physics)
    }

    fn assemble(
        config: EvolutionConfig,
        grid: Grid,
        mut f: Vec<f64>,
        physics: DiskPhysics,
    ) -> Result<Self, ConfigError> {
        let magnetosphere = config
            .ns
            .as_ref()
            .map(|ns| Arc::new(Magnetosphere::new(ns, &grid)));
        if let Some(m) = &magnetosphere {
            m.initial_shift(&mut f);
        }

        let wind = build_wind(config.wind.kind, &config.wind.params)?;
        let mut state = EvolutionState::new(grid, f, Arc::new(physics), magnetosphere.clone())?;
        state.update_wind(wind.as_ref());

        let stepper = DiffusionStepper::new(SolverSettings {
            eps: config.calc.eps,
            max_iterations: config.calc.max_iterations,
        });
        let outer = OuterTruncation {
            boundary: config.disk.boundary,
            t_hot: config.disk.t_hot,
            min_shift: config.disk.min_outer_shift,
        };

        log::info!(
            "disk of {} cells from {:e} to {:e} cm, wind '{}'{}",
            state.grid().len(),
            state.r()[0],
            state.r()[state.grid().len() - 1],
            wind.name(),
            if magnetosphere.is_some() {
                ", magnetised accretor"
            } else {
                ""
            },
        );

        Ok(Self {
            config,
            state,
            wind,
            stepper,
            outer,
            magnetosphere,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Current committed state.
    pub fn state(&self) -> &EvolutionState {
        &self.state
    }

    /// Configuration the run was built from.
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// The wind law.
    pub fn wind(&self) -> &dyn WindModel {
        self.wind.as_ref()
    }

    /// Metrics of the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Advance by the configured time step.
    pub fn step(&mut self) -> Result<StepMetrics, StepError> {
        self.step_by(self.config.calc.tau)
    }

    /// Advance by `tau` seconds.
    pub fn step_by(&mut self, tau: f64) -> Result<StepMetrics, StepError> {
        let step_start = Instant::now();

        // 1. Reject a non-positive or non-finite step before touching anything.
        if !(tau.is_finite() && tau > 0.0) {
            return Err(StepError::InvalidTimeStep { tau });
        }

        // 2. Stage a copy; `self.state` is untouched until commit.
        let mut next = self.state.clone();
        let (first0, last0) = (next.first(), next.last());
        next.begin_step(tau);

        // 3. Dynamic wind laws follow the evolving disk.
        let wind_start = Instant::now();
        if self.wind.is_dynamic() {
            next.update_wind(self.wind.as_ref());
        }
        let wind_us = wind_start.elapsed().as_micros() as u64;

        // 4. Inner truncation.
        if let Some(m) = &self.magnetosphere {
            m.truncate_inner(&mut next)?;
        }

        // 5. Diffusion solve.
        let solve_start = Instant::now();
        let extra_c = self.magnetosphere.as_ref().map(|m| m.d2fmagn_dh2());
        let report = next.solve(&self.stepper, extra_c, tau)?;
        let solve_us = solve_start.elapsed().as_micros() as u64;

        // 6. Outer truncation.
        self.outer.apply(&mut next)?;

        debug_assert!(next.grid().validate().is_ok());

        // 7. Commit.
        self.state = next;
        let s = &self.state;
        let metrics = StepMetrics {
            total_us: step_start.elapsed().as_micros() as u64,
            wind_us,
            solve_us,
            solver_iterations: report.iterations,
            solver_residual: report.residual,
            first_shift: s.first() as isize - first0 as isize,
            last_shift: s.last() as isize - last0 as isize,
        };

        if metrics.edges_moved() {
            log::info!(
                "step {}: active range [{first0}, {last0}] -> [{}, {}]",
                s.i_t(),
                s.first(),
                s.last()
            );
        }
        log::debug!(
            "step {}: t = {:e} s, {} iterations, residual {:e}, range [{}, {}]",
            s.i_t(),
            s.t(),
            report.iterations,
            report.residual,
            s.first(),
            s.last()
        );

        self.last_metrics = metrics.clone();
        Ok(metrics)
    }
}

impl std::fmt::Debug for Evolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evolution")
            .field("state", &self.state)
            .field("wind", &self.wind.name())
            .field("outer", &self.outer)
            .finish_non_exhaustive()
    }
}
