//! Integration test: end-to-end evolution of a black-hole disk.
//!
//! Covers the degenerate fixed-point step, monotonic mass loss without a
//! wind, wind-driven loss, reader caching across steps, and the grid
//! invariant over a run.

use accrete_core::constants::DAY;
use accrete_core::{Grid, Passband, SolverError, StepError};
use accrete_engine::{Evolution, EvolutionConfig};
use accrete_test_utils::assert_rel_eq;
use accrete_wind::WindKind;
use proptest::prelude::*;
use smallvec::smallvec;

fn config(nx: usize) -> EvolutionConfig {
    let mut config = EvolutionConfig::default();
    config.calc.nx = nx;
    config
}

// ── Degenerate step ─────────────────────────────────────────────────

#[test]
fn constant_torque_survives_vanishing_step() {
    let config = config(10);
    let gm = config.binary.gm();
    let grid = Grid::uniform(gm, (gm * 1e8).sqrt(), (gm * 1e10).sqrt(), 10).unwrap();
    let f0 = 1e36;
    let mut ev = Evolution::with_profile(config, grid, vec![f0; 10]).unwrap();

    ev.step_by(1e-3).unwrap();

    for &f in ev.state().f() {
        assert_rel_eq(f, f0, 1e-10);
    }
    assert_eq!(ev.state().first(), 0);
    assert_eq!(ev.state().last(), 9);
    assert!(ev.state().mdot_in().abs() < 1e-10 * f0);
}

// ── Conservation ────────────────────────────────────────────────────

#[test]
fn disk_without_wind_only_loses_mass() {
    let mut ev = Evolution::new(config(100)).unwrap();
    let mut mass = ev.state().mdisk();
    for _ in 0..40 {
        ev.step().unwrap();
        let next = ev.state().mdisk();
        assert!(next <= mass, "disk mass grew from {mass:e} to {next:e}");
        mass = next;
        assert_eq!(ev.state().mdot_wind(), 0.0);
    }
}

#[test]
fn wind_removes_extra_mass() {
    let mut windy = config(100);
    windy.wind.kind = WindKind::Ss73c;
    windy.wind.params = smallvec![0.1];
    let mut calm = Evolution::new(config(100)).unwrap();
    let mut windy = Evolution::new(windy).unwrap();

    for _ in 0..20 {
        calm.step().unwrap();
        windy.step().unwrap();
    }
    assert!(windy.state().mdot_wind() > 0.0);
    assert!(windy.state().mdisk() < calm.state().mdisk());
}

#[test]
fn dynamic_wind_follows_accretion() {
    let mut c = config(100);
    c.wind.kind = WindKind::TestCQ0Shields1986;
    c.wind.params = smallvec![1.0, 0.5];
    let mut ev = Evolution::new(c).unwrap();
    assert!(ev.wind().is_dynamic());

    for _ in 0..10 {
        ev.step().unwrap();
    }
    let state = ev.state();
    assert!(state.mdot_in() > 0.0);
    let outer = state.last();
    assert!(state.wind().c[outer] < 0.0);
    assert_eq!(state.wind().c[0], 0.0);
}

// ── Cache behaviour ─────────────────────────────────────────────────

#[test]
fn readers_are_bit_identical_between_steps() {
    let mut ev = Evolution::new(config(100)).unwrap();
    for _ in 0..5 {
        ev.step().unwrap();
    }
    let s = ev.state();
    let tph = s.tph().to_vec();
    assert_eq!(s.tph(), tph.as_slice());
    assert_eq!(s.mdisk().to_bits(), s.mdisk().to_bits());
    assert_eq!(s.lx().to_bits(), s.lx().to_bits());
    assert_eq!(
        s.magnitude(Passband::V).to_bits(),
        s.magnitude(Passband::V).to_bits()
    );
    assert_eq!(
        s.flux(Passband::R.lambda()).to_bits(),
        s.flux(Passband::R.lambda()).to_bits()
    );
}

#[test]
fn step_invalidates_cached_observables() {
    let mut ev = Evolution::new(config(100)).unwrap();
    ev.step().unwrap();
    let sigma = ev.state().sigma().to_vec();
    let lbol = ev.state().lbol();

    ev.step().unwrap();
    assert_ne!(ev.state().sigma(), sigma.as_slice());
    assert_ne!(ev.state().lbol(), lbol);
}

// ── Atomicity ───────────────────────────────────────────────────────

#[test]
fn failed_solve_rolls_back() {
    let mut c = config(60);
    c.calc.max_iterations = 1;
    c.calc.eps = 1e-300;
    let mut ev = Evolution::new(c).unwrap();
    let before = ev.state().f().to_vec();

    let err = ev.step().unwrap_err();
    assert!(matches!(
        err,
        StepError::Solver(SolverError::NotConverged { iterations: 1, .. })
    ));
    assert_eq!(ev.state().f(), before.as_slice());
    assert_eq!(ev.state().i_t(), 0);
    assert_eq!(ev.state().t(), 0.0);
    assert_eq!(ev.state().mdot_in_prev(), f64::NEG_INFINITY);
}

#[test]
fn step_uses_configured_time_step() {
    let mut c = config(50);
    c.calc.tau = 0.1 * DAY;
    let mut ev = Evolution::new(c).unwrap();
    ev.step().unwrap();
    ev.step_by(0.2 * DAY).unwrap();
    assert_rel_eq(ev.state().t(), 0.3 * DAY, 1e-12);
    assert_eq!(ev.state().i_t(), 2);
}

// ── Grid invariant ──────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn grid_invariant_holds_over_run(nx in 20usize..120, steps in 1usize..4) {
        let mut ev = Evolution::new(config(nx)).unwrap();
        for _ in 0..steps {
            ev.step().unwrap();
        }
        let grid = ev.state().grid();
        prop_assert!(grid.validate().is_ok());
        prop_assert_eq!(grid.len(), nx);
        let gm = grid.gm();
        for (i, (&h, &r)) in grid.h().iter().zip(grid.r()).enumerate() {
            prop_assert_eq!(r, h * h / gm);
            if i > 0 {
                prop_assert!(h > grid.h()[i - 1]);
            }
        }
    }
}
