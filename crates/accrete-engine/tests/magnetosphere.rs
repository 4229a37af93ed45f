//! Integration test: neutron-star accretor with a magnetosphere.

use accrete_core::{Grid, GridScale};
use accrete_engine::magnetosphere::{K_T, XI};
use accrete_engine::{Evolution, EvolutionConfig, NeutronStarConfig};
use accrete_test_utils::assert_rel_eq;

fn ns_config(r_dead: f64, inverse_beta: f64) -> EvolutionConfig {
    let mut config = EvolutionConfig::default();
    config.calc.nx = 20;
    config.ns = Some(NeutronStarConfig {
        freq: 100.0,
        bx: 1e8,
        r_dead,
        inverse_beta,
        ..NeutronStarConfig::default()
    });
    config
}

fn grid(config: &EvolutionConfig) -> Grid {
    Grid::new(config.binary.gm(), 1e7, 1e10, 20, GridScale::Log).unwrap()
}

#[test]
fn shift_adds_corotation_torque() {
    let config = ns_config(0.0, 0.0);
    let grid = grid(&config);
    let ev = Evolution::with_profile(config, grid, vec![0.0; 20]).unwrap();
    let m = ev.state().magnetosphere().unwrap();
    let expected = K_T * m.mu_magn().powi(2) / m.r_cor().powi(3);
    for &f in ev.state().f() {
        assert_rel_eq(f, expected, 1e-12);
    }
    assert_eq!(ev.state().f_in(), ev.state().f()[0]);
}

#[test]
fn inner_edge_jumps_to_dead_radius() {
    let reference = ns_config(0.0, 0.0);
    let r = grid(&reference).r().to_vec();
    let r_dead = (r[3] * r[4]).sqrt();

    let config = ns_config(r_dead, 0.0);
    let grid = grid(&config);
    let mut ev = Evolution::with_profile(config, grid, vec![1e35; 20]).unwrap();
    assert!(ev.state().magnetosphere().unwrap().r_cor() < r[3]);

    let metrics = ev.step().unwrap();
    let state = ev.state();
    assert_eq!(state.first(), 3);
    assert_eq!(metrics.first_shift, 3);

    let m = state.magnetosphere().unwrap();
    let expected = K_T * XI.powf(-3.5) * m.mu_magn().powi(2) / r[3].powi(3);
    assert_rel_eq(state.f_in(), expected, 1e-12);
    assert_rel_eq(state.f()[3], expected, 1e-9);
}

#[test]
fn inner_edge_never_recedes() {
    let reference = ns_config(0.0, 0.0);
    let r = grid(&reference).r().to_vec();
    let config = ns_config((r[3] * r[4]).sqrt(), 0.0);
    let grid = grid(&config);
    let mut ev = Evolution::with_profile(config, grid, vec![1e35; 20]).unwrap();
    let mut first = 0;
    for _ in 0..5 {
        ev.step().unwrap();
        assert!(ev.state().first() >= first);
        first = ev.state().first();
    }
}

#[test]
fn threaded_field_without_dead_radius_holds_inner_torque() {
    let config = ns_config(0.0, 1.0);
    let grid = grid(&config);
    let mut ev = Evolution::with_profile(config, grid, vec![1e35; 20]).unwrap();
    let m = ev.state().magnetosphere().unwrap();
    assert!(m.fmagn().iter().any(|&x| x != 0.0));
    let f0 = ev.state().f()[0];
    assert_eq!(f0, 1e35);
    ev.step().unwrap();
    assert_eq!(ev.state().first(), 0);
    assert_eq!(ev.state().f()[0], f0);
}

#[test]
fn threaded_accretion_rate_includes_magnetic_gradient() {
    let config = ns_config(0.0, 1.0);
    let grid = grid(&config);
    let mut ev = Evolution::with_profile(config, grid, vec![1e35; 20]).unwrap();
    for _ in 0..2 {
        let s = ev.state();
        let (f, h, i) = (s.f(), s.h(), s.first());
        let viscous = (f[i + 1] - f[i]) / (h[i + 1] - h[i]);
        let magnetic = s.magnetosphere().unwrap().dfmagn_dh()[i];
        assert!(magnetic != 0.0);
        assert_rel_eq(s.mdot_in(), viscous + magnetic, 1e-12);
        ev.step().unwrap();
    }
}

#[test]
fn threaded_field_frees_inner_boundary_on_truncation() {
    let reference = ns_config(0.0, 1.0);
    let r = grid(&reference).r().to_vec();
    let config = ns_config((r[3] * r[4]).sqrt(), 1.0);
    let grid = grid(&config);
    let mut ev = Evolution::with_profile(config, grid, vec![1e35; 20]).unwrap();
    assert_eq!(ev.state().f_in(), 1e35);

    ev.step().unwrap();
    let state = ev.state();
    assert_eq!(state.f_in(), 0.0);
    assert_eq!(state.f()[state.first()], 0.0);
}
