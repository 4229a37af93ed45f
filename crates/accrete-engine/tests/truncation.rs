//! Integration test: outer-edge truncation of a fading disk.
//!
//! A disk with a hot-state threshold loses its cold outer rim once the
//! accretion rate starts to decline. The edge only moves inward and never
//! by a single cell, and a disk that is entirely colder than the
//! threshold fails with a domain error that leaves the last good state
//! in place.

use accrete_core::StepError;
use accrete_engine::{BoundaryCondition, Evolution, EvolutionConfig};

fn fading(t_hot: f64) -> EvolutionConfig {
    let mut config = EvolutionConfig::default();
    config.calc.nx = 100;
    config.disk.t_hot = t_hot;
    config
}

#[test]
fn cold_rim_is_truncated_in_jumps() {
    let mut ev = Evolution::new(fading(1e4)).unwrap();
    let mut last = ev.state().last();
    let mut moves = 0;

    for _ in 0..60 {
        let m = ev.step().unwrap();
        assert_eq!(m.first_shift, 0);
        assert_ne!(m.last_shift, -1);
        assert!(m.last_shift <= 0);
        if m.last_shift != 0 {
            assert!(m.last_shift <= -2);
            moves += 1;
        }
        assert_eq!(ev.state().last() as isize, last as isize + m.last_shift);
        last = ev.state().last();
    }
    assert!(moves > 0);
    assert!(last < 99);
}

#[test]
fn disabled_threshold_keeps_full_disk() {
    let mut ev = Evolution::new(fading(0.0)).unwrap();
    for _ in 0..30 {
        ev.step().unwrap();
    }
    assert_eq!(ev.state().last(), 99);
}

#[test]
fn irradiation_criterion_without_irradiation_cuts_whole_disk() {
    let mut config = fading(1.0);
    config.disk.boundary = "Tirr".parse::<BoundaryCondition>().unwrap();
    let mut ev = Evolution::new(config).unwrap();
    let err = (0..60).find_map(|_| ev.step().err());
    assert!(matches!(err, Some(StepError::DomainExhausted { .. })));
}

#[test]
fn exhausted_domain_keeps_last_good_state() {
    let mut ev = Evolution::new(fading(1e7)).unwrap();
    let mut committed = 0;
    let err = loop {
        let before = ev.state().f().to_vec();
        match ev.step() {
            Ok(_) => committed += 1,
            Err(e) => {
                assert_eq!(ev.state().f(), before.as_slice());
                break e;
            }
        }
        assert!(committed < 100, "disk never exhausted");
    };
    assert_eq!(
        err,
        StepError::DomainExhausted {
            first: 0,
            last: 99
        }
    );
    assert_eq!(ev.state().i_t(), committed);
    assert_eq!(ev.state().last(), 99);
}
