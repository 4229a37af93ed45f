//! Benchmark profiles for the accrete disk evolution engine.
//!
//! Provides pre-built [`EvolutionConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: black-hole transient on 1000 cells
//! - [`stress_profile`]: the same disk on 10K cells
//! - [`windy_profile`]: reference disk with a dynamic wind and irradiation
//! - [`neutron_star_profile`]: magnetised accretor with a dead-disk radius

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use accrete_core::constants::{DAY, M_SUN};
use accrete_engine::{EvolutionConfig, NeutronStarConfig, WindConfig};
use accrete_wind::WindKind;

/// Black-hole transient: 5 M☉ accretor, 1000 cells, quarter-day steps,
/// outer truncation below 10⁴ K.
pub fn reference_profile() -> EvolutionConfig {
    let mut config = EvolutionConfig::default();
    config.calc.nx = 1000;
    config.disk.t_hot = 1e4;
    config
}

/// Same disk as [`reference_profile`] at 10x the cell count.
pub fn stress_profile() -> EvolutionConfig {
    let mut config = reference_profile();
    config.calc.nx = 10_000;
    config
}

/// [`reference_profile`] with self-irradiation and the Shields (1986)
/// wind, which is re-evaluated every step.
pub fn windy_profile() -> EvolutionConfig {
    let mut config = reference_profile();
    config.irradiation.c_irr = 5e-4;
    config.wind = WindConfig::new(WindKind::TestCQ0Shields1986, &[1.0, 0.5]);
    config
}

/// 1.4 M☉ neutron star spinning at 300 Hz with a 10⁸ G field and a dead
/// disk beyond twice corotation.
pub fn neutron_star_profile() -> EvolutionConfig {
    let mut config = reference_profile();
    config.binary.mx = 1.4 * M_SUN;
    config.binary.period = 0.5 * DAY;
    let ns = NeutronStarConfig {
        freq: 300.0,
        bx: 1e8,
        ..NeutronStarConfig::default()
    };
    let r_dead = 2.0 * ns.r_cor(config.binary.gm());
    config.ns = Some(NeutronStarConfig { r_dead, ..ns });
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        for config in [
            reference_profile(),
            stress_profile(),
            windy_profile(),
            neutron_star_profile(),
        ] {
            config.validate().unwrap();
        }
    }
}
