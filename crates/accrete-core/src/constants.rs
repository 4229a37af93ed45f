//! Physical constants in CGS units.

/// Gravitational constant [cm³ g⁻¹ s⁻²].
pub const G: f64 = 6.674_30e-8;
/// Speed of light [cm s⁻¹].
pub const C: f64 = 2.997_924_58e10;
/// Stefan–Boltzmann constant [erg cm⁻² s⁻¹ K⁻⁴].
pub const SIGMA_SB: f64 = 5.670_374_419e-5;
/// Boltzmann constant [erg K⁻¹].
pub const K_B: f64 = 1.380_649e-16;
/// Planck constant [erg s].
pub const PLANCK: f64 = 6.626_070_15e-27;
/// Atomic mass unit [g].
pub const M_U: f64 = 1.660_539_066_60e-24;
/// Solar mass [g].
pub const M_SUN: f64 = 1.988_47e33;
/// Kiloparsec [cm].
pub const KPC: f64 = 3.085_677_581_491_367e21;
/// Day [s].
pub const DAY: f64 = 86_400.0;
/// Kiloelectronvolt [erg].
pub const KEV: f64 = 1.602_176_634e-9;
/// Ångström [cm].
pub const ANGSTROM: f64 = 1e-8;
/// Universal gas constant per unit atomic mass, `k_B / m_u` [erg g⁻¹ K⁻¹].
pub const R_GAS: f64 = K_B / M_U;

/// Gravitational parameter `G·M` for a mass in grams.
pub fn gm(mass: f64) -> f64 {
    G * mass
}

/// Convert a photon energy [keV] to frequency [Hz].
pub fn kev_to_hertz(e: f64) -> f64 {
    e * KEV / PLANCK
}
