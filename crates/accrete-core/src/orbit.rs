//! Compact-object and binary-orbit geometry.

use std::f64::consts::PI;

use crate::constants::{C, G};

/// Innermost stable circular orbit in units of `GM/c²` for a Kerr
/// parameter `a` in `[-1, 1]` (Bardeen, Press & Teukolsky 1972).
///
/// Negative `a` describes a retrograde orbit.
pub fn r_isco(a: f64) -> f64 {
    let z1 = 1.0 + (1.0 - a * a).cbrt() * ((1.0 + a).cbrt() + (1.0 - a).cbrt());
    let z2 = (3.0 * a * a + z1 * z1).sqrt();
    3.0 + z2 - a.signum() * ((3.0 - z1) * (3.0 + z1 + 2.0 * z2)).sqrt()
}

/// Radiative efficiency of accretion down to the ISCO.
pub fn efficiency(a: f64) -> f64 {
    1.0 - (1.0 - 2.0 / (3.0 * r_isco(a))).sqrt()
}

/// Gravitational radius `GM/c²` [cm].
pub fn gravitational_radius(mass: f64) -> f64 {
    G * mass / (C * C)
}

/// Semi-major axis of a binary from Kepler's third law [cm].
pub fn semi_axis(total_mass: f64, period: f64) -> f64 {
    (G * total_mass * period * period / (4.0 * PI * PI)).cbrt()
}

/// Eggleton (1983) volume-equivalent Roche-lobe radius of the star of
/// mass `m1` with companion `m2`, in units of the semi-major axis.
pub fn roche_lobe_fraction(m1: f64, m2: f64) -> f64 {
    let q = m1 / m2;
    let q23 = q.powf(2.0 / 3.0);
    0.49 * q23 / (0.6 * q23 + (1.0 + q.cbrt()).ln())
}

/// Roche-lobe radius of the accretor [cm].
pub fn roche_lobe_radius(m_accretor: f64, m_companion: f64, period: f64) -> f64 {
    semi_axis(m_accretor + m_companion, period) * roche_lobe_fraction(m_accretor, m_companion)
}
