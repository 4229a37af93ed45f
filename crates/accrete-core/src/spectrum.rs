//! Blackbody spectral helpers and photometric passbands.
//!
//! All intensities are per steradian, CGS.

use std::f64::consts::PI;

use crate::constants::{ANGSTROM, C, K_B, PLANCK, SIGMA_SB};
use crate::orbit::r_isco;

/// Planck spectral radiance per unit frequency, `B_ν(T)`.
pub fn planck_nu(t: f64, nu: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    2.0 * PLANCK * nu.powi(3) / (C * C) / (PLANCK * nu / (K_B * t)).exp_m1()
}

/// Planck spectral radiance per unit wavelength, `B_λ(T)`.
pub fn planck_lambda(t: f64, lambda: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    2.0 * PLANCK * C * C / lambda.powi(5) / (PLANCK * C / (lambda * K_B * t)).exp_m1()
}

/// Radiance integrated over `[nu1, nu2]`, `∫ B_ν(T) dν`.
///
/// `nu2` may be infinite.
pub fn planck_nu1_nu2(t: f64, nu1: f64, nu2: f64) -> f64 {
    if t <= 0.0 || nu2 <= nu1 {
        return 0.0;
    }
    let kt = K_B * t;
    let x1 = PLANCK * nu1 / kt;
    let x2 = PLANCK * nu2 / kt;
    2.0 * kt.powi(4) / (PLANCK.powi(3) * C * C) * (planck_tail(x1) - planck_tail(x2))
}

/// `∫_x^∞ t³ / (eᵗ - 1) dt`.
fn planck_tail(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    if x < 2.0 {
        let x2 = x * x;
        let x3 = x2 * x;
        return PI.powi(4) / 15.0
            - (x3 / 3.0 - x2 * x2 / 8.0 + x3 * x2 / 60.0 - x3 * x2 * x2 / 5040.0
                + x3 * x3 * x3 / 272_160.0);
    }
    let mut sum = 0.0;
    for k in 1..=64 {
        let k = k as f64;
        let term = (-k * x).exp() * (x * x * x / k + 3.0 * x * x / (k * k) + 6.0 * x / k.powi(3)
            + 6.0 / k.powi(4));
        sum += term;
        if term < sum * 1e-15 {
            break;
        }
    }
    sum
}

/// Johnson–Cousins and near-infrared photometric bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Passband {
    /// Ultraviolet, 3600 Å.
    U,
    /// Blue, 4400 Å.
    B,
    /// Visual, 5500 Å.
    V,
    /// Red, 7000 Å.
    R,
    /// Near-infrared, 9000 Å.
    I,
    /// Infrared, 12500 Å.
    J,
}

impl Passband {
    /// Every band, shortest wavelength first.
    pub const ALL: [Passband; 6] = [Self::U, Self::B, Self::V, Self::R, Self::I, Self::J];

    /// Effective wavelength [cm].
    pub fn lambda(self) -> f64 {
        ANGSTROM
            * match self {
                Self::U => 3600.0,
                Self::B => 4400.0,
                Self::V => 5500.0,
                Self::R => 7000.0,
                Self::I => 9000.0,
                Self::J => 12500.0,
            }
    }

    /// Zero-magnitude spectral flux density [erg s⁻¹ cm⁻² cm⁻¹].
    pub fn zero_point(self) -> f64 {
        let per_angstrom = match self {
            Self::U => 4.175e-9,
            Self::B => 6.32e-9,
            Self::V => 3.631e-9,
            Self::R => 2.177e-9,
            Self::I => 1.126e-9,
            Self::J => 3.14e-10,
        };
        per_angstrom / ANGSTROM
    }
}

// ── RelativisticDisk ───────────────────────────────────────────────

/// Effective temperature of a Novikov–Thorne disk around a Kerr black
/// hole (Page & Thorne 1974), with zero torque at the ISCO.
///
/// Work in `x = sqrt(R c² / GM)`. The spin-dependent roots of
/// `x³ - 3x + 2a` and the logarithmic offsets at the ISCO are computed
/// once.
#[derive(Clone, Debug, PartialEq)]
pub struct RelativisticDisk {
    kerr: f64,
    x0: f64,
    roots: [f64; 3],
    weights: [f64; 3],
    offsets: [f64; 3],
}

impl RelativisticDisk {
    /// Disk around a hole with Kerr parameter `kerr`, `|kerr| < 1`.
    pub fn new(kerr: f64) -> Self {
        let x0 = r_isco(kerr).sqrt();
        let theta = kerr.acos();
        let roots = [
            2.0 * ((theta - PI) / 3.0).cos(),
            2.0 * ((theta + PI) / 3.0).cos(),
            -2.0 * (theta / 3.0).cos(),
        ];
        let weights = std::array::from_fn(|i| {
            let (xi, xj, xk) = (roots[i], roots[(i + 1) % 3], roots[(i + 2) % 3]);
            3.0 * (xi - kerr).powi(2) / (xi * (xi - xj) * (xi - xk))
        });
        let offsets = roots.map(|xi| (x0 - xi).ln());
        Self {
            kerr,
            x0,
            roots,
            weights,
            offsets,
        }
    }

    /// The Kerr parameter.
    pub fn kerr(&self) -> f64 {
        self.kerr
    }

    /// Effective temperature at radius `r` [cm] around gravitational
    /// parameter `gm` for accretion rate `mdot` [g/s].
    ///
    /// Zero at and inside the ISCO and for a non-positive rate.
    pub fn temperature(&self, r: f64, gm: f64, mdot: f64) -> f64 {
        let x = (r * C * C / gm).sqrt();
        if mdot <= 0.0 || x <= self.x0 {
            return 0.0;
        }
        let a = self.kerr;
        let mut bracket = x - self.x0 - 1.5 * a * (x / self.x0).ln();
        for ((xi, w), offset) in self.roots.iter().zip(&self.weights).zip(&self.offsets) {
            bracket -= w * ((x - xi).ln() - offset);
        }
        let flux = 3.0 * mdot * C.powi(6) / (8.0 * PI * gm * gm) * bracket
            / (x.powi(4) * (x.powi(3) - 3.0 * x + 2.0 * a));
        (flux.max(0.0) / SIGMA_SB).powf(0.25)
    }
}
