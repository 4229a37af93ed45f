//! Vertical-structure relations linking torque, surface density and
//! central temperature for a power-law opacity.
//!
//! With opacity `κ = κ0 ρ T^-γ` and the vertical-structure constants
//! `Π1..Π4`, a steady vertical balance gives
//! `Σ = C0 · W_rφ^(1-m) · ω^(-2/(p+2))` where `p = γ + 9/2` and
//! `W_rφ = F / (2π R²)`. Expressed through the diffusion variable
//! `W = 4π h³ Σ / GM²` this becomes `W = |F|^(1-m) h^n / ((1-m) D)`.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::constants::{R_GAS, SIGMA_SB};
use crate::traits::DensityLaw;

/// Opacity law selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OpacityKind {
    /// Free-free Kramers opacity, `γ = 7/2`.
    #[default]
    Kramers,
    /// Power-law fit to OPAL tables, `γ = 5/2`.
    Opal,
}

impl OpacityKind {
    /// `(κ0, γ, [Π1, Π2, Π3, Π4])` for this law.
    fn coefficients(self) -> (f64, f64, [f64; 4]) {
        match self {
            Self::Kramers => (5e24, 3.5, [5.36, 0.46, 1.03, 0.38]),
            Self::Opal => (1.5e20, 2.5, [6.31, 0.5, 0.88, 0.4]),
        }
    }
}

impl FromStr for OpacityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Kramers" => Ok(Self::Kramers),
            "OPAL" => Ok(Self::Opal),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for OpacityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kramers => f.write_str("Kramers"),
            Self::Opal => f.write_str("OPAL"),
        }
    }
}

/// Derived opacity-dependent constants for one central object.
#[derive(Clone, Debug, PartialEq)]
pub struct OpacityRelation {
    kind: OpacityKind,
    gm: f64,
    alpha: f64,
    mu: f64,
    pi: [f64; 4],
    m: f64,
    n: f64,
    d: f64,
}

impl OpacityRelation {
    /// Derive the relation for viscosity parameter `alpha`, mean molecular
    /// weight `mu` and gravitational parameter `gm`.
    pub fn new(kind: OpacityKind, alpha: f64, mu: f64, gm: f64) -> Self {
        let (kappa0, gamma, pi) = kind.coefficients();
        let [pi1, pi2, pi3, pi4] = pi;
        let a = R_GAS / mu;
        let p = gamma + 4.5;

        let k = 256.0 * pi2 * pi4 * SIGMA_SB * (pi1 * a).sqrt() / (9.0 * kappa0);
        let c0 = (k * (pi2 / (pi3 * alpha * a)).powf(p)).powf(1.0 / (p + 2.0));
        let one_minus_m = (p - 1.0) / (p + 2.0);
        let n = 3.0 - (4.0 * p - 10.0) / (p + 2.0);

        let coef = 4.0
            * PI
            * c0
            * (2.0 * PI).powf(-one_minus_m)
            * gm.powf(2.0 * one_minus_m - 4.0 / (p + 2.0) - 2.0);
        let d = 1.0 / (one_minus_m * coef);

        Self {
            kind,
            gm,
            alpha,
            mu,
            pi,
            m: 1.0 - one_minus_m,
            n,
            d,
        }
    }

    /// Which opacity law this relation was derived for.
    pub fn kind(&self) -> OpacityKind {
        self.kind
    }

    /// Exponent `m` in `W ∝ F^(1-m)`.
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Exponent `n` in `W ∝ h^n`.
    pub fn n(&self) -> f64 {
        self.n
    }

    /// Normalisation `D` of the diffusion variable.
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Viscosity parameter.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Surface density from the diffusion variable at coordinate `h`.
    pub fn sigma(&self, w: f64, h: f64) -> f64 {
        w * self.gm * self.gm / (4.0 * PI * h.powi(3))
    }

    /// Disk semi-thickness `z0` at node `(h, F)` with surface density `sigma`.
    ///
    /// Zero where either the torque or the surface density vanishes.
    pub fn height(&self, h: f64, f: f64, sigma: f64) -> f64 {
        if f <= 0.0 || sigma <= 0.0 {
            return 0.0;
        }
        let [pi1, pi2, pi3, _] = self.pi;
        let a = R_GAS / self.mu;
        let r = h * h / self.gm;
        let w_rphi = f / (2.0 * PI * r * r);
        let t_c = pi2 * w_rphi / (pi3 * self.alpha * a * sigma);
        let omega = self.gm * self.gm / h.powi(3);
        (pi1 * a * t_c).sqrt() / omega
    }
}

impl DensityLaw for OpacityRelation {
    fn w(&self, f: f64, h: f64) -> f64 {
        f.abs().powf(1.0 - self.m) * h.powf(self.n) / ((1.0 - self.m) * self.d)
    }

    fn dw_df(&self, f: f64, h: f64) -> f64 {
        let f_abs = f.abs().max(f64::MIN_POSITIVE);
        f_abs.powf(-self.m) * h.powf(self.n) / self.d
    }
}
