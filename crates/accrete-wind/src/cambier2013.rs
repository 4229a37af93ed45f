//! Compton-heated wind after Cambier & Smith (2013).

use accrete_core::DiskSnapshot;

use crate::coefficients::WindCoefficients;
use crate::error::WindError;
use crate::model::WindModel;

/// Thermal wind switching on outside the Compton radius `R_IC`.
///
/// `A = -2kC/h · ξ²/(1 + ξ²)` with `ξ = R / R_IC` and
/// `R_IC = R_IC2out · R_out`, so the SS73C law is recovered far outside
/// `R_IC` and the wind vanishes well inside it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cambier2013Wind {
    k_c: f64,
    r_ic_to_out: f64,
}

impl Cambier2013Wind {
    /// Wind of strength `k_c` with Compton radius `r_ic_to_out · R_out`.
    pub fn new(k_c: f64, r_ic_to_out: f64) -> Result<Self, WindError> {
        if r_ic_to_out <= 0.0 {
            return Err(WindError::InvalidParameter {
                wind: "Cambier2013",
                parameter: "R_IC2out",
                value: r_ic_to_out,
            });
        }
        Ok(Self { k_c, r_ic_to_out })
    }
}

impl WindModel for Cambier2013Wind {
    fn name(&self) -> &str {
        "Cambier2013"
    }

    fn update(&self, disk: &dyn DiskSnapshot, out: &mut WindCoefficients) {
        let grid = disk.grid();
        let r = grid.r();
        let r_ic = self.r_ic_to_out * r[r.len() - 1];
        out.clear(grid.len());
        for ((a, &h), &r) in out.a.iter_mut().zip(grid.h()).zip(r) {
            let xi2 = (r / r_ic).powi(2);
            *a = -2.0 * self.k_c / h * xi2 / (1.0 + xi2);
        }
    }
}
