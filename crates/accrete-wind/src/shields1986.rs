//! Thermal wind driven by central irradiation, after Shields et al. (1986).

use accrete_core::DiskSnapshot;

use crate::coefficients::WindCoefficients;
use crate::error::WindError;
use crate::model::WindModel;

/// Sink proportional to the current accretion rate, spread uniformly in
/// `h` over the part of the disk outside `R_wind,min`.
///
/// `C = -kC · max(Ṁ_in, 0) / (h_last - h_wmin)` for `R ≥ R_wind,min`,
/// where `R_wind,min = R_windmin2out · R[last]`; zero inside. Because it
/// follows `Ṁ_in` and the current outer edge it is recomputed every step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shields1986Wind {
    k_c: f64,
    r_windmin_to_out: f64,
}

impl Shields1986Wind {
    /// Wind removing `k_c · Ṁ_in`, launched outside
    /// `r_windmin_to_out · R[last]`.
    pub fn new(k_c: f64, r_windmin_to_out: f64) -> Result<Self, WindError> {
        if !(r_windmin_to_out > 0.0 && r_windmin_to_out < 1.0) {
            return Err(WindError::InvalidParameter {
                wind: "testC_q0_Shields1986",
                parameter: "R_windmin2out",
                value: r_windmin_to_out,
            });
        }
        Ok(Self {
            k_c,
            r_windmin_to_out,
        })
    }
}

impl WindModel for Shields1986Wind {
    fn name(&self) -> &str {
        "testC_q0_Shields1986"
    }

    fn is_dynamic(&self) -> bool {
        true
    }

    fn update(&self, disk: &dyn DiskSnapshot, out: &mut WindCoefficients) {
        let grid = disk.grid();
        let last = disk.last();
        out.clear(grid.len());

        let r_wind_min = self.r_windmin_to_out * grid.r()[last];
        let h_wind_min = (grid.gm() * r_wind_min).sqrt();
        let c = -self.k_c * disk.mdot_in().max(0.0) / (grid.h()[last] - h_wind_min);
        for (out_c, &r) in out.c.iter_mut().zip(grid.r()) {
            if r >= r_wind_min {
                *out_c = c;
            }
        }
    }
}
