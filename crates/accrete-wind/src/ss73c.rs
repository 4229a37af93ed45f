//! Shakura & Sunyaev (1973) wind with constant relative loss rate.

use accrete_core::DiskSnapshot;

use crate::coefficients::WindCoefficients;
use crate::model::WindModel;

/// A fraction `k` of the local accretion rate leaves the disk per unit
/// `ln R`: `A = -2k / h`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ss73cWind {
    k: f64,
}

impl Ss73cWind {
    /// Wind with loss fraction `k`.
    pub fn new(k: f64) -> Self {
        Self { k }
    }
}

impl WindModel for Ss73cWind {
    fn name(&self) -> &str {
        "SS73C"
    }

    fn update(&self, disk: &dyn DiskSnapshot, out: &mut WindCoefficients) {
        let h = disk.grid().h();
        out.clear(h.len());
        for (a, &h) in out.a.iter_mut().zip(h) {
            *a = -2.0 * self.k / h;
        }
    }
}
