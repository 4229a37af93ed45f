//! Analytic test laws with uniform coefficients.
//!
//! Each law switches on exactly one of `A`, `B` or `C` with a value that
//! is constant across the disk, which gives closed-form solutions to
//! check the diffusion operator against.

use accrete_core::DiskSnapshot;

use crate::coefficients::WindCoefficients;
use crate::model::WindModel;

/// Uniform advective term, `A = -kA / (h_out - h_in)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TestAWind {
    k: f64,
}

impl TestAWind {
    /// Law with strength `k`.
    pub fn new(k: f64) -> Self {
        Self { k }
    }
}

impl WindModel for TestAWind {
    fn name(&self) -> &str {
        "testA"
    }

    fn update(&self, disk: &dyn DiskSnapshot, out: &mut WindCoefficients) {
        let h = disk.grid().h();
        out.clear(h.len());
        out.a.fill(-self.k / (h[h.len() - 1] - h[0]));
    }
}

/// Uniform linear term, `B = -kB / h_out²`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TestBWind {
    k: f64,
}

impl TestBWind {
    /// Law with strength `k`.
    pub fn new(k: f64) -> Self {
        Self { k }
    }
}

impl WindModel for TestBWind {
    fn name(&self) -> &str {
        "testB"
    }

    fn update(&self, disk: &dyn DiskSnapshot, out: &mut WindCoefficients) {
        let h = disk.grid().h();
        let h_out = h[h.len() - 1];
        out.clear(h.len());
        out.b.fill(-self.k / (h_out * h_out));
    }
}

/// Uniform sink, `C = -kC / (h_out - h_in)`: a total loss of `kC` g/s
/// spread evenly over `h`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TestCWind {
    k: f64,
}

impl TestCWind {
    /// Law removing `k` g/s in total.
    pub fn new(k: f64) -> Self {
        Self { k }
    }
}

impl WindModel for TestCWind {
    fn name(&self) -> &str {
        "testC"
    }

    fn update(&self, disk: &dyn DiskSnapshot, out: &mut WindCoefficients) {
        let h = disk.grid().h();
        out.clear(h.len());
        out.c.fill(-self.k / (h[h.len() - 1] - h[0]));
    }
}
