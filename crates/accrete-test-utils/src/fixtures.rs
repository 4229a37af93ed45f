//! Reusable grids and numeric assertions.
//!
//! - [`unit_grid`]: `GM = 1`, `h = 1, 2, …, nx`, so `R = h²`.
//! - [`physical_grid`]: log grid around a 1.4 M☉ neutron star.
//! - [`assert_rel_eq`]: relative-tolerance float comparison.

use accrete_core::constants::{G, M_SUN};
use accrete_core::{Grid, GridScale};

/// Unit-mass grid with integer `h` nodes.
pub fn unit_grid(nx: usize) -> Grid {
    Grid::from_h(1.0, (1..=nx).map(|i| i as f64).collect()).expect("unit grid is valid")
}

/// Log grid from 10 km to 10¹¹ cm around a 1.4 M☉ accretor.
pub fn physical_grid(nx: usize) -> Grid {
    Grid::new(1.4 * G * M_SUN, 1.0e6, 1.0e11, nx, GridScale::Log)
        .expect("physical grid is valid")
}

/// Panic unless `actual` is within relative tolerance `rel` of `expected`.
#[track_caller]
pub fn assert_rel_eq(actual: f64, expected: f64, rel: f64) {
    let scale = expected.abs().max(f64::MIN_POSITIVE);
    assert!(
        ((actual - expected) / scale).abs() <= rel,
        "expected {expected:e}, got {actual:e} (relative tolerance {rel:e})"
    );
}
