//! Core traits at the seams between the state, wind laws and solver.

use crate::grid::Grid;

/// Read-only view of the evolving disk.
///
/// Wind laws receive this instead of a reference to the owning state so
/// they can neither mutate it nor outlive it.
pub trait DiskSnapshot {
    /// The fixed radial grid.
    fn grid(&self) -> &Grid;

    /// Viscous torque on every grid node. Only `[first, last]` is evolved.
    fn f(&self) -> &[f64];

    /// Inner active index.
    fn first(&self) -> usize;

    /// Outer active index.
    fn last(&self) -> usize;

    /// Accretion rate through the inner edge [g/s].
    fn mdot_in(&self) -> f64;

    /// Simulated time [s].
    fn t(&self) -> f64;
}

/// Maps torque `F` at coordinate `h` to the diffusion variable `W`, the
/// disk mass per unit `h`.
///
/// Implementations must be monotonic in `|F|` so the chord iteration of
/// the diffusion solve is well defined.
pub trait DensityLaw {
    /// `W(F, h)`.
    fn w(&self, f: f64, h: f64) -> f64;

    /// `∂W/∂F` at `(F, h)`, finite for `F = 0`.
    fn dw_df(&self, f: f64, h: f64) -> f64;
}
