//! Memoised derived quantities of one disk state.
//!
//! Every field starts uncomputed and is filled on first access through
//! the accessors on [`EvolutionState`](crate::EvolutionState). The owner
//! replaces the whole structure with [`DiskStructure::default`] whenever
//! the torque field or the active range changes, so a stale value can
//! never be served.

use std::cell::OnceCell;

use accrete_core::Passband;

/// Lazily computed observables.
#[derive(Debug, Default)]
pub(crate) struct DiskStructure {
    pub(crate) w: OnceCell<Vec<f64>>,
    pub(crate) sigma: OnceCell<Vec<f64>>,
    pub(crate) height: OnceCell<Vec<f64>>,
    pub(crate) tph_vis: OnceCell<Vec<f64>>,
    pub(crate) tph_x: OnceCell<Vec<f64>>,
    pub(crate) cirr: OnceCell<Vec<f64>>,
    pub(crate) qx: OnceCell<Vec<f64>>,
    pub(crate) tirr: OnceCell<Vec<f64>>,
    pub(crate) tph: OnceCell<Vec<f64>>,
    pub(crate) tph_cold: OnceCell<Vec<f64>>,
    pub(crate) mdisk: OnceCell<f64>,
    pub(crate) lx: OnceCell<f64>,
    pub(crate) lbol: OnceCell<f64>,
    pub(crate) mdot_wind: OnceCell<f64>,
    magnitudes: [OnceCell<f64>; 6],
}

impl DiskStructure {
    pub(crate) fn magnitude(&self, band: Passband) -> &OnceCell<f64> {
        &self.magnitudes[band as usize]
    }

    /// Number of populated entries, for cache-behaviour tests.
    #[cfg(test)]
    pub(crate) fn populated(&self) -> usize {
        let vectors = [
            &self.w,
            &self.sigma,
            &self.height,
            &self.tph_vis,
            &self.tph_x,
            &self.cirr,
            &self.qx,
            &self.tirr,
            &self.tph,
            &self.tph_cold,
        ]
        .iter()
        .filter(|c| c.get().is_some())
        .count();
        let scalars = [&self.mdisk, &self.lx, &self.lbol, &self.mdot_wind]
            .into_iter()
            .chain(&self.magnitudes)
            .filter(|c| c.get().is_some())
            .count();
        vectors + scalars
    }
}
