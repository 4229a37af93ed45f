//! Test utilities and mock types for accrete development.
//!
//! Provides [`MockDisk`], an in-memory implementation of
//! [`DiskSnapshot`] with builder-style setters, plus grid and tolerance
//! helpers in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use accrete_core::{DiskSnapshot, Grid};

pub use fixtures::{assert_rel_eq, unit_grid};

/// Mock implementation of [`DiskSnapshot`].
///
/// Defaults to the whole grid being active, zero accretion rate and
/// `t = 0`. Adjust with the `with_*` setters before passing to code
/// under test.
#[derive(Clone, Debug)]
pub struct MockDisk {
    grid: Grid,
    f: Vec<f64>,
    first: usize,
    last: usize,
    mdot_in: f64,
    t: f64,
}

impl MockDisk {
    pub fn new(grid: Grid, f: Vec<f64>) -> Self {
        assert_eq!(grid.len(), f.len(), "torque length must match grid");
        let last = grid.len() - 1;
        Self {
            grid,
            f,
            first: 0,
            last,
            mdot_in: 0.0,
            t: 0.0,
        }
    }

    /// `nx` nodes on [`unit_grid`] with unit torque everywhere.
    pub fn uniform(nx: usize) -> Self {
        Self::new(unit_grid(nx), vec![1.0; nx])
    }

    pub fn with_range(mut self, first: usize, last: usize) -> Self {
        assert!(first < last && last < self.grid.len());
        self.first = first;
        self.last = last;
        self
    }

    pub fn with_mdot_in(mut self, mdot_in: f64) -> Self {
        self.mdot_in = mdot_in;
        self
    }

    pub fn with_t(mut self, t: f64) -> Self {
        self.t = t;
        self
    }

    pub fn with_f(mut self, f: Vec<f64>) -> Self {
        assert_eq!(f.len(), self.grid.len());
        self.f = f;
        self
    }
}

impl DiskSnapshot for MockDisk {
    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn f(&self) -> &[f64] {
        &self.f
    }

    fn first(&self) -> usize {
        self.first
    }

    fn last(&self) -> usize {
        self.last
    }

    fn mdot_in(&self) -> f64 {
        self.mdot_in
    }

    fn t(&self) -> f64 {
        self.t
    }
}
