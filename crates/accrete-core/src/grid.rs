//! Fixed non-uniform radial mesh in the `h = sqrt(GM·R)` coordinate.

use std::fmt;
use std::str::FromStr;

use crate::error::GridError;

/// Spacing of grid nodes in `h`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GridScale {
    /// Geometric spacing in `h` (uniform in `ln h`).
    #[default]
    Log,
    /// Uniform spacing in `h`.
    Linear,
}

impl FromStr for GridScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "log" => Ok(Self::Log),
            "linear" => Ok(Self::Linear),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for GridScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Log => f.write_str("log"),
            Self::Linear => f.write_str("linear"),
        }
    }
}

/// An ordered radial mesh, fixed for the lifetime of a run.
///
/// Cell `i` stores the Keplerian specific angular momentum `h[i]` and the
/// radius `R[i] = h[i]² / GM`. `h` is strictly increasing; `R[0]` is the
/// innermost allowed radius and `R[Nx-1]` the outer (tidal) radius.
///
/// # Examples
///
/// ```
/// use accrete_core::{Grid, GridScale};
///
/// let gm = 1.0e26;
/// let grid = Grid::new(gm, 1.0e7, 1.0e11, 100, GridScale::Log).unwrap();
/// assert_eq!(grid.len(), 100);
/// assert!((grid.r()[0] - 1.0e7).abs() / 1.0e7 < 1e-12);
/// assert!(grid.h().windows(2).all(|w| w[0] < w[1]));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    gm: f64,
    h: Vec<f64>,
    r: Vec<f64>,
}

impl Grid {
    /// Smallest supported cell count: one boundary cell on each side plus
    /// one evolved interior cell.
    pub const MIN_CELLS: usize = 3;

    /// Build a grid of `nx` cells spanning `[r_in, r_out]`.
    pub fn new(
        gm: f64,
        r_in: f64,
        r_out: f64,
        nx: usize,
        scale: GridScale,
    ) -> Result<Self, GridError> {
        check_gm(gm)?;
        if nx < Self::MIN_CELLS {
            return Err(GridError::TooFewCells {
                nx,
                min: Self::MIN_CELLS,
            });
        }
        if !(r_in.is_finite() && r_in > 0.0) {
            return Err(GridError::InvalidCoordinate {
                index: 0,
                value: r_in,
            });
        }
        if !(r_out.is_finite() && r_out > r_in) {
            return Err(GridError::InvertedRadii { r_in, r_out });
        }

        let h_in = (gm * r_in).sqrt();
        let h_out = (gm * r_out).sqrt();
        let last = (nx - 1) as f64;
        let h = (0..nx)
            .map(|i| {
                let x = i as f64 / last;
                match scale {
                    GridScale::Log => h_in * (h_out / h_in).powf(x),
                    GridScale::Linear => h_in + (h_out - h_in) * x,
                }
            })
            .collect();
        Self::from_h(gm, h)
    }

    /// Build a grid from explicit `h` nodes.
    ///
    /// Fails unless every node is finite and positive and the sequence is
    /// strictly increasing.
    pub fn from_h(gm: f64, h: Vec<f64>) -> Result<Self, GridError> {
        check_gm(gm)?;
        if h.len() < Self::MIN_CELLS {
            return Err(GridError::TooFewCells {
                nx: h.len(),
                min: Self::MIN_CELLS,
            });
        }
        check_nodes(&h)?;
        let r = h.iter().map(|&x| x * x / gm).collect();
        Ok(Self { gm, h, r })
    }

    /// Uniformly spaced grid of `nx` nodes between `h_in` and `h_out`.
    pub fn uniform(gm: f64, h_in: f64, h_out: f64, nx: usize) -> Result<Self, GridError> {
        if nx < Self::MIN_CELLS {
            return Err(GridError::TooFewCells {
                nx,
                min: Self::MIN_CELLS,
            });
        }
        let step = (h_out - h_in) / (nx - 1) as f64;
        Self::from_h(gm, (0..nx).map(|i| h_in + step * i as f64).collect())
    }

    /// Re-check the structural invariants.
    pub fn validate(&self) -> Result<(), GridError> {
        check_gm(self.gm)?;
        check_nodes(&self.h)?;
        if let Some(index) = self
            .h
            .iter()
            .zip(&self.r)
            .position(|(&h, &r)| r != h * h / self.gm)
        {
            return Err(GridError::InvalidCoordinate {
                index,
                value: self.r[index],
            });
        }
        Ok(())
    }

    /// Gravitational parameter `G·M` of the central object.
    pub fn gm(&self) -> f64 {
        self.gm
    }

    /// Specific angular momentum of each node.
    pub fn h(&self) -> &[f64] {
        &self.h
    }

    /// Radius of each node.
    pub fn r(&self) -> &[f64] {
        &self.r
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.h.len()
    }

    /// Always returns `false`: construction rejects short grids.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Keplerian angular frequency at node `i`, `GM² / h³`.
    pub fn omega(&self, i: usize) -> f64 {
        self.gm * self.gm / self.h[i].powi(3)
    }

    /// Trapezoid integral of a surface quantity over the annuli
    /// between `first` and `last`, `∫ y · 2πR dR`.
    ///
    /// `y` is indexed like the grid; cells outside `[first, last]` are
    /// ignored.
    pub fn integrate_disk(&self, y: &[f64], first: usize, last: usize) -> f64 {
        let r = &self.r;
        (first..last)
            .map(|i| 0.5 * (y[i] * r[i] + y[i + 1] * r[i + 1]) * (r[i + 1] - r[i]))
            .sum::<f64>()
            * 2.0
            * std::f64::consts::PI
    }
}

fn check_gm(gm: f64) -> Result<(), GridError> {
    if gm.is_finite() && gm > 0.0 {
        Ok(())
    } else {
        Err(GridError::InvalidGm { value: gm })
    }
}

fn check_nodes(h: &[f64]) -> Result<(), GridError> {
    for (index, &value) in h.iter().enumerate() {
        if !(value.is_finite() && value > 0.0) {
            return Err(GridError::InvalidCoordinate { index, value });
        }
        if index > 0 && value <= h[index - 1] {
            return Err(GridError::NotIncreasing { index });
        }
    }
    Ok(())
}
