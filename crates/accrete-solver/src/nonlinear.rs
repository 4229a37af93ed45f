//! One implicit nonlinear diffusion step on a non-uniform grid.

use accrete_core::{DensityLaw, SolverError};
use accrete_wind::WindCoefficients;

use crate::tridiagonal::Tridiagonal;

/// Convergence controls of the chord iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverSettings {
    /// Relative change of `F` below which the iteration stops. Default: 1e-6.
    pub eps: f64,
    /// Iteration cap. Default: 512.
    pub max_iterations: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            eps: 1e-6,
            max_iterations: 512,
        }
    }
}

/// Outcome of a converged step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SolveReport {
    /// Chord iterations performed.
    pub iterations: usize,
    /// Relative change of the final iteration.
    pub residual: f64,
}

/// Time step, active range and boundary values for one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepInput {
    /// Time step [s].
    pub tau: f64,
    /// Inner active index; `F[first]` is held at `f_in`.
    pub first: usize,
    /// Outer active index.
    pub last: usize,
    /// Torque at the inner boundary.
    pub f_in: f64,
    /// Mass inflow through the outer boundary, `∂F/∂h` at `last` [g/s].
    pub mdot_out: f64,
}

/// Advances the torque field by one backward-Euler step.
///
/// The equation `∂W(F)/∂t = ∂²F/∂h² + A·∂F/∂h + B·F + C` is discretised
/// with three-point differences on the non-uniform `h` grid. The
/// nonlinear `W(F)` is replaced in each iteration by its chord through
/// the previous time level, `(W(Fᵏ) - W(Fⁿ)) / (Fᵏ - Fⁿ)`, which turns the
/// step into a sequence of tridiagonal solves.
///
/// # Examples
///
/// ```
/// use accrete_core::DensityLaw;
/// use accrete_solver::{DiffusionStepper, SolverSettings, StepInput};
/// use accrete_wind::WindCoefficients;
///
/// struct Linear;
/// impl DensityLaw for Linear {
///     fn w(&self, f: f64, _h: f64) -> f64 { f }
///     fn dw_df(&self, _f: f64, _h: f64) -> f64 { 1.0 }
/// }
///
/// let h: Vec<f64> = (1..=10).map(f64::from).collect();
/// let mut f = vec![2.0; 10];
/// let wind = WindCoefficients::zeros(10);
/// let input = StepInput { tau: 0.1, first: 0, last: 9, f_in: 2.0, mdot_out: 0.0 };
/// let report = DiffusionStepper::new(SolverSettings::default())
///     .advance(&Linear, &h, &wind, input, &mut f)
///     .unwrap();
/// assert_eq!(report.iterations, 1);
/// assert!(f.iter().all(|&x| (x - 2.0).abs() < 1e-12));
/// ```
#[derive(Clone, Debug, Default)]
pub struct DiffusionStepper {
    settings: SolverSettings,
}

impl DiffusionStepper {
    /// Stepper with the given convergence controls.
    pub fn new(settings: SolverSettings) -> Self {
        Self { settings }
    }

    /// Convergence controls.
    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Advance `f` over `[first, last]` by one step.
    ///
    /// Nodes outside the active range are left untouched. On error `f` is
    /// not modified.
    pub fn advance<D: DensityLaw + ?Sized>(
        &self,
        law: &D,
        h: &[f64],
        wind: &WindCoefficients,
        input: StepInput,
        f: &mut [f64],
    ) -> Result<SolveReport, SolverError> {
        let StepInput {
            tau,
            first,
            last,
            f_in,
            mdot_out,
        } = input;
        if last < first + 2 || last >= f.len() || last >= h.len() {
            return Err(SolverError::RangeTooShort { first, last });
        }

        let n = last - first + 1;
        let h = &h[first..=last];
        let f0 = f[first..=last].to_vec();
        let w0: Vec<f64> = f0.iter().zip(h).map(|(&f, &h)| law.w(f, h)).collect();

        let mut sys = Tridiagonal::with_rows(n);
        sys.diag[0] = 1.0;
        sys.rhs[0] = f_in;
        sys.sub[n - 1] = -1.0;
        sys.diag[n - 1] = 1.0;
        sys.rhs[n - 1] = mdot_out * (h[n - 1] - h[n - 2]);

        let mut current = f0.clone();
        let mut next = vec![0.0; n];
        let mut residual = f64::INFINITY;

        for iteration in 1..=self.settings.max_iterations {
            for j in 1..n - 1 {
                let i = first + j;
                let frac = if current[j] != f0[j] {
                    (law.w(current[j], h[j]) - w0[j]) / (current[j] - f0[j])
                } else {
                    law.dw_df(f0[j], h[j])
                };
                let lower = 2.0 / ((h[j + 1] - h[j - 1]) * (h[j] - h[j - 1]));
                let upper = 2.0 / ((h[j + 1] - h[j - 1]) * (h[j + 1] - h[j]));
                let advect = wind.a[i] / (h[j + 1] - h[j - 1]);

                sys.sub[j] = -lower + advect;
                sys.diag[j] = frac / tau + lower + upper - wind.b[i];
                sys.sup[j] = -(upper + advect);
                sys.rhs[j] = frac * f0[j] / tau + wind.c[i];
            }

            sys.solve(&mut next).map_err(|e| match e {
                SolverError::SingularMatrix { index } => SolverError::SingularMatrix {
                    index: first + index,
                },
                other => other,
            })?;
            if let Some(j) = next.iter().position(|x| !x.is_finite()) {
                return Err(SolverError::NonFinite { index: first + j });
            }

            let change = next
                .iter()
                .zip(&current)
                .fold(0.0f64, |m, (a, b)| m.max((a - b).abs()));
            let scale = next.iter().fold(0.0f64, |m, x| m.max(x.abs()));
            residual = if scale > 0.0 { change / scale } else { change };
            std::mem::swap(&mut current, &mut next);

            if residual < self.settings.eps {
                f[first..=last].copy_from_slice(&current);
                log::trace!(
                    "diffusion step converged: {iteration} iterations, residual {residual:e}"
                );
                return Ok(SolveReport {
                    iterations: iteration,
                    residual,
                });
            }
        }

        Err(SolverError::NotConverged {
            iterations: self.settings.max_iterations,
            residual,
        })
    }
}
