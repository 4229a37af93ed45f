//! Per-step performance and diagnostic metrics.
//!
//! [`StepMetrics`] captures timing and solver data for a single committed
//! step.

/// Timing and solver metrics collected during a single step.
///
/// All durations are in microseconds. [`Evolution`](crate::Evolution)
/// returns these from every successful `step()` and keeps a copy of the
/// most recent ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Time spent re-evaluating a dynamic wind law, in microseconds.
    pub wind_us: u64,
    /// Time spent in the nonlinear diffusion solve, in microseconds.
    pub solve_us: u64,
    /// Chord iterations the solve needed.
    pub solver_iterations: usize,
    /// Relative change of the last iteration.
    pub solver_residual: f64,
    /// Signed move of the inner index; positive is outward.
    pub first_shift: isize,
    /// Signed move of the outer index; negative is inward.
    pub last_shift: isize,
}

impl StepMetrics {
    /// Whether either edge of the active range moved.
    pub fn edges_moved(&self) -> bool {
        self.first_shift != 0 || self.last_shift != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.wind_us, 0);
        assert_eq!(m.solve_us, 0);
        assert_eq!(m.solver_iterations, 0);
        assert_eq!(m.solver_residual, 0.0);
        assert!(!m.edges_moved());
    }

    #[test]
    fn edge_moves_are_reported() {
        let m = StepMetrics {
            last_shift: -3,
            ..StepMetrics::default()
        };
        assert!(m.edges_moved());
    }
}
