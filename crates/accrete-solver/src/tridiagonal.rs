//! Tridiagonal linear systems.

use accrete_core::SolverError;

/// A tridiagonal system `sub[i]·x[i-1] + diag[i]·x[i] + sup[i]·x[i+1] = rhs[i]`.
///
/// `sub[0]` and `sup[n-1]` are ignored.
#[derive(Clone, Debug, Default)]
pub struct Tridiagonal {
    /// Sub-diagonal.
    pub sub: Vec<f64>,
    /// Main diagonal.
    pub diag: Vec<f64>,
    /// Super-diagonal.
    pub sup: Vec<f64>,
    /// Right-hand side.
    pub rhs: Vec<f64>,
}

impl Tridiagonal {
    /// A zeroed system of `n` rows.
    pub fn with_rows(n: usize) -> Self {
        Self {
            sub: vec![0.0; n],
            diag: vec![0.0; n],
            sup: vec![0.0; n],
            rhs: vec![0.0; n],
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.diag.len()
    }

    /// Whether the system has no rows.
    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    /// Solve by Thomas elimination into `x`.
    ///
    /// Fails with [`SolverError::SingularMatrix`] on a zero or non-finite
    /// pivot; the reported index is the local row.
    pub fn solve(&self, x: &mut [f64]) -> Result<(), SolverError> {
        let n = self.len();
        debug_assert_eq!(x.len(), n);
        if n == 0 {
            return Ok(());
        }

        let mut c_prime = vec![0.0; n];
        let mut d_prime = vec![0.0; n];

        let pivot = self.diag[0];
        if pivot == 0.0 || !pivot.is_finite() {
            return Err(SolverError::SingularMatrix { index: 0 });
        }
        c_prime[0] = self.sup[0] / pivot;
        d_prime[0] = self.rhs[0] / pivot;

        for i in 1..n {
            let pivot = self.diag[i] - self.sub[i] * c_prime[i - 1];
            if pivot == 0.0 || !pivot.is_finite() {
                return Err(SolverError::SingularMatrix { index: i });
            }
            c_prime[i] = if i + 1 < n { self.sup[i] / pivot } else { 0.0 };
            d_prime[i] = (self.rhs[i] - self.sub[i] * d_prime[i - 1]) / pivot;
        }

        x[n - 1] = d_prime[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = d_prime[i] - c_prime[i] * x[i + 1];
        }
        Ok(())
    }
}
