//! The `(A, B, C)` coefficient triple shared by every wind law.

/// Per-node wind perturbation of the diffusion operator.
///
/// All three sequences are indexed like the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct WindCoefficients {
    /// Advective coefficient multiplying `∂F/∂h`.
    pub a: Vec<f64>,
    /// Linear coefficient multiplying `F`.
    pub b: Vec<f64>,
    /// Source term [g s⁻¹ per unit h].
    pub c: Vec<f64>,
}

impl WindCoefficients {
    /// All-zero coefficients for `nx` nodes.
    pub fn zeros(nx: usize) -> Self {
        Self {
            a: vec![0.0; nx],
            b: vec![0.0; nx],
            c: vec![0.0; nx],
        }
    }

    /// Number of nodes covered.
    pub fn len(&self) -> usize {
        self.a.len()
    }

    /// Whether no nodes are covered.
    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// Reset every coefficient to zero, resizing to `nx` nodes.
    pub fn clear(&mut self, nx: usize) {
        for v in [&mut self.a, &mut self.b, &mut self.c] {
            v.clear();
            v.resize(nx, 0.0);
        }
    }

    /// Whether all three sequences vanish.
    pub fn is_zero(&self) -> bool {
        self.a
            .iter()
            .chain(&self.b)
            .chain(&self.c)
            .all(|&x| x == 0.0)
    }
}
