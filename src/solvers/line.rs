//! Work buffers for one grid line of a directional sweep.

use crate::boundary::BoundaryCondition;
use crate::core::FdError;

use super::stencil::{apply_line, StencilWeights};
use super::tridiagonal::TridiagonalSolver;

/// Stencil weights, values and tridiagonal bands of a single grid line.
#[derive(Debug, Clone)]
pub struct LineSystem {
    pub weights: Vec<StencilWeights>,
    pub values: Vec<f64>,
    pub out: Vec<f64>,
    pub lower: Vec<f64>,
    pub diagonal: Vec<f64>,
    pub upper: Vec<f64>,
    pub rhs: Vec<f64>,
}

impl LineSystem {
    pub fn new(n: usize) -> Self {
        Self {
            weights: vec![StencilWeights::default(); n],
            values: vec![0.0; n],
            out: vec![0.0; n],
            lower: vec![0.0; n],
            diagonal: vec![0.0; n],
            upper: vec![0.0; n],
            rhs: vec![0.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `out = k·L values` under the given end conditions.
    pub fn apply(&mut self, lower: BoundaryCondition, upper: BoundaryCondition, h: f64) {
        apply_line(&self.weights, &self.values, lower, upper, h, &mut self.out);
    }

    /// Row `i` of `I − θ·k·L`.
    #[inline]
    pub fn set_bands(&mut self, i: usize, w: StencilWeights, theta: f64) {
        self.lower[i] = -theta * w.lower;
        self.diagonal[i] = theta.mul_add(w.center, 1.0);
        self.upper[i] = -theta * w.upper;
    }

    /// Solves the banded system for `rhs`, writing into `values`.
    pub fn solve(
        &mut self,
        solver: &mut dyn TridiagonalSolver,
        lower: BoundaryCondition,
        upper: BoundaryCondition,
    ) -> Result<(), FdError> {
        solver.set_diagonals(&self.lower, &self.diagonal, &self.upper)?;
        solver.set_rhs(&self.rhs)?;
        solver.solve(lower, upper, &mut self.values)
    }
}
