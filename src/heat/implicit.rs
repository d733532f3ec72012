use crate::boundary::BoundaryPair1d;
use crate::core::{ensure_len, FdError};
use crate::solvers::{apply_line, StencilWeights, TridiagonalSolver};

use super::coefficients::HeatSchemeCoefficients;
use super::time_loop::HeatMethod;

/// θ-weighted implicit heat step solved as one tridiagonal system.
///
/// `−θA' u'_{i-1} + (1 + θD') u'_i − θB' u'_{i+1}
///  = u_i + (1−θ)(A u_{i-1} − D u_i + B u_{i+1}) + k(θS' + (1−θ)S)`,
/// primes marking the new time level.
pub struct ImplicitHeatMethod {
    coefficients: HeatSchemeCoefficients,
    boundaries: BoundaryPair1d,
    solver: Box<dyn TridiagonalSolver>,
    weights_old: Vec<StencilWeights>,
    weights_new: Vec<StencilWeights>,
    operator: Vec<f64>,
    source_old: Vec<f64>,
    source_new: Vec<f64>,
    lower: Vec<f64>,
    diagonal: Vec<f64>,
    upper: Vec<f64>,
    rhs: Vec<f64>,
}

impl ImplicitHeatMethod {
    pub fn new(
        coefficients: HeatSchemeCoefficients,
        boundaries: BoundaryPair1d,
        solver: Box<dyn TridiagonalSolver>,
    ) -> Result<Self, FdError> {
        let n = coefficients.size();
        ensure_len("tridiagonal solver", solver.size(), n)?;
        if !(0.0..=1.0).contains(&coefficients.theta) {
            return Err(FdError::InvalidInput(format!(
                "implicit theta must be in [0, 1], got {}",
                coefficients.theta
            )));
        }
        Ok(Self {
            coefficients,
            boundaries,
            solver,
            weights_old: vec![StencilWeights::default(); n],
            weights_new: vec![StencilWeights::default(); n],
            operator: vec![0.0; n],
            source_old: vec![0.0; n],
            source_new: vec![0.0; n],
            lower: vec![0.0; n],
            diagonal: vec![0.0; n],
            upper: vec![0.0; n],
            rhs: vec![0.0; n],
        })
    }
}

impl HeatMethod for ImplicitHeatMethod {
    fn size(&self) -> usize {
        self.coefficients.size()
    }

    fn step(&mut self, solution: &mut [f64], from: f64, to: f64) -> Result<(), FdError> {
        let c = &self.coefficients;
        let theta = c.theta;
        let (lower_old, upper_old) = c.boundary_conditions(&self.boundaries, from);
        let (lower_new, upper_new) = c.boundary_conditions(&self.boundaries, to);

        c.fill_weights(from, &mut self.weights_old);
        c.fill_weights(to, &mut self.weights_new);
        apply_line(&self.weights_old, solution, lower_old, upper_old, c.h, &mut self.operator);

        for (i, w) in self.weights_new.iter().enumerate() {
            self.lower[i] = -theta * w.lower;
            self.diagonal[i] = theta.mul_add(w.center, 1.0);
            self.upper[i] = -theta * w.upper;
            self.rhs[i] = (1.0 - theta).mul_add(self.operator[i], solution[i]);
        }
        if c.fill_source(from, &mut self.source_old) && c.fill_source(to, &mut self.source_new) {
            for (i, r) in self.rhs.iter_mut().enumerate() {
                *r += theta * self.source_new[i] + (1.0 - theta) * self.source_old[i];
            }
        }

        self.solver.set_diagonals(&self.lower, &self.diagonal, &self.upper)?;
        self.solver.set_rhs(&self.rhs)?;
        self.solver.solve(lower_new, upper_new, solution)
    }
}
