//! Three-level wave steps.

use crate::boundary::{BoundaryCondition, BoundaryPair1d};
use crate::core::{ensure_len, FdError};
use crate::pde::WaveScheme;
use crate::solvers::{apply_line, StencilWeights, TridiagonalSolver};

use super::coefficients::WaveSchemeCoefficients;

/// Wave update on the computational grid.
///
/// Explicit: `(1 + δa) u' = 2u − (1 − δa) u⁻ + k²L u + k²S`.
///
/// Implicit: `(1 + δa) u' − ¼k²L u' = 2u + ½k²L u − (1 − δa) u⁻ + ¼k²L u⁻ + k²S`.
///
/// In both schemes `a` and `S` are taken at the centre time level.
///
/// The first level uses the Taylor start `u¹ = u⁰ + kψ + ½k²(L u⁰ − aψ + S)`.
pub struct WaveMethod {
    coefficients: WaveSchemeCoefficients,
    boundaries: BoundaryPair1d,
    scheme: WaveScheme,
    solver: Option<Box<dyn TridiagonalSolver>>,
    weights: Vec<StencilWeights>,
    operator: Vec<f64>,
    operator_previous: Vec<f64>,
    damping: Vec<f64>,
    source: Vec<f64>,
    lower: Vec<f64>,
    diagonal: Vec<f64>,
    upper: Vec<f64>,
    rhs: Vec<f64>,
}

impl WaveMethod {
    /// `solver` is required by the implicit scheme and ignored by the explicit one.
    pub fn new(
        coefficients: WaveSchemeCoefficients,
        boundaries: BoundaryPair1d,
        scheme: WaveScheme,
        solver: Option<Box<dyn TridiagonalSolver>>,
    ) -> Result<Self, FdError> {
        let n = coefficients.size();
        let solver = match (scheme, solver) {
            (WaveScheme::Implicit, None) => {
                return Err(FdError::InvalidInput(
                    "implicit wave scheme needs a tridiagonal solver".to_string(),
                ))
            }
            (WaveScheme::Implicit, Some(s)) => {
                ensure_len("tridiagonal solver", s.size(), n)?;
                Some(s)
            }
            (WaveScheme::Explicit, _) => None,
        };
        Ok(Self {
            coefficients,
            boundaries,
            scheme,
            solver,
            weights: vec![StencilWeights::default(); n],
            operator: vec![0.0; n],
            operator_previous: vec![0.0; n],
            damping: vec![0.0; n],
            source: vec![0.0; n],
            lower: vec![0.0; n],
            diagonal: vec![0.0; n],
            upper: vec![0.0; n],
            rhs: vec![0.0; n],
        })
    }

    pub fn size(&self) -> usize {
        self.coefficients.size()
    }

    pub fn coefficients(&self) -> &WaveSchemeCoefficients {
        &self.coefficients
    }

    /// Writes the level after `current` given the velocity `velocity = u_t` at `from`.
    pub fn first_step(
        &mut self,
        current: &[f64],
        velocity: &[f64],
        next: &mut [f64],
        from: f64,
        to: f64,
    ) -> Result<(), FdError> {
        let c = &self.coefficients;
        let (lower, upper) = c.boundary_conditions(&self.boundaries, from);
        c.fill_weights(from, &mut self.weights);
        apply_line(&self.weights, current, lower, upper, c.h, &mut self.operator);
        c.fill_damping(from, &mut self.damping);
        c.fill_source(from, &mut self.source);
        for i in 0..next.len() {
            // δa·kψ = ½k²aψ
            next[i] = current[i] + c.k * velocity[i]
                + 0.5 * (self.operator[i] + self.source[i])
                - self.damping[i] * c.k * velocity[i];
        }
        let (lower, upper) = c.boundary_conditions(&self.boundaries, to);
        set_dirichlet_ends(next, lower, upper);
        finite(next)
    }

    /// Writes the level after `current` from `previous` and `current`.
    ///
    /// `times` are the times of `previous`, `current` and `next`.
    pub fn step(
        &mut self,
        previous: &[f64],
        current: &[f64],
        next: &mut [f64],
        times: [f64; 3],
    ) -> Result<(), FdError> {
        let [t_prev, t_cur, t_next] = times;
        let c = &self.coefficients;
        let (lower, upper) = c.boundary_conditions(&self.boundaries, t_cur);
        c.fill_weights(t_cur, &mut self.weights);
        apply_line(&self.weights, current, lower, upper, c.h, &mut self.operator);
        c.fill_damping(t_cur, &mut self.damping);
        c.fill_source(t_cur, &mut self.source);

        match self.scheme {
            WaveScheme::Explicit => {
                for i in 0..next.len() {
                    let da = self.damping[i];
                    next[i] = (2.0 * current[i] - (1.0 - da) * previous[i] + self.operator[i] + self.source[i])
                        / (1.0 + da);
                }
                let (lower, upper) = c.boundary_conditions(&self.boundaries, t_next);
                set_dirichlet_ends(next, lower, upper);
            }
            WaveScheme::Implicit => {
                let (lower_prev, upper_prev) = c.boundary_conditions(&self.boundaries, t_prev);
                c.fill_weights(t_prev, &mut self.weights);
                apply_line(&self.weights, previous, lower_prev, upper_prev, c.h, &mut self.operator_previous);
                for i in 0..next.len() {
                    let da = self.damping[i];
                    self.rhs[i] = 2.0 * current[i] + 0.5 * self.operator[i] - (1.0 - da) * previous[i]
                        + 0.25 * self.operator_previous[i]
                        + self.source[i];
                }
                let (lower_next, upper_next) = c.boundary_conditions(&self.boundaries, t_next);
                c.fill_weights(t_next, &mut self.weights);
                // δa stays at the centre level t_cur on both sides.
                for (i, w) in self.weights.iter().enumerate() {
                    self.lower[i] = -0.25 * w.lower;
                    self.diagonal[i] = 1.0 + self.damping[i] + 0.25 * w.center;
                    self.upper[i] = -0.25 * w.upper;
                }
                let solver = self.solver.as_mut().ok_or_else(|| {
                    FdError::InvalidInput("implicit wave scheme needs a tridiagonal solver".to_string())
                })?;
                next.copy_from_slice(current);
                solver.set_diagonals(&self.lower, &self.diagonal, &self.upper)?;
                solver.set_rhs(&self.rhs)?;
                solver.solve(lower_next, upper_next, next)?;
            }
        }
        finite(next)
    }
}

fn set_dirichlet_ends(solution: &mut [f64], lower: BoundaryCondition, upper: BoundaryCondition) {
    let n = solution.len();
    if let Some(g) = lower.dirichlet_value() {
        solution[0] = g;
    }
    if let Some(g) = upper.dirichlet_value() {
        solution[n - 1] = g;
    }
}

fn finite(values: &[f64]) -> Result<(), FdError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(FdError::NumericalError(
            "wave step produced non-finite values".to_string(),
        ))
    }
}
