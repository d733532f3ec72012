use crate::boundary::{BoundaryCondition, BoundaryPair1d};
use crate::core::FdError;
use crate::pde::ExplicitScheme;
use crate::solvers::{apply_line, lower_ghost, upper_ghost, StencilWeights};

use super::coefficients::HeatSchemeCoefficients;
use super::time_loop::HeatMethod;

/// Explicit heat step: forward Euler or Saulyev-type alternating sweeps.
///
/// Dirichlet nodes are set straight from the boundary; derivative-type ends
/// are stepped with the ghost-node stencil.
pub struct ExplicitHeatMethod {
    coefficients: HeatSchemeCoefficients,
    boundaries: BoundaryPair1d,
    scheme: ExplicitScheme,
    steps_taken: usize,
    weights: Vec<StencilWeights>,
    operator: Vec<f64>,
    source: Vec<f64>,
    previous: Vec<f64>,
    sweep: Vec<f64>,
}

impl ExplicitHeatMethod {
    pub fn new(
        coefficients: HeatSchemeCoefficients,
        boundaries: BoundaryPair1d,
        scheme: ExplicitScheme,
    ) -> Self {
        let n = coefficients.size();
        Self {
            coefficients,
            boundaries,
            scheme,
            steps_taken: 0,
            weights: vec![StencilWeights::default(); n],
            operator: vec![0.0; n],
            source: vec![0.0; n],
            previous: vec![0.0; n],
            sweep: vec![0.0; n],
        }
    }

    fn euler(&mut self, solution: &mut [f64], from: f64, to: f64) {
        let c = &self.coefficients;
        let (lower, upper) = c.boundary_conditions(&self.boundaries, from);
        c.fill_weights(from, &mut self.weights);
        apply_line(&self.weights, solution, lower, upper, c.h, &mut self.operator);
        if !c.fill_source(from, &mut self.source) {
            self.source.fill(0.0);
        }
        for ((u, op), src) in solution.iter_mut().zip(&self.operator).zip(&self.source) {
            *u += op + src;
        }
        let (lower, upper) = c.boundary_conditions(&self.boundaries, to);
        set_dirichlet_ends(solution, lower, upper);
    }
}

impl ExplicitHeatMethod {
    /// Saulyev alternates sweep direction every step; Barakat-Clark averages both.
    fn sweeps(&mut self, solution: &mut [f64], to: f64) {
        let c = &self.coefficients;
        let (lower, upper) = c.boundary_conditions(&self.boundaries, to);
        c.fill_weights(to, &mut self.weights);
        if !c.fill_source(to, &mut self.source) {
            self.source.fill(0.0);
        }
        self.previous.copy_from_slice(solution);
        let (old, w, src, h) = (&self.previous, &self.weights, &self.source, c.h);

        if self.scheme == ExplicitScheme::BarakatClark {
            sweep_up(old, w, src, lower, upper, h, &mut self.sweep);
            sweep_down(old, w, src, lower, upper, h, solution);
            for (u, v) in solution.iter_mut().zip(&self.sweep) {
                *u = 0.5 * (*u + v);
            }
        } else if self.steps_taken % 2 == 0 {
            sweep_up(old, w, src, lower, upper, h, solution);
        } else {
            sweep_down(old, w, src, lower, upper, h, solution);
        }
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

/// Left-to-right sweep: `u'_{i-1}` is already new, `u_{i+1}` still old.
fn sweep_up(
    old: &[f64],
    w: &[StencilWeights],
    source: &[f64],
    lower: BoundaryCondition,
    upper: BoundaryCondition,
    h: f64,
    out: &mut [f64],
) {
    let n = old.len();
    // β·u_0 in the ghost node is taken at the new level.
    let first = |beta: f64, g: f64| {
        let w0 = &w[0];
        let rhs = w0.lower * (old[1] - 2.0 * h * g)
            + (1.0 - 0.5 * w0.center) * old[0]
            + w0.upper * old[1]
            + source[0];
        rhs / (1.0 + 0.5 * w0.center - 2.0 * h * beta * w0.lower)
    };
    out[0] = match lower {
        BoundaryCondition::Dirichlet(g) => g,
        BoundaryCondition::Neumann(g) => first(0.0, g),
        BoundaryCondition::Robin { linear, value } => first(linear, value),
    };
    for i in 1..n - 1 {
        out[i] = (w[i].lower * out[i - 1]
            + (1.0 - 0.5 * w[i].center) * old[i]
            + w[i].upper * old[i + 1]
            + source[i])
            / (1.0 + 0.5 * w[i].center);
    }
    let last = n - 1;
    let previous = out[last - 1];
    let closing = |beta: f64, g: f64| {
        let ghost = upper_ghost(beta, g, old[last - 1], old[last], h);
        (w[last].lower * previous
            + (1.0 - 0.5 * w[last].center) * old[last]
            + w[last].upper * ghost
            + source[last])
            / (1.0 + 0.5 * w[last].center)
    };
    out[last] = match upper {
        BoundaryCondition::Dirichlet(g) => g,
        BoundaryCondition::Neumann(g) => closing(0.0, g),
        BoundaryCondition::Robin { linear, value } => closing(linear, value),
    };
}

/// Right-to-left sweep: `u'_{i+1}` is already new, `u_{i-1}` still old.
fn sweep_down(
    old: &[f64],
    w: &[StencilWeights],
    source: &[f64],
    lower: BoundaryCondition,
    upper: BoundaryCondition,
    h: f64,
    out: &mut [f64],
) {
    let n = old.len();
    let last = n - 1;
    let first = |beta: f64, g: f64| {
        let wl = &w[last];
        let rhs = wl.upper * (old[last - 1] + 2.0 * h * g)
            + (1.0 - 0.5 * wl.center) * old[last]
            + wl.lower * old[last - 1]
            + source[last];
        rhs / (1.0 + 0.5 * wl.center + 2.0 * h * beta * wl.upper)
    };
    out[last] = match upper {
        BoundaryCondition::Dirichlet(g) => g,
        BoundaryCondition::Neumann(g) => first(0.0, g),
        BoundaryCondition::Robin { linear, value } => first(linear, value),
    };
    for i in (1..last).rev() {
        out[i] = (w[i].upper * out[i + 1]
            + (1.0 - 0.5 * w[i].center) * old[i]
            + w[i].lower * old[i - 1]
            + source[i])
            / (1.0 + 0.5 * w[i].center);
    }
    let next = out[1];
    let closing = |beta: f64, g: f64| {
        let ghost = lower_ghost(beta, g, old[0], old[1], h);
        (w[0].upper * next + (1.0 - 0.5 * w[0].center) * old[0] + w[0].lower * ghost + source[0])
            / (1.0 + 0.5 * w[0].center)
    };
    out[0] = match lower {
        BoundaryCondition::Dirichlet(g) => g,
        BoundaryCondition::Neumann(g) => closing(0.0, g),
        BoundaryCondition::Robin { linear, value } => closing(linear, value),
    };
}

impl HeatMethod for ExplicitHeatMethod {
    fn size(&self) -> usize {
        self.coefficients.size()
    }

    fn step(&mut self, solution: &mut [f64], from: f64, to: f64) -> Result<(), FdError> {
        match self.scheme {
            ExplicitScheme::Euler => self.euler(solution, from, to),
            ExplicitScheme::Saulyev | ExplicitScheme::BarakatClark => self.sweeps(solution, to),
        }
        self.steps_taken += 1;
        if !solution.iter().all(|v| v.is_finite()) {
            return Err(FdError::NumericalError(format!(
                "explicit heat step {} produced non-finite values",
                self.steps_taken
            )));
        }
        Ok(())
    }
}
