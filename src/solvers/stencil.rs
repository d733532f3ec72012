//! Three-point stencils with ghost-node boundary closure.

use crate::boundary::BoundaryCondition;

/// Weights of `k·L u_i = lower·u_{i-1} − center·u_i + upper·u_{i+1}`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StencilWeights {
    pub lower: f64,
    pub center: f64,
    pub upper: f64,
}

impl StencilWeights {
    pub fn new(lower: f64, center: f64, upper: f64) -> Self {
        Self {
            lower,
            center,
            upper,
        }
    }

    #[inline]
    pub fn apply(&self, prev: f64, current: f64, next: f64) -> f64 {
        self.lower.mul_add(prev, self.upper * next) - self.center * current
    }
}

/// Ghost value `u_{-1}` from `u_0' + β u_0 = g`.
#[inline]
pub fn lower_ghost(beta: f64, g: f64, u0: f64, u1: f64, h: f64) -> f64 {
    u1 - 2.0 * h * (g - beta * u0)
}

/// Ghost value `u_N` from `u_{N-1}' + β u_{N-1} = g`.
#[inline]
pub fn upper_ghost(beta: f64, g: f64, u_second_last: f64, u_last: f64, h: f64) -> f64 {
    u_second_last + 2.0 * h * (g - beta * u_last)
}

/// Writes `k·L u` along a line into `out`.
///
/// Derivative-type ends use the ghost node; Dirichlet ends are set to zero
/// since their value is prescribed rather than stepped.
pub fn apply_line(
    weights: &[StencilWeights],
    values: &[f64],
    lower: BoundaryCondition,
    upper: BoundaryCondition,
    h: f64,
    out: &mut [f64],
) {
    let n = values.len();
    debug_assert!(n >= 3 && weights.len() == n && out.len() == n);
    for i in 1..n - 1 {
        out[i] = weights[i].apply(values[i - 1], values[i], values[i + 1]);
    }
    let first = |beta: f64, g: f64| {
        let ghost = lower_ghost(beta, g, values[0], values[1], h);
        weights[0].apply(ghost, values[0], values[1])
    };
    out[0] = match lower {
        BoundaryCondition::Dirichlet(_) => 0.0,
        BoundaryCondition::Neumann(g) => first(0.0, g),
        BoundaryCondition::Robin { linear, value } => first(linear, value),
    };
    let last = |beta: f64, g: f64| {
        let ghost = upper_ghost(beta, g, values[n - 2], values[n - 1], h);
        weights[n - 1].apply(values[n - 2], values[n - 1], ghost)
    };
    out[n - 1] = match upper {
        BoundaryCondition::Dirichlet(_) => 0.0,
        BoundaryCondition::Neumann(g) => last(0.0, g),
        BoundaryCondition::Robin { linear, value } => last(linear, value),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ghost_nodes_reproduce_linear_profiles() {
        // u = 2 + 3x has u' = 3 everywhere.
        let h = 0.1;
        let u: Vec<f64> = (0..5).map(|i| 2.0 + 3.0 * h * i as f64).collect();
        let lo = lower_ghost(0.0, 3.0, u[0], u[1], h);
        let hi = upper_ghost(0.0, 3.0, u[3], u[4], h);
        assert_relative_eq!(lo, 2.0 - 3.0 * h, epsilon = 1.0e-14);
        assert_relative_eq!(hi, 2.0 + 3.0 * 5.0 * h, epsilon = 1.0e-14);
    }

    #[test]
    fn robin_ghost_uses_the_linear_term() {
        // u = e^x satisfies u' - u = 0.
        let h: f64 = 0.01;
        let u0 = 1.0_f64;
        let u1 = h.exp();
        let ghost = lower_ghost(-1.0, 0.0, u0, u1, h);
        assert_relative_eq!(ghost, (-h).exp(), epsilon = 1.0e-5);
    }

    #[test]
    fn apply_line_closes_robin_ends_with_the_ghost_node() {
        // u = e^x satisfies u' - u = 0 at both ends.
        let h = 0.01;
        let u: Vec<f64> = (0..4).map(|i| (h * i as f64).exp()).collect();
        let w = vec![StencilWeights::new(1.0, 2.0, 1.0); 4];
        let robin = BoundaryCondition::Robin { linear: -1.0, value: 0.0 };
        let mut out = [f64::NAN; 4];
        apply_line(&w, &u, robin, robin, h, &mut out);
        // Second differences of e^x are h²·e^x to leading order.
        assert_relative_eq!(out[0], h * h * u[0], max_relative = 1.0e-2);
        assert_relative_eq!(out[3], h * h * u[3], max_relative = 1.0e-2);
    }

    #[test]
    fn apply_line_zeroes_dirichlet_ends() {
        let w = vec![StencilWeights::new(1.0, 2.0, 1.0); 4];
        let u = [1.0, 4.0, 9.0, 16.0];
        let mut out = [f64::NAN; 4];
        apply_line(
            &w,
            &u,
            BoundaryCondition::Dirichlet(1.0),
            BoundaryCondition::Neumann(0.0),
            0.5,
            &mut out,
        );
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 2.0);
        assert_eq!(out[2], 2.0);
        assert_eq!(out[3], 9.0 - 32.0 + 9.0);
    }
}
