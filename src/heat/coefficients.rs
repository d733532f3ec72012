use std::sync::Arc;

use crate::boundary::{to_computational_lower, to_computational_upper, BoundaryCondition, BoundaryPair1d};
use crate::core::FdError;
use crate::grid::{DiscretizationConfig1d, GridConfig1d};
use crate::pde::HeatDataTransform1d;
use crate::solvers::StencilWeights;

/// Stencil weights of the 1D heat operator on the computational grid.
///
/// With `λ = k/h²` and `γ = k/(2h)` the weights at `(t, ζ_i)` are
/// `lower = λa − γb`, `upper = λa + γb` and `center = 2λa − k c`, so that
/// `k·L u_i = lower·u_{i-1} − center·u_i + upper·u_{i+1}`.
#[derive(Debug, Clone)]
pub struct HeatSchemeCoefficients {
    transform: Arc<HeatDataTransform1d>,
    grid: GridConfig1d,
    /// Time step.
    pub k: f64,
    /// Computational space step `1/(N-1)`.
    pub h: f64,
    pub lambda: f64,
    pub gamma: f64,
    /// Implicitness of the scheme (0 explicit, 0.5 Crank-Nicolson, 1 implicit).
    pub theta: f64,
}

impl HeatSchemeCoefficients {
    pub fn new(
        transform: Arc<HeatDataTransform1d>,
        config: &DiscretizationConfig1d,
        theta: f64,
    ) -> Result<Self, FdError> {
        let grid = GridConfig1d::new(config.number_of_space_points())?;
        let k = config.time_step();
        let h = grid.step();
        Ok(Self {
            transform,
            grid,
            k,
            h,
            lambda: k / (h * h),
            gamma: k / (2.0 * h),
            theta,
        })
    }

    pub fn grid(&self) -> &GridConfig1d {
        &self.grid
    }

    pub fn transform(&self) -> &HeatDataTransform1d {
        &self.transform
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    #[inline]
    pub fn weights(&self, t: f64, idx: usize) -> StencilWeights {
        let zeta = self.grid.value_for(idx);
        let a = self.transform.a_coefficient(t, zeta);
        let b = self.transform.b_coefficient(t, zeta);
        let c = self.transform.c_coefficient(t, zeta);
        StencilWeights {
            lower: self.lambda * a - self.gamma * b,
            center: 2.0 * self.lambda * a - self.k * c,
            upper: self.lambda * a + self.gamma * b,
        }
    }

    pub fn fill_weights(&self, t: f64, out: &mut [StencilWeights]) {
        for (i, w) in out.iter_mut().enumerate() {
            *w = self.weights(t, i);
        }
    }

    /// Fills `k·S(t, ζ_i)`; returns `false` and leaves `out` alone when no source is set.
    pub fn fill_source(&self, t: f64, out: &mut [f64]) -> bool {
        if !self.transform.is_source_set() {
            return false;
        }
        for (i, v) in out.iter_mut().enumerate() {
            let s = self.transform.source(t, self.grid.value_for(i)).unwrap_or(0.0);
            *v = self.k * s;
        }
        true
    }

    /// `max_i λ·a(t, ζ_i)`; forward Euler needs this below 0.5.
    pub fn stability_ratio(&self, t: f64) -> f64 {
        (0..self.size())
            .map(|i| self.lambda * self.transform.a_coefficient(t, self.grid.value_for(i)))
            .fold(0.0, f64::max)
    }

    /// Both end conditions at `t` in computational coordinates.
    pub fn boundary_conditions(
        &self,
        boundaries: &BoundaryPair1d,
        t: f64,
    ) -> (BoundaryCondition, BoundaryCondition) {
        let axis = self.transform.grid_transform().axis();
        (
            to_computational_lower(boundaries.lower.condition_at(t), axis),
            to_computational_upper(boundaries.upper.condition_at(t), axis),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GridKind, Range};
    use crate::grid::{GridHints1d, GridTransform1d};
    use crate::pde::HeatData1d;
    use approx::assert_relative_eq;

    #[test]
    fn weights_sum_to_reaction_term() {
        let cfg = DiscretizationConfig1d::new(
            Range::new(0.0, 1.0).expect("space"),
            11,
            Range::new(0.0, 0.1).expect("time"),
            11,
        )
        .expect("config");
        let grid = GridTransform1d::new(&cfg, &GridHints1d::new(0.5, 3.0, GridKind::Uniform)).expect("grid");
        let data = HeatData1d::builder()
            .a_coefficient(|_, _| 0.7)
            .b_coefficient(|_, x| x)
            .c_coefficient(|_, _| -0.3)
            .initial_condition(|_| 0.0)
            .build()
            .expect("data");
        let coeffs = HeatSchemeCoefficients::new(Arc::new(HeatDataTransform1d::new(data, grid)), &cfg, 0.5)
            .expect("coefficients");
        assert_relative_eq!(coeffs.lambda, 0.01 / 0.01, epsilon = 1.0e-12);
        // k·L applied to a constant is k·c·u.
        let w = coeffs.weights(0.0, 4);
        assert_relative_eq!(w.apply(1.0, 1.0, 1.0), coeffs.k * -0.3, epsilon = 1.0e-14);
        assert!(coeffs.stability_ratio(0.0) > 0.0);
    }
}
