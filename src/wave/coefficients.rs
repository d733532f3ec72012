use std::sync::Arc;

use crate::boundary::{to_computational_lower, to_computational_upper, BoundaryCondition, BoundaryPair1d};
use crate::core::FdError;
use crate::grid::{DiscretizationConfig1d, GridConfig1d};
use crate::pde::WaveDataTransform1d;
use crate::solvers::StencilWeights;

/// Stencil weights of the 1D wave operator.
///
/// `λ = k²/h²`, `γ = k²/(2h)`, `ρ = k²`, `δ = k/2`; the spatial part is
/// `k²·L u_i = (λb − γc) u_{i-1} − (2λb − ρd) u_i + (λb + γc) u_{i+1}`.
#[derive(Debug, Clone)]
pub struct WaveSchemeCoefficients {
    transform: Arc<WaveDataTransform1d>,
    grid: GridConfig1d,
    pub k: f64,
    pub h: f64,
    pub lambda: f64,
    pub gamma: f64,
    pub rho: f64,
    pub delta: f64,
}

impl WaveSchemeCoefficients {
    pub fn new(transform: Arc<WaveDataTransform1d>, config: &DiscretizationConfig1d) -> Result<Self, FdError> {
        let grid = GridConfig1d::new(config.number_of_space_points())?;
        let k = config.time_step();
        let h = grid.step();
        Ok(Self {
            transform,
            grid,
            k,
            h,
            lambda: k * k / (h * h),
            gamma: k * k / (2.0 * h),
            rho: k * k,
            delta: 0.5 * k,
        })
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn grid(&self) -> &GridConfig1d {
        &self.grid
    }

    pub fn transform(&self) -> &WaveDataTransform1d {
        &self.transform
    }

    pub fn weights(&self, t: f64, idx: usize) -> StencilWeights {
        let zeta = self.grid.value_for(idx);
        let b = self.transform.b_coefficient(t, zeta);
        let c = self.transform.c_coefficient(t, zeta);
        let d = self.transform.d_coefficient(t, zeta);
        StencilWeights {
            lower: self.lambda * b - self.gamma * c,
            center: 2.0 * self.lambda * b - self.rho * d,
            upper: self.lambda * b + self.gamma * c,
        }
    }

    pub fn fill_weights(&self, t: f64, out: &mut [StencilWeights]) {
        for (i, w) in out.iter_mut().enumerate() {
            *w = self.weights(t, i);
        }
    }

    /// Fills `δ·a(t, ζ_i)`.
    pub fn fill_damping(&self, t: f64, out: &mut [f64]) {
        for (i, v) in out.iter_mut().enumerate() {
            *v = self.delta * self.transform.a_coefficient(t, self.grid.value_for(i));
        }
    }

    /// Fills `k²·S(t, ζ_i)`, or zeros without a source.
    pub fn fill_source(&self, t: f64, out: &mut [f64]) {
        for (i, v) in out.iter_mut().enumerate() {
            *v = self.rho * self.transform.source(t, self.grid.value_for(i)).unwrap_or(0.0);
        }
    }

    /// `max_i k·sqrt(b)/h`; the explicit scheme needs this at most 1.
    pub fn courant_number(&self, t: f64) -> f64 {
        (0..self.size())
            .map(|i| (self.lambda * self.transform.b_coefficient(t, self.grid.value_for(i))).max(0.0).sqrt())
            .fold(0.0, f64::max)
    }

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
