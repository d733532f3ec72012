use std::sync::Arc;

use crate::core::FdError;
use crate::grid::{DiscretizationConfig3d, GridConfig1d, GridConfig3d};
use crate::pde::{HeatCoefficients3d, HeatDataTransform3d};
use crate::solvers::StencilWeights;

/// Stencil weights of the 3D heat operator split by direction.
///
/// Direction `d` carries diffusion, convection and a third of the reaction
/// term; the mixed derivatives and the source form the explicit part.
#[derive(Debug, Clone)]
pub struct HeatSchemeCoefficients3d {
    transform: Arc<HeatDataTransform3d>,
    grid: GridConfig3d,
    pub k: f64,
    pub steps: [f64; 3],
}

impl HeatSchemeCoefficients3d {
    pub fn new(transform: Arc<HeatDataTransform3d>, config: &DiscretizationConfig3d) -> Result<Self, FdError> {
        let grid = GridConfig3d::new(config.number_of_space_points())?;
        let steps = [grid.axis_1().step(), grid.axis_2().step(), grid.axis_3().step()];
        Ok(Self {
            transform,
            grid,
            k: config.time_step(),
            steps,
        })
    }

    pub fn transform(&self) -> &HeatDataTransform3d {
        &self.transform
    }

    pub fn axis_grid(&self, axis: usize) -> &GridConfig1d {
        match axis {
            0 => self.grid.axis_1(),
            1 => self.grid.axis_2(),
            _ => self.grid.axis_3(),
        }
    }

    pub fn shape(&self) -> [usize; 3] {
        [self.grid.axis_1().size(), self.grid.axis_2().size(), self.grid.axis_3().size()]
    }

    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index of node `(i, j, l)`; axis 1 runs fastest.
    #[inline]
    pub fn index(&self, i: usize, j: usize, l: usize) -> usize {
        let [n1, n2, _] = self.shape();
        i + n1 * (j + n2 * l)
    }

    /// Physical coordinate of node `m` along `axis`.
    pub fn coordinate(&self, axis: usize, m: usize) -> f64 {
        self.transform
            .grid_transform()
            .axis(axis)
            .value_for(self.axis_grid(axis).value_for(m))
    }

    pub fn fill(&self, t: f64, out: &mut [HeatCoefficients3d]) {
        let [n1, n2, n3] = self.shape();
        for l in 0..n3 {
            let xi = self.grid.axis_3().value_for(l);
            for j in 0..n2 {
                let eta = self.grid.axis_2().value_for(j);
                for i in 0..n1 {
                    let zeta = self.grid.axis_1().value_for(i);
                    out[self.index(i, j, l)] = self.transform.coefficients(t, zeta, eta, xi);
                }
            }
        }
    }

    /// Fills `k·S(t)`; returns `false` without a source.
    pub fn fill_source(&self, t: f64, out: &mut [f64]) -> bool {
        if !self.transform.is_source_set() {
            return false;
        }
        let [n1, n2, n3] = self.shape();
        for l in 0..n3 {
            let xi = self.grid.axis_3().value_for(l);
            for j in 0..n2 {
                let eta = self.grid.axis_2().value_for(j);
                for i in 0..n1 {
                    let zeta = self.grid.axis_1().value_for(i);
                    out[self.index(i, j, l)] =
                        self.k * self.transform.source(t, zeta, eta, xi).unwrap_or(0.0);
                }
            }
        }
        true
    }

    #[inline]
    pub fn axis_weights(&self, axis: usize, c: &HeatCoefficients3d) -> StencilWeights {
        let h = self.steps[axis];
        let lambda = self.k / (h * h);
        let gamma = self.k / (2.0 * h);
        StencilWeights::new(
            lambda * c[axis] - gamma * c[6 + axis],
            2.0 * lambda * c[axis] - self.k * c[9] / 3.0,
            lambda * c[axis] + gamma * c[6 + axis],
        )
    }

    /// Weights of the `xy`, `xz` and `yz` four-point stencils.
    #[inline]
    pub fn mixed_weights(&self, c: &HeatCoefficients3d) -> [f64; 3] {
        let [h1, h2, h3] = self.steps;
        [
            self.k * c[3] / (4.0 * h1 * h2),
            self.k * c[4] / (4.0 * h1 * h3),
            self.k * c[5] / (4.0 * h2 * h3),
        ]
    }
}
