use std::sync::Arc;

use nalgebra::DMatrix;

use crate::core::FdError;
use crate::grid::{DiscretizationConfig2d, GridConfig2d};
use crate::pde::{HeatCoefficients2d, HeatDataTransform2d};
use crate::solvers::StencilWeights;

/// Per-direction stencil weights of the 2D heat operator.
///
/// The operator is split as `F = F0 + F1 + F2` with `F0` the mixed term plus
/// source, `F1 = a u_ζζ + d u_ζ + ½f u` and `F2 = b u_ηη + e u_η + ½f u`. All
/// weights carry the factor `k`.
#[derive(Debug, Clone)]
pub struct HeatSchemeCoefficients2d {
    transform: Arc<HeatDataTransform2d>,
    grid: GridConfig2d,
    pub k: f64,
    pub h_1: f64,
    pub h_2: f64,
}

impl HeatSchemeCoefficients2d {
    pub fn new(transform: Arc<HeatDataTransform2d>, config: &DiscretizationConfig2d) -> Result<Self, FdError> {
        let grid = GridConfig2d::new(config.number_of_space_points())?;
        Ok(Self {
            transform,
            k: config.time_step(),
            h_1: grid.axis_1().step(),
            h_2: grid.axis_2().step(),
            grid,
        })
    }

    pub fn grid(&self) -> &GridConfig2d {
        &self.grid
    }

    pub fn transform(&self) -> &HeatDataTransform2d {
        &self.transform
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.grid.axis_1().size(), self.grid.axis_2().size())
    }

    /// Coefficients at every node, `out[i + j·n1]`.
    pub fn fill(&self, t: f64, out: &mut [HeatCoefficients2d]) {
        let (n1, _) = self.shape();
        for (idx, c) in out.iter_mut().enumerate() {
            let zeta = self.grid.axis_1().value_for(idx % n1);
            let eta = self.grid.axis_2().value_for(idx / n1);
            *c = self.transform.coefficients(t, zeta, eta);
        }
    }

    /// Fills `k·S(t)`; returns `false` without a source.
    pub fn fill_source(&self, t: f64, out: &mut DMatrix<f64>) -> bool {
        if !self.transform.is_source_set() {
            return false;
        }
        let (n1, n2) = self.shape();
        for j in 0..n2 {
            let eta = self.grid.axis_2().value_for(j);
            for i in 0..n1 {
                let zeta = self.grid.axis_1().value_for(i);
                out[(i, j)] = self.k * self.transform.source(t, zeta, eta).unwrap_or(0.0);
            }
        }
        true
    }

    #[inline]
    pub fn axis_1_weights(&self, c: &HeatCoefficients2d, reaction_share: f64) -> StencilWeights {
        let lambda = self.k / (self.h_1 * self.h_1);
        let gamma = self.k / (2.0 * self.h_1);
        StencilWeights::new(
            lambda * c.a - gamma * c.d,
            2.0 * lambda * c.a - reaction_share * self.k * c.f,
            lambda * c.a + gamma * c.d,
        )
    }

    #[inline]
    pub fn axis_2_weights(&self, c: &HeatCoefficients2d) -> StencilWeights {
        let lambda = self.k / (self.h_2 * self.h_2);
        let gamma = self.k / (2.0 * self.h_2);
        StencilWeights::new(
            lambda * c.b - gamma * c.e,
            2.0 * lambda * c.b - 0.5 * self.k * c.f,
            lambda * c.b + gamma * c.e,
        )
    }

    /// Weight of the four-point mixed-derivative stencil.
    #[inline]
    pub fn mixed_weight(&self, c: &HeatCoefficients2d) -> f64 {
        self.k * c.c / (4.0 * self.h_1 * self.h_2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Range;
    use crate::grid::{GridHints2d, GridTransform2d};
    use crate::pde::HeatData2d;
    use approx::assert_relative_eq;

    #[test]
    fn directional_weights_split_the_reaction_term() {
        let x = Range::new(0.0, 1.0).expect("x");
        let config = DiscretizationConfig2d::new((x, x), (11, 11), Range::new(0.0, 1.0).expect("t"), 11)
            .expect("config");
        let data = HeatData2d::builder()
            .a_coefficient(|_, _, _| 1.0)
            .b_coefficient(|_, _, _| 1.0)
            .f_coefficient(|_, _, _| -2.0)
            .initial_condition(|_, _| 0.0)
            .build()
            .expect("data");
        let grid = GridTransform2d::new(&config, &GridHints2d::uniform(&x)).expect("grid");
        let scheme = HeatSchemeCoefficients2d::new(Arc::new(HeatDataTransform2d::new(data, grid)), &config)
            .expect("scheme");
        let c = scheme.transform().coefficients(0.0, 0.3, 0.6);
        let w1 = scheme.axis_1_weights(&c, 0.5);
        let w2 = scheme.axis_2_weights(&c);
        // A constant state sees only the reaction term k·f.
        let total = (w1.lower + w1.upper - w1.center) + (w2.lower + w2.upper - w2.center);
        assert_relative_eq!(total, scheme.k * -2.0, epsilon = 1e-12);
    }
}
