//! Boundary set of a 2D heat problem.

use crate::boundary::{
    to_computational_lower, to_computational_upper, Boundary, Boundary2d, BoundaryCondition, BoundaryPair2d,
};
use crate::core::FdError;
use crate::grid::GridTransform2d;

/// Boundaries of both axes.
///
/// Axis-1 providers take `(t, y)`, axis-2 providers take `(t, x)`. A missing
/// lower axis-2 boundary marks a degenerate edge where the equation itself is
/// stepped (the zero-variance edge of a stochastic-volatility problem).
#[derive(Debug, Clone)]
pub struct HeatBoundaries2d {
    pub axis_1: BoundaryPair2d,
    pub axis_2_lower: Option<Boundary2d>,
    pub axis_2_upper: Boundary2d,
}

impl HeatBoundaries2d {
    pub fn new(axis_1: BoundaryPair2d, axis_2: BoundaryPair2d) -> Self {
        Self {
            axis_1,
            axis_2_lower: Some(axis_2.lower),
            axis_2_upper: axis_2.upper,
        }
    }

    /// Boundaries with a degenerate lower axis-2 edge.
    pub fn with_degenerate_lower(axis_1: BoundaryPair2d, axis_2_upper: Boundary2d) -> Self {
        Self {
            axis_1,
            axis_2_lower: None,
            axis_2_upper,
        }
    }

    pub fn is_lower_degenerate(&self) -> bool {
        self.axis_2_lower.is_none()
    }

    /// Computational conditions at both ends of the axis-1 line through `eta`.
    pub fn axis_1_conditions(
        &self,
        transform: &GridTransform2d,
        t: f64,
        eta: f64,
    ) -> (BoundaryCondition, BoundaryCondition) {
        let y = transform.axis_2().value_for(eta);
        let axis = transform.axis_1();
        (
            to_computational_lower(self.axis_1.lower.condition_at(t, y), axis),
            to_computational_upper(self.axis_1.upper.condition_at(t, y), axis),
        )
    }

    /// Computational conditions at both ends of the axis-2 line through `zeta`.
    ///
    /// A degenerate lower edge resolves to `None`.
    pub fn axis_2_conditions(
        &self,
        transform: &GridTransform2d,
        t: f64,
        zeta: f64,
    ) -> (Option<BoundaryCondition>, BoundaryCondition) {
        let x = transform.axis_1().value_for(zeta);
        let axis = transform.axis_2();
        (
            self.axis_2_lower
                .as_ref()
                .map(|b| to_computational_lower(b.condition_at(t, x), axis)),
            to_computational_upper(self.axis_2_upper.condition_at(t, x), axis),
        )
    }
}

/// Heston-type boundary layout.
///
/// Dirichlet at the lower and Neumann at the upper end of axis 1 (spot),
/// Dirichlet at the upper end of axis 2 (variance) and a degenerate lower
/// axis-2 edge. The Neumann slope is rescaled by `x'(1)` when resolved.
#[derive(Debug, Clone)]
pub struct HestonBoundaryTransform {
    boundaries: HeatBoundaries2d,
}

impl HestonBoundaryTransform {
    pub fn new(axis_2_upper: Boundary2d, axis_1: BoundaryPair2d) -> Result<Self, FdError> {
        if !axis_2_upper.is_dirichlet() {
            return Err(FdError::UnsupportedBoundary(format!(
                "Heston upper variance boundary must be Dirichlet, got {axis_2_upper:?}"
            )));
        }
        if !axis_1.lower.is_dirichlet() {
            return Err(FdError::UnsupportedBoundary(format!(
                "Heston lower spot boundary must be Dirichlet, got {:?}",
                axis_1.lower
            )));
        }
        if !matches!(axis_1.upper, Boundary::Neumann(_)) {
            return Err(FdError::UnsupportedBoundary(format!(
                "Heston upper spot boundary must be Neumann, got {:?}",
                axis_1.upper
            )));
        }
        Ok(Self {
            boundaries: HeatBoundaries2d::with_degenerate_lower(axis_1, axis_2_upper),
        })
    }

    pub fn boundaries(&self) -> &HeatBoundaries2d {
        &self.boundaries
    }

    pub fn into_boundaries(self) -> HeatBoundaries2d {
        self.boundaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Range;
    use crate::grid::{DiscretizationConfig2d, GridHints2d};
    use approx::assert_relative_eq;

    fn transform() -> GridTransform2d {
        let config = DiscretizationConfig2d::new(
            (Range::new(0.0, 200.0).expect("x"), Range::new(0.0, 1.0).expect("v")),
            (21, 11),
            Range::new(0.0, 1.0).expect("t"),
            11,
        )
        .expect("config");
        GridTransform2d::new(&config, &GridHints2d::uniform(&Range::new(0.0, 200.0).expect("x")))
            .expect("transform")
    }

    #[test]
    fn heston_neumann_slope_is_rescaled() {
        let heston = HestonBoundaryTransform::new(
            Boundary2d::dirichlet(|_, s| s),
            BoundaryPair2d::new(Boundary2d::dirichlet(|_, _| 0.0), Boundary2d::neumann(|_, _| 1.0)),
        )
        .expect("heston");
        let t = transform();
        let (lower, upper) = heston.boundaries().axis_1_conditions(&t, 0.0, 0.5);
        assert_eq!(lower, BoundaryCondition::Dirichlet(0.0));
        assert_eq!(upper, BoundaryCondition::Neumann(t.a_derivative(1.0)));
        let (degenerate, top) = heston.boundaries().axis_2_conditions(&t, 0.0, 1.0);
        assert!(degenerate.is_none());
        match top {
            BoundaryCondition::Dirichlet(g) => assert_relative_eq!(g, 200.0, epsilon = 1e-9),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn heston_rejects_other_layouts() {
        let err = HestonBoundaryTransform::new(
            Boundary2d::neumann(|_, _| 0.0),
            BoundaryPair2d::new(Boundary2d::dirichlet(|_, _| 0.0), Boundary2d::neumann(|_, _| 1.0)),
        )
        .unwrap_err();
        assert!(matches!(err, FdError::UnsupportedBoundary(_)));
        let err = HestonBoundaryTransform::new(
            Boundary2d::dirichlet(|_, _| 0.0),
            BoundaryPair2d::new(Boundary2d::dirichlet(|_, _| 0.0), Boundary2d::dirichlet(|_, _| 1.0)),
        )
        .unwrap_err();
        assert!(matches!(err, FdError::UnsupportedBoundary(_)));
    }
}
