//! Rewrites physical boundary conditions into computational coordinates.
//!
//! With `x = x(ζ)` the chain rule gives `∂u/∂ζ = x'(ζ)·∂u/∂x`, so a physical
//! condition `u_x + β·u = g` becomes `u_ζ + x'·β·u = x'·g`. Dirichlet values
//! are unchanged.

use crate::grid::AxisTransform;

use super::BoundaryCondition;

/// Scales a derivative-type condition by the transform slope `first_derivative`.
#[inline]
pub fn to_computational(condition: BoundaryCondition, first_derivative: f64) -> BoundaryCondition {
    match condition {
        BoundaryCondition::Dirichlet(g) => BoundaryCondition::Dirichlet(g),
        BoundaryCondition::Neumann(g) => BoundaryCondition::Neumann(first_derivative * g),
        BoundaryCondition::Robin { linear, value } => BoundaryCondition::Robin {
            linear: first_derivative * linear,
            value: first_derivative * value,
        },
    }
}

/// Condition at `ζ = 0` of `axis`.
#[inline]
pub fn to_computational_lower(condition: BoundaryCondition, axis: &AxisTransform) -> BoundaryCondition {
    to_computational(condition, axis.first_derivative(0.0))
}

/// Condition at `ζ = 1` of `axis`.
#[inline]
pub fn to_computational_upper(condition: BoundaryCondition, axis: &AxisTransform) -> BoundaryCondition {
    to_computational(condition, axis.first_derivative(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Range;

    #[test]
    fn dirichlet_is_left_untouched() {
        assert_eq!(
            to_computational(BoundaryCondition::Dirichlet(4.0), 7.0),
            BoundaryCondition::Dirichlet(4.0)
        );
    }

    #[test]
    fn derivative_conditions_scale_with_the_slope() {
        let range = Range::new(0.0, 2.0).expect("range");
        let axis = AxisTransform::one_sided(&range, 0.5).expect("axis");
        let slope = axis.first_derivative(1.0);
        assert_eq!(
            to_computational_upper(BoundaryCondition::Neumann(1.5), &axis),
            BoundaryCondition::Neumann(1.5 * slope)
        );
        assert_eq!(
            to_computational_lower(BoundaryCondition::Robin { linear: 2.0, value: 3.0 }, &axis),
            BoundaryCondition::Robin {
                linear: 2.0 * axis.first_derivative(0.0),
                value: 3.0 * axis.first_derivative(0.0),
            }
        );
    }
}
