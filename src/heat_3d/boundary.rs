use crate::boundary::{to_computational_lower, to_computational_upper, BoundaryCondition, BoundaryPair3d};
use crate::grid::GridTransform3d;

/// One boundary pair per axis.
///
/// Providers take `(t, s1, s2)` with `s1, s2` the physical coordinates of
/// the two other axes in axis order.
#[derive(Debug, Clone)]
pub struct HeatBoundaries3d {
    pub axes: [BoundaryPair3d; 3],
}

impl HeatBoundaries3d {
    pub fn new(axis_1: BoundaryPair3d, axis_2: BoundaryPair3d, axis_3: BoundaryPair3d) -> Self {
        Self {
            axes: [axis_1, axis_2, axis_3],
        }
    }

    /// Computational conditions at both ends of a line along `axis`.
    pub fn conditions(
        &self,
        transform: &GridTransform3d,
        axis: usize,
        t: f64,
        s1: f64,
        s2: f64,
    ) -> (BoundaryCondition, BoundaryCondition) {
        let pair = &self.axes[axis];
        let map = transform.axis(axis);
        (
            to_computational_lower(pair.lower.condition_at(t, s1, s2), map),
            to_computational_upper(pair.upper.condition_at(t, s1, s2), map),
        )
    }
}
