use serde::{Deserialize, Serialize};

use super::FdError;

/// Singular-pivot threshold used by direct tridiagonal solves.
pub const SINGULAR_PIVOT: f64 = 1.0e-14;

/// Archimedes' constant.
pub const PI: f64 = std::f64::consts::PI;

/// Closed interval `[lower, upper]` of real coordinates.
///
/// Deserialization goes through [`Range::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RangeFields")]
pub struct Range {
    lower: f64,
    upper: f64,
}

#[derive(Deserialize)]
struct RangeFields {
    lower: f64,
    upper: f64,
}

impl TryFrom<RangeFields> for Range {
    type Error = FdError;

    fn try_from(fields: RangeFields) -> Result<Self, Self::Error> {
        Self::new(fields.lower, fields.upper)
    }
}

impl Range {
    /// Builds a range, rejecting non-finite or inverted bounds.
    pub fn new(lower: f64, upper: f64) -> Result<Self, FdError> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(FdError::InvalidInput(
                "range bounds must be finite".to_string(),
            ));
        }
        if upper <= lower {
            return Err(FdError::InvalidInput(format!(
                "range upper bound {upper} must exceed lower bound {lower}"
            )));
        }
        Ok(Self { lower, upper })
    }

    /// Lower bound.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Width `upper - lower`.
    #[inline]
    pub fn spread(&self) -> f64 {
        self.upper - self.lower
    }

    /// Midpoint of the interval.
    #[inline]
    pub fn mid_point(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    /// Returns `true` when `x` lies in the closed interval.
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.lower && x <= self.upper
    }
}

/// Direction in which a time loop walks the time grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TraverseDirection {
    /// Initial condition at the lower time bound, marching up.
    #[default]
    Forward,
    /// Terminal condition at the upper time bound, marching down.
    Backward,
}

impl TraverseDirection {
    /// Time index holding the initial (or terminal) condition.
    pub fn initial_index(self, number_of_time_points: usize) -> usize {
        match self {
            Self::Forward => 0,
            Self::Backward => number_of_time_points.saturating_sub(1),
        }
    }

    /// `(from, to)` time-index pairs in marching order.
    pub fn steps(self, number_of_time_points: usize) -> Vec<(usize, usize)> {
        let n = number_of_time_points;
        match self {
            Self::Forward => (1..n).map(|i| (i - 1, i)).collect(),
            Self::Backward => (1..n).rev().map(|i| (i, i - 1)).collect(),
        }
    }
}

/// Spacing of the physical grid produced by the sinh transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridKind {
    /// Stretching scale equals the range width; no concentration.
    #[default]
    Uniform,
    /// Points concentrate around the accumulation point.
    Nonuniform,
}
