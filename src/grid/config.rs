//! Discretization sizes, computational grids and transform hints.

use serde::{Deserialize, Serialize};

use crate::core::{FdError, GridKind, Range};

fn check_points(what: &str, n: usize, min: usize) -> Result<(), FdError> {
    if n < min {
        return Err(FdError::InvalidInput(format!(
            "{what} must be >= {min}, got {n}"
        )));
    }
    Ok(())
}

/// Space range and point counts for a 1D problem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DiscretizationFields1d")]
pub struct DiscretizationConfig1d {
    space_range: Range,
    number_of_space_points: usize,
    time_range: Range,
    number_of_time_points: usize,
}

#[derive(Deserialize)]
struct DiscretizationFields1d {
    space_range: Range,
    number_of_space_points: usize,
    time_range: Range,
    number_of_time_points: usize,
}

impl TryFrom<DiscretizationFields1d> for DiscretizationConfig1d {
    type Error = FdError;

    fn try_from(f: DiscretizationFields1d) -> Result<Self, Self::Error> {
        Self::new(f.space_range, f.number_of_space_points, f.time_range, f.number_of_time_points)
    }
}

impl DiscretizationConfig1d {
    /// Requires at least 3 space points and 2 time points.
    pub fn new(
        space_range: Range,
        number_of_space_points: usize,
        time_range: Range,
        number_of_time_points: usize,
    ) -> Result<Self, FdError> {
        check_points("number_of_space_points", number_of_space_points, 3)?;
        check_points("number_of_time_points", number_of_time_points, 2)?;
        Ok(Self {
            space_range,
            number_of_space_points,
            time_range,
            number_of_time_points,
        })
    }

    pub fn space_range(&self) -> Range {
        self.space_range
    }

    pub fn number_of_space_points(&self) -> usize {
        self.number_of_space_points
    }

    pub fn time_range(&self) -> Range {
        self.time_range
    }

    pub fn number_of_time_points(&self) -> usize {
        self.number_of_time_points
    }

    /// Uniform time step `(T - t0) / (number_of_time_points - 1)`.
    pub fn time_step(&self) -> f64 {
        time_step(&self.time_range, self.number_of_time_points)
    }
}

/// Space ranges and point counts for a 2D problem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DiscretizationFields2d")]
pub struct DiscretizationConfig2d {
    space_ranges: (Range, Range),
    number_of_space_points: (usize, usize),
    time_range: Range,
    number_of_time_points: usize,
}

#[derive(Deserialize)]
struct DiscretizationFields2d {
    space_ranges: (Range, Range),
    number_of_space_points: (usize, usize),
    time_range: Range,
    number_of_time_points: usize,
}

impl TryFrom<DiscretizationFields2d> for DiscretizationConfig2d {
    type Error = FdError;

    fn try_from(f: DiscretizationFields2d) -> Result<Self, Self::Error> {
        Self::new(f.space_ranges, f.number_of_space_points, f.time_range, f.number_of_time_points)
    }
}

impl DiscretizationConfig2d {
    pub fn new(
        space_ranges: (Range, Range),
        number_of_space_points: (usize, usize),
        time_range: Range,
        number_of_time_points: usize,
    ) -> Result<Self, FdError> {
        check_points("number_of_space_points.0", number_of_space_points.0, 3)?;
        check_points("number_of_space_points.1", number_of_space_points.1, 3)?;
        check_points("number_of_time_points", number_of_time_points, 2)?;
        Ok(Self {
            space_ranges,
            number_of_space_points,
            time_range,
            number_of_time_points,
        })
    }

    pub fn space_ranges(&self) -> (Range, Range) {
        self.space_ranges
    }

    pub fn number_of_space_points(&self) -> (usize, usize) {
        self.number_of_space_points
    }

    pub fn time_range(&self) -> Range {
        self.time_range
    }

    pub fn number_of_time_points(&self) -> usize {
        self.number_of_time_points
    }

    pub fn time_step(&self) -> f64 {
        time_step(&self.time_range, self.number_of_time_points)
    }
}

/// Space ranges and point counts for a 3D problem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DiscretizationFields3d")]
pub struct DiscretizationConfig3d {
    space_ranges: (Range, Range, Range),
    number_of_space_points: (usize, usize, usize),
    time_range: Range,
    number_of_time_points: usize,
}

#[derive(Deserialize)]
struct DiscretizationFields3d {
    space_ranges: (Range, Range, Range),
    number_of_space_points: (usize, usize, usize),
    time_range: Range,
    number_of_time_points: usize,
}

impl TryFrom<DiscretizationFields3d> for DiscretizationConfig3d {
    type Error = FdError;

    fn try_from(f: DiscretizationFields3d) -> Result<Self, Self::Error> {
        Self::new(f.space_ranges, f.number_of_space_points, f.time_range, f.number_of_time_points)
    }
}

impl DiscretizationConfig3d {
    pub fn new(
        space_ranges: (Range, Range, Range),
        number_of_space_points: (usize, usize, usize),
        time_range: Range,
        number_of_time_points: usize,
    ) -> Result<Self, FdError> {
        check_points("number_of_space_points.0", number_of_space_points.0, 3)?;
        check_points("number_of_space_points.1", number_of_space_points.1, 3)?;
        check_points("number_of_space_points.2", number_of_space_points.2, 3)?;
        check_points("number_of_time_points", number_of_time_points, 2)?;
        Ok(Self {
            space_ranges,
            number_of_space_points,
            time_range,
            number_of_time_points,
        })
    }

    pub fn space_ranges(&self) -> (Range, Range, Range) {
        self.space_ranges
    }

    pub fn number_of_space_points(&self) -> (usize, usize, usize) {
        self.number_of_space_points
    }

    pub fn time_range(&self) -> Range {
        self.time_range
    }

    pub fn number_of_time_points(&self) -> usize {
        self.number_of_time_points
    }

    pub fn time_step(&self) -> f64 {
        time_step(&self.time_range, self.number_of_time_points)
    }
}

fn time_step(range: &Range, points: usize) -> f64 {
    range.spread() / (points - 1) as f64
}

/// Uniform computational grid on `[0, 1]` with `step = 1 / (N - 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig1d {
    size: usize,
    step: f64,
}

impl GridConfig1d {
    pub fn new(number_of_points: usize) -> Result<Self, FdError> {
        check_points("number of grid points", number_of_points, 2)?;
        Ok(Self {
            size: number_of_points,
            step: 1.0 / (number_of_points - 1) as f64,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Computational coordinate of grid index `idx`.
    #[inline]
    pub fn value_for(&self, idx: usize) -> f64 {
        idx as f64 * self.step
    }

    /// Grid index nearest to the computational coordinate `zeta`.
    #[inline]
    pub fn index_of(&self, zeta: f64) -> usize {
        (zeta / self.step).round() as usize
    }
}

/// Pair of computational grids, one per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig2d {
    axis_1: GridConfig1d,
    axis_2: GridConfig1d,
}

impl GridConfig2d {
    pub fn new(points: (usize, usize)) -> Result<Self, FdError> {
        Ok(Self {
            axis_1: GridConfig1d::new(points.0)?,
            axis_2: GridConfig1d::new(points.1)?,
        })
    }

    pub fn axis_1(&self) -> &GridConfig1d {
        &self.axis_1
    }

    pub fn axis_2(&self) -> &GridConfig1d {
        &self.axis_2
    }
}

/// Triple of computational grids, one per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig3d {
    axis_1: GridConfig1d,
    axis_2: GridConfig1d,
    axis_3: GridConfig1d,
}

impl GridConfig3d {
    pub fn new(points: (usize, usize, usize)) -> Result<Self, FdError> {
        Ok(Self {
            axis_1: GridConfig1d::new(points.0)?,
            axis_2: GridConfig1d::new(points.1)?,
            axis_3: GridConfig1d::new(points.2)?,
        })
    }

    pub fn axis_1(&self) -> &GridConfig1d {
        &self.axis_1
    }

    pub fn axis_2(&self) -> &GridConfig1d {
        &self.axis_2
    }

    pub fn axis_3(&self) -> &GridConfig1d {
        &self.axis_3
    }
}

/// Stretching hints for a 1D grid transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridHints1d {
    /// Physical point around which grid density concentrates.
    pub accumulation_point: f64,
    /// Divides `accumulation_point - lower` to give the sinh scale.
    pub alpha_scale: f64,
    pub grid: GridKind,
}

impl GridHints1d {
    pub fn new(accumulation_point: f64, alpha_scale: f64, grid: GridKind) -> Self {
        Self {
            accumulation_point,
            alpha_scale,
            grid,
        }
    }

    /// Uniform hints anchored at the middle of `range`.
    pub fn uniform(range: &Range) -> Self {
        Self::new(range.mid_point(), 3.0, GridKind::Uniform)
    }
}

/// Stretching hints for a 2D grid transform (axis 2 is one-sided).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridHints2d {
    pub accumulation_point: f64,
    pub alpha_scale: f64,
    /// Divides the axis-2 range width to give its sinh scale.
    pub beta_scale: f64,
    pub grid: GridKind,
}

impl GridHints2d {
    pub fn new(accumulation_point: f64, alpha_scale: f64, beta_scale: f64, grid: GridKind) -> Self {
        Self {
            accumulation_point,
            alpha_scale,
            beta_scale,
            grid,
        }
    }

    pub fn uniform(axis_1: &Range) -> Self {
        Self::new(axis_1.mid_point(), 3.0, 50.0, GridKind::Uniform)
    }
}

/// Stretching hints for a 3D grid transform.
///
/// Axes 1 and 3 concentrate around their accumulation points; axis 2 is
/// one-sided from its lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridHints3d {
    pub accumulation_points: (f64, f64),
    pub alpha_scales: (f64, f64),
    pub beta_scale: f64,
    pub grid: GridKind,
}

impl GridHints3d {
    pub fn new(
        accumulation_points: (f64, f64),
        alpha_scales: (f64, f64),
        beta_scale: f64,
        grid: GridKind,
    ) -> Self {
        Self {
            accumulation_points,
            alpha_scales,
            beta_scale,
            grid,
        }
    }

    pub fn uniform(axis_1: &Range, axis_3: &Range) -> Self {
        Self::new(
            (axis_1.mid_point(), axis_3.mid_point()),
            (3.0, 3.0),
            50.0,
            GridKind::Uniform,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_value_for() {
        for n in [3_usize, 7, 100, 1001] {
            let grid = GridConfig1d::new(n).expect("grid");
            for idx in 0..n {
                assert_eq!(grid.index_of(grid.value_for(idx)), idx);
            }
            assert!((grid.value_for(n - 1) - 1.0).abs() <= f64::EPSILON);
        }
    }

    #[test]
    fn discretization_rejects_too_few_points() {
        let space = Range::new(0.0, 1.0).expect("range");
        let time = Range::new(0.0, 1.0).expect("range");
        assert!(DiscretizationConfig1d::new(space, 2, time, 10).is_err());
        assert!(DiscretizationConfig1d::new(space, 10, time, 1).is_err());
    }

    #[test]
    fn invalid_json_discretization_is_rejected() {
        let cfg: DiscretizationConfig1d = serde_json::from_str(
            r#"{"space_range":{"lower":0.0,"upper":1.0},"number_of_space_points":11,
                "time_range":{"lower":0.0,"upper":1.0},"number_of_time_points":5}"#,
        )
        .expect("valid config");
        assert!((cfg.time_step() - 0.25).abs() < 1.0e-15);

        assert!(serde_json::from_str::<DiscretizationConfig1d>(
            r#"{"space_range":{"lower":0.0,"upper":1.0},"number_of_space_points":11,
                "time_range":{"lower":0.0,"upper":1.0},"number_of_time_points":0}"#,
        )
        .is_err());
        assert!(serde_json::from_str::<DiscretizationConfig1d>(
            r#"{"space_range":{"lower":1.0,"upper":0.0},"number_of_space_points":11,
                "time_range":{"lower":0.0,"upper":1.0},"number_of_time_points":5}"#,
        )
        .is_err());
        assert!(serde_json::from_str::<DiscretizationConfig2d>(
            r#"{"space_ranges":[{"lower":0.0,"upper":1.0},{"lower":0.0,"upper":1.0}],
                "number_of_space_points":[11,2],
                "time_range":{"lower":0.0,"upper":1.0},"number_of_time_points":5}"#,
        )
        .is_err());
        assert!(serde_json::from_str::<DiscretizationConfig3d>(
            r#"{"space_ranges":[{"lower":0.0,"upper":1.0},{"lower":0.0,"upper":1.0},{"lower":0.0,"upper":1.0}],
                "number_of_space_points":[5,5,5],
                "time_range":{"lower":0.0,"upper":1.0},"number_of_time_points":1}"#,
        )
        .is_err());
    }

    #[test]
    fn time_step_spans_the_time_range() {
        let space = Range::new(0.0, 1.0).expect("range");
        let time = Range::new(0.0, 2.0).expect("range");
        let cfg = DiscretizationConfig1d::new(space, 11, time, 201).expect("config");
        assert!((cfg.time_step() - 0.01).abs() < 1.0e-15);
    }
}
