//! Hyperbolic-sine maps from the computational cube `[0, 1]^d` onto physical ranges.
//!
//! Each axis uses `x(ζ) = p + α·sinh(c0·ζ + c1·(1 − ζ))` with
//! `c0 = asinh((H − p)/α)` and `c1 = asinh((L − p)/α)`, so that `x(0) = L`
//! and `x(1) = H`. A uniform grid kind sets `α = H − L`; the map is then still
//! sinh-shaped but does not concentrate points. One-sided axes fix `p = L`,
//! which makes `c1 = 0`.

use crate::core::{FdError, GridKind, Range};

use super::config::{
    DiscretizationConfig1d, DiscretizationConfig2d, DiscretizationConfig3d, GridHints1d,
    GridHints2d, GridHints3d,
};

/// Constants of a single sinh-stretched axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTransform {
    init: f64,
    alpha: f64,
    c0: f64,
    c1: f64,
}

impl AxisTransform {
    /// Axis concentrating around `accumulation_point` with scale `alpha`.
    pub fn two_sided(range: &Range, accumulation_point: f64, alpha: f64) -> Result<Self, FdError> {
        check_scale("alpha", alpha)?;
        if !range.contains(accumulation_point) {
            return Err(FdError::InvalidInput(format!(
                "accumulation point {accumulation_point} outside [{}, {}]",
                range.lower(),
                range.upper()
            )));
        }
        Ok(Self {
            init: accumulation_point,
            alpha,
            c0: ((range.upper() - accumulation_point) / alpha).asinh(),
            c1: ((range.lower() - accumulation_point) / alpha).asinh(),
        })
    }

    /// Axis concentrating at its lower bound with scale `beta`.
    pub fn one_sided(range: &Range, beta: f64) -> Result<Self, FdError> {
        check_scale("beta", beta)?;
        Ok(Self {
            init: range.lower(),
            alpha: beta,
            c0: (range.spread() / beta).asinh(),
            c1: 0.0,
        })
    }

    #[inline]
    fn argument(&self, zeta: f64) -> f64 {
        self.c0 * zeta + self.c1 * (1.0 - zeta)
    }

    /// Physical coordinate of computational coordinate `zeta`.
    #[inline]
    pub fn value_for(&self, zeta: f64) -> f64 {
        self.alpha.mul_add(self.argument(zeta).sinh(), self.init)
    }

    /// `dx/dζ`.
    #[inline]
    pub fn first_derivative(&self, zeta: f64) -> f64 {
        self.alpha * (self.c0 - self.c1) * self.argument(zeta).cosh()
    }

    /// `d²x/dζ²`.
    #[inline]
    pub fn second_derivative(&self, zeta: f64) -> f64 {
        let spread = self.c0 - self.c1;
        self.alpha * spread * spread * self.argument(zeta).sinh()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

fn check_scale(name: &str, value: f64) -> Result<(), FdError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FdError::InvalidInput(format!(
            "grid transform {name} must be finite and > 0, got {value}"
        )));
    }
    Ok(())
}

fn two_sided_alpha(range: &Range, accumulation_point: f64, alpha_scale: f64, grid: GridKind) -> f64 {
    match grid {
        GridKind::Uniform => range.spread(),
        GridKind::Nonuniform => (accumulation_point - range.lower()) / alpha_scale,
    }
}

fn one_sided_beta(range: &Range, beta_scale: f64, grid: GridKind) -> f64 {
    match grid {
        GridKind::Uniform => range.spread(),
        GridKind::Nonuniform => range.spread() / beta_scale,
    }
}

/// Grid transform of a 1D problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTransform1d {
    axis: AxisTransform,
}

impl GridTransform1d {
    pub fn new(config: &DiscretizationConfig1d, hints: &GridHints1d) -> Result<Self, FdError> {
        let range = config.space_range();
        let alpha = two_sided_alpha(&range, hints.accumulation_point, hints.alpha_scale, hints.grid);
        Ok(Self {
            axis: AxisTransform::two_sided(&range, hints.accumulation_point, alpha)?,
        })
    }

    pub fn axis(&self) -> &AxisTransform {
        &self.axis
    }

    #[inline]
    pub fn value_for(&self, zeta: f64) -> f64 {
        self.axis.value_for(zeta)
    }

    /// First derivative `x'(ζ)`.
    #[inline]
    pub fn a_derivative(&self, zeta: f64) -> f64 {
        self.axis.first_derivative(zeta)
    }

    /// Second derivative `x''(ζ)`.
    #[inline]
    pub fn b_derivative(&self, zeta: f64) -> f64 {
        self.axis.second_derivative(zeta)
    }
}

/// Grid transform of a 2D problem: axis 1 two-sided, axis 2 one-sided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTransform2d {
    axis_1: AxisTransform,
    axis_2: AxisTransform,
}

impl GridTransform2d {
    pub fn new(config: &DiscretizationConfig2d, hints: &GridHints2d) -> Result<Self, FdError> {
        let (range_1, range_2) = config.space_ranges();
        let alpha = two_sided_alpha(&range_1, hints.accumulation_point, hints.alpha_scale, hints.grid);
        let beta = one_sided_beta(&range_2, hints.beta_scale, hints.grid);
        Ok(Self {
            axis_1: AxisTransform::two_sided(&range_1, hints.accumulation_point, alpha)?,
            axis_2: AxisTransform::one_sided(&range_2, beta)?,
        })
    }

    pub fn axis_1(&self) -> &AxisTransform {
        &self.axis_1
    }

    pub fn axis_2(&self) -> &AxisTransform {
        &self.axis_2
    }

    #[inline]
    pub fn value_for(&self, zeta: f64, eta: f64) -> (f64, f64) {
        (self.axis_1.value_for(zeta), self.axis_2.value_for(eta))
    }

    /// `x'(ζ)`.
    #[inline]
    pub fn a_derivative(&self, zeta: f64) -> f64 {
        self.axis_1.first_derivative(zeta)
    }

    /// `y'(η)`.
    #[inline]
    pub fn b_derivative(&self, eta: f64) -> f64 {
        self.axis_2.first_derivative(eta)
    }

    /// `x''(ζ)`.
    #[inline]
    pub fn c_derivative(&self, zeta: f64) -> f64 {
        self.axis_1.second_derivative(zeta)
    }

    /// `y''(η)`.
    #[inline]
    pub fn d_derivative(&self, eta: f64) -> f64 {
        self.axis_2.second_derivative(eta)
    }
}

/// Grid transform of a 3D problem.
///
/// Axes 1 and 3 are two-sided around their accumulation points, axis 2 is
/// one-sided (variance-like).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTransform3d {
    axes: [AxisTransform; 3],
}

impl GridTransform3d {
    pub fn new(config: &DiscretizationConfig3d, hints: &GridHints3d) -> Result<Self, FdError> {
        let (range_1, range_2, range_3) = config.space_ranges();
        let (p1, p3) = hints.accumulation_points;
        let alpha_1 = two_sided_alpha(&range_1, p1, hints.alpha_scales.0, hints.grid);
        let alpha_3 = two_sided_alpha(&range_3, p3, hints.alpha_scales.1, hints.grid);
        let beta = one_sided_beta(&range_2, hints.beta_scale, hints.grid);
        Ok(Self {
            axes: [
                AxisTransform::two_sided(&range_1, p1, alpha_1)?,
                AxisTransform::one_sided(&range_2, beta)?,
                AxisTransform::two_sided(&range_3, p3, alpha_3)?,
            ],
        })
    }

    /// Axis transform for `axis` in `0..3`.
    pub fn axis(&self, axis: usize) -> &AxisTransform {
        &self.axes[axis]
    }

    #[inline]
    pub fn value_for(&self, zeta: f64, eta: f64, xi: f64) -> (f64, f64, f64) {
        (
            self.axes[0].value_for(zeta),
            self.axes[1].value_for(eta),
            self.axes[2].value_for(xi),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config(lower: f64, upper: f64) -> DiscretizationConfig1d {
        DiscretizationConfig1d::new(
            Range::new(lower, upper).expect("space"),
            101,
            Range::new(0.0, 1.0).expect("time"),
            11,
        )
        .expect("config")
    }

    #[test]
    fn endpoints_map_onto_the_physical_range() {
        for kind in [GridKind::Uniform, GridKind::Nonuniform] {
            let t = GridTransform1d::new(&config(20.0, 200.0), &GridHints1d::new(100.0, 3.0, kind))
                .expect("transform");
            assert_relative_eq!(t.value_for(0.0), 20.0, epsilon = 1.0e-10);
            assert_relative_eq!(t.value_for(1.0), 200.0, epsilon = 1.0e-10);
        }
    }

    #[test]
    fn uniform_kind_is_sinh_shaped_not_identity() {
        let t = GridTransform1d::new(&config(0.0, 1.0), &GridHints1d::new(0.5, 3.0, GridKind::Uniform))
            .expect("transform");
        let mid_slope = t.a_derivative(0.5);
        let edge_slope = t.a_derivative(0.0);
        assert!(edge_slope > mid_slope);
        assert_relative_eq!(t.value_for(0.5), 0.5, epsilon = 1.0e-14);
        assert!((t.value_for(0.25) - 0.25).abs() > 1.0e-4);
    }

    #[test]
    fn nonuniform_kind_concentrates_near_the_accumulation_point() {
        let t = GridTransform1d::new(&config(0.0, 200.0), &GridHints1d::new(100.0, 10.0, GridKind::Nonuniform))
            .expect("transform");
        let zeta_p = (-t.axis().c1) / (t.axis().c0 - t.axis().c1);
        assert_relative_eq!(t.value_for(zeta_p), 100.0, epsilon = 1.0e-9);
        assert!(t.a_derivative(zeta_p) < t.a_derivative(0.0));
        assert!(t.a_derivative(zeta_p) < t.a_derivative(1.0));
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let t = GridTransform1d::new(&config(0.0, 200.0), &GridHints1d::new(80.0, 5.0, GridKind::Nonuniform))
            .expect("transform");
        let h = 1.0e-5;
        for &z in &[0.1, 0.4, 0.9] {
            let fd1 = (t.value_for(z + h) - t.value_for(z - h)) / (2.0 * h);
            let fd2 = (t.a_derivative(z + h) - t.a_derivative(z - h)) / (2.0 * h);
            assert_relative_eq!(t.a_derivative(z), fd1, max_relative = 1.0e-7);
            assert_relative_eq!(t.b_derivative(z), fd2, max_relative = 1.0e-6);
        }
    }

    #[test]
    fn one_sided_axis_starts_at_its_lower_bound() {
        let range = Range::new(0.0, 1.0).expect("range");
        let axis = AxisTransform::one_sided(&range, 0.05).expect("axis");
        assert_relative_eq!(axis.value_for(0.0), 0.0, epsilon = 1.0e-15);
        assert_relative_eq!(axis.value_for(1.0), 1.0, epsilon = 1.0e-12);
        assert!(axis.first_derivative(0.0) < axis.first_derivative(1.0));
        assert_eq!(axis.second_derivative(0.0), 0.0);
    }

    #[test]
    fn rejects_accumulation_point_outside_range() {
        let err = GridTransform1d::new(&config(0.0, 1.0), &GridHints1d::new(2.0, 3.0, GridKind::Nonuniform));
        assert!(err.is_err());
    }
}
