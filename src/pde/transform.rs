//! PDE coefficients re-expressed on the uniform computational grid.
//!
//! For `x = x(ζ)`: `u_x = u_ζ / x'` and `u_xx = u_ζζ / x'² − x'' u_ζ / x'³`.
//! Second-order coefficients are divided by `x'²`, first-order ones by `x'`
//! with the `x''` correction subtracted, reaction and source terms are only
//! re-parameterised.

use crate::grid::{GridTransform1d, GridTransform2d, GridTransform3d};

use super::data::{HeatData1d, HeatData2d, HeatData3d, WaveData1d};

/// Heat coefficients of `u_t = a u_ζζ + b u_ζ + c u + s` in `(t, ζ)`.
#[derive(Debug, Clone)]
pub struct HeatDataTransform1d {
    data: HeatData1d,
    grid: GridTransform1d,
}

impl HeatDataTransform1d {
    pub fn new(data: HeatData1d, grid: GridTransform1d) -> Self {
        Self { data, grid }
    }

    pub fn grid_transform(&self) -> &GridTransform1d {
        &self.grid
    }

    /// `A(t, x(ζ)) / x'(ζ)²`.
    #[inline]
    pub fn a_coefficient(&self, t: f64, zeta: f64) -> f64 {
        let der = self.grid.a_derivative(zeta);
        (self.data.a)(t, self.grid.value_for(zeta)) / (der * der)
    }

    /// `B / x' − A x'' / x'³`.
    #[inline]
    pub fn b_coefficient(&self, t: f64, zeta: f64) -> f64 {
        let x = self.grid.value_for(zeta);
        let der = self.grid.a_derivative(zeta);
        (self.data.b)(t, x) / der - (self.data.a)(t, x) * self.grid.b_derivative(zeta) / (der * der * der)
    }

    /// `C(t, x(ζ))`.
    #[inline]
    pub fn c_coefficient(&self, t: f64, zeta: f64) -> f64 {
        (self.data.c)(t, self.grid.value_for(zeta))
    }

    /// `u(t0, x(ζ))`.
    #[inline]
    pub fn initial_condition(&self, zeta: f64) -> f64 {
        (self.data.initial)(self.grid.value_for(zeta))
    }

    pub fn is_source_set(&self) -> bool {
        self.data.source.is_some()
    }

    /// `S(t, x(ζ))`, or `None` when no source was configured.
    #[inline]
    pub fn source(&self, t: f64, zeta: f64) -> Option<f64> {
        self.data
            .source
            .as_ref()
            .map(|s| s(t, self.grid.value_for(zeta)))
    }
}

/// Transformed 2D heat coefficients at one `(t, ζ, η)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatCoefficients2d {
    /// `u_ζζ`.
    pub a: f64,
    /// `u_ηη`.
    pub b: f64,
    /// `u_ζη`.
    pub c: f64,
    /// `u_ζ`.
    pub d: f64,
    /// `u_η`.
    pub e: f64,
    /// `u`.
    pub f: f64,
}

/// Heat coefficients of the 2D problem in `(t, ζ, η)`.
#[derive(Debug, Clone)]
pub struct HeatDataTransform2d {
    data: HeatData2d,
    grid: GridTransform2d,
}

impl HeatDataTransform2d {
    pub fn new(data: HeatData2d, grid: GridTransform2d) -> Self {
        Self { data, grid }
    }

    pub fn grid_transform(&self) -> &GridTransform2d {
        &self.grid
    }

    /// All six coefficients; `x, y` are evaluated once.
    pub fn coefficients(&self, t: f64, zeta: f64, eta: f64) -> HeatCoefficients2d {
        let (x, y) = self.grid.value_for(zeta, eta);
        let der_x = self.grid.a_derivative(zeta);
        let der_y = self.grid.b_derivative(eta);
        let big_a = (self.data.a)(t, x, y);
        let big_b = (self.data.b)(t, x, y);
        HeatCoefficients2d {
            a: big_a / (der_x * der_x),
            b: big_b / (der_y * der_y),
            c: (self.data.c)(t, x, y) / (der_x * der_y),
            d: (self.data.d)(t, x, y) / der_x
                - big_a * self.grid.c_derivative(zeta) / (der_x * der_x * der_x),
            e: (self.data.e)(t, x, y) / der_y
                - big_b * self.grid.d_derivative(eta) / (der_y * der_y * der_y),
            f: (self.data.f)(t, x, y),
        }
    }

    pub fn initial_condition(&self, zeta: f64, eta: f64) -> f64 {
        let (x, y) = self.grid.value_for(zeta, eta);
        (self.data.initial)(x, y)
    }

    pub fn is_source_set(&self) -> bool {
        self.data.source.is_some()
    }

    pub fn source(&self, t: f64, zeta: f64, eta: f64) -> Option<f64> {
        let (x, y) = self.grid.value_for(zeta, eta);
        self.data.source.as_ref().map(|s| s(t, x, y))
    }
}

/// Transformed 3D heat coefficients at one point, in [`super::data::Term3d`] order.
pub type HeatCoefficients3d = [f64; 10];

/// Heat coefficients of the 3D problem in `(t, ζ, η, ξ)`.
#[derive(Debug, Clone)]
pub struct HeatDataTransform3d {
    data: HeatData3d,
    grid: GridTransform3d,
}

impl HeatDataTransform3d {
    pub fn new(data: HeatData3d, grid: GridTransform3d) -> Self {
        Self { data, grid }
    }

    pub fn grid_transform(&self) -> &GridTransform3d {
        &self.grid
    }

    pub fn coefficients(&self, t: f64, zeta: f64, eta: f64, xi: f64) -> HeatCoefficients3d {
        let (x, y, z) = self.grid.value_for(zeta, eta, xi);
        let coords = [zeta, eta, xi];
        let mut der = [0.0; 3];
        let mut der2 = [0.0; 3];
        for axis in 0..3 {
            der[axis] = self.grid.axis(axis).first_derivative(coords[axis]);
            der2[axis] = self.grid.axis(axis).second_derivative(coords[axis]);
        }
        let raw: [f64; 10] = std::array::from_fn(|n| (self.data.coefficients[n])(t, x, y, z));

        let mut out = [0.0; 10];
        for axis in 0..3 {
            let (diffusion, convection) = (raw[axis], raw[6 + axis]);
            out[axis] = diffusion / (der[axis] * der[axis]);
            out[6 + axis] =
                convection / der[axis] - diffusion * der2[axis] / (der[axis] * der[axis] * der[axis]);
        }
        out[3] = raw[3] / (der[0] * der[1]);
        out[4] = raw[4] / (der[0] * der[2]);
        out[5] = raw[5] / (der[1] * der[2]);
        out[9] = raw[9];
        out
    }

    pub fn initial_condition(&self, zeta: f64, eta: f64, xi: f64) -> f64 {
        let (x, y, z) = self.grid.value_for(zeta, eta, xi);
        (self.data.initial)(x, y, z)
    }

    pub fn is_source_set(&self) -> bool {
        self.data.source.is_some()
    }

    pub fn source(&self, t: f64, zeta: f64, eta: f64, xi: f64) -> Option<f64> {
        let (x, y, z) = self.grid.value_for(zeta, eta, xi);
        self.data.source.as_ref().map(|s| s(t, x, y, z))
    }
}

/// Wave coefficients of `u_tt + a u_t = b u_ζζ + c u_ζ + d u + s` in `(t, ζ)`.
#[derive(Debug, Clone)]
pub struct WaveDataTransform1d {
    data: WaveData1d,
    grid: GridTransform1d,
}

impl WaveDataTransform1d {
    pub fn new(data: WaveData1d, grid: GridTransform1d) -> Self {
        Self { data, grid }
    }

    pub fn grid_transform(&self) -> &GridTransform1d {
        &self.grid
    }

    /// Damping, unaffected by the space transform.
    #[inline]
    pub fn a_coefficient(&self, t: f64, zeta: f64) -> f64 {
        (self.data.a)(t, self.grid.value_for(zeta))
    }

    #[inline]
    pub fn b_coefficient(&self, t: f64, zeta: f64) -> f64 {
        let der = self.grid.a_derivative(zeta);
        (self.data.b)(t, self.grid.value_for(zeta)) / (der * der)
    }

    #[inline]
    pub fn c_coefficient(&self, t: f64, zeta: f64) -> f64 {
        let x = self.grid.value_for(zeta);
        let der = self.grid.a_derivative(zeta);
        (self.data.c)(t, x) / der - (self.data.b)(t, x) * self.grid.b_derivative(zeta) / (der * der * der)
    }

    #[inline]
    pub fn d_coefficient(&self, t: f64, zeta: f64) -> f64 {
        (self.data.d)(t, self.grid.value_for(zeta))
    }

    pub fn first_initial_condition(&self, zeta: f64) -> f64 {
        (self.data.first_initial)(self.grid.value_for(zeta))
    }

    pub fn second_initial_condition(&self, zeta: f64) -> f64 {
        (self.data.second_initial)(self.grid.value_for(zeta))
    }

    pub fn is_source_set(&self) -> bool {
        self.data.source.is_some()
    }

    pub fn source(&self, t: f64, zeta: f64) -> Option<f64> {
        self.data
            .source
            .as_ref()
            .map(|s| s(t, self.grid.value_for(zeta)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GridKind, Range};
    use crate::grid::{DiscretizationConfig1d, GridHints1d};
    use approx::assert_relative_eq;

    fn transform() -> GridTransform1d {
        let cfg = DiscretizationConfig1d::new(
            Range::new(0.0, 4.0).expect("space"),
            51,
            Range::new(0.0, 1.0).expect("time"),
            2,
        )
        .expect("config");
        GridTransform1d::new(&cfg, &GridHints1d::new(1.0, 2.0, GridKind::Nonuniform)).expect("grid")
    }

    #[test]
    fn transformed_operator_matches_physical_operator() {
        // u = x^3: A u_xx + B u_x must equal a u_ζζ + b u_ζ for u(ζ) = x(ζ)^3.
        let grid = transform();
        let data = HeatData1d::builder()
            .a_coefficient(|_, x| 0.5 * x * x)
            .b_coefficient(|_, x| 0.1 * x)
            .initial_condition(|x| x)
            .build()
            .expect("data");
        let tr = HeatDataTransform1d::new(data, grid);
        for &zeta in &[0.2, 0.5, 0.8] {
            let x = grid.value_for(zeta);
            let (d1, d2) = (grid.a_derivative(zeta), grid.b_derivative(zeta));
            let u_z = 3.0 * x * x * d1;
            let u_zz = 6.0 * x * d1 * d1 + 3.0 * x * x * d2;
            let physical = 0.5 * x * x * 6.0 * x + 0.1 * x * 3.0 * x * x;
            let computational = tr.a_coefficient(0.0, zeta) * u_zz + tr.b_coefficient(0.0, zeta) * u_z;
            assert_relative_eq!(computational, physical, max_relative = 1.0e-12);
        }
    }

    #[test]
    fn source_is_none_unless_configured() {
        let data = HeatData1d::builder()
            .a_coefficient(|_, _| 1.0)
            .initial_condition(|x| x * x)
            .build()
            .expect("data");
        let tr = HeatDataTransform1d::new(data, transform());
        assert!(!tr.is_source_set());
        assert!(tr.source(0.0, 0.5).is_none());
        assert_relative_eq!(tr.initial_condition(1.0), 16.0, epsilon = 1.0e-10);
    }

    #[test]
    fn wave_keeps_damping_and_rescales_speed() {
        let grid = transform();
        let data = WaveData1d::builder()
            .a_coefficient(|_, _| 0.3)
            .b_coefficient(|_, _| 2.0)
            .first_initial_condition(|x| x)
            .second_initial_condition(|_| 0.0)
            .build()
            .expect("data");
        let tr = WaveDataTransform1d::new(data, grid);
        let der = grid.a_derivative(0.4);
        assert_eq!(tr.a_coefficient(0.0, 0.4), 0.3);
        assert_relative_eq!(tr.b_coefficient(0.0, 0.4), 2.0 / (der * der), max_relative = 1.0e-14);
    }
}
