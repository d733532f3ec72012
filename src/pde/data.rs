//! Raw PDE coefficient, initial-condition and source functions in physical coordinates.

use std::fmt;
use std::sync::Arc;

use crate::core::FdError;

/// `x -> u(t0, x)`.
pub type InitialFn1d = Arc<dyn Fn(f64) -> f64 + Send + Sync>;
/// `(t, x) -> value`.
pub type CoefficientFn1d = Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>;
/// `(x, y) -> u(t0, x, y)`.
pub type InitialFn2d = Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>;
/// `(t, x, y) -> value`.
pub type CoefficientFn2d = Arc<dyn Fn(f64, f64, f64) -> f64 + Send + Sync>;
/// `(x, y, z) -> u(t0, x, y, z)`.
pub type InitialFn3d = Arc<dyn Fn(f64, f64, f64) -> f64 + Send + Sync>;
/// `(t, x, y, z) -> value`.
pub type CoefficientFn3d = Arc<dyn Fn(f64, f64, f64, f64) -> f64 + Send + Sync>;

fn zero_1d() -> CoefficientFn1d {
    Arc::new(|_, _| 0.0)
}

fn zero_2d() -> CoefficientFn2d {
    Arc::new(|_, _, _| 0.0)
}

fn zero_3d() -> CoefficientFn3d {
    Arc::new(|_, _, _, _| 0.0)
}

fn required<T>(value: Option<T>, what: &str) -> Result<T, FdError> {
    value.ok_or_else(|| FdError::InvalidInput(format!("{what} is required")))
}

/// Data of `u_t = A(t,x) u_xx + B(t,x) u_x + C(t,x) u + S(t,x)`.
#[derive(Clone)]
pub struct HeatData1d {
    pub(crate) a: CoefficientFn1d,
    pub(crate) b: CoefficientFn1d,
    pub(crate) c: CoefficientFn1d,
    pub(crate) initial: InitialFn1d,
    pub(crate) source: Option<CoefficientFn1d>,
}

impl HeatData1d {
    pub fn builder() -> HeatData1dBuilder {
        HeatData1dBuilder::default()
    }

    pub fn a_coefficient(&self) -> &CoefficientFn1d {
        &self.a
    }

    pub fn b_coefficient(&self) -> &CoefficientFn1d {
        &self.b
    }

    pub fn c_coefficient(&self) -> &CoefficientFn1d {
        &self.c
    }

    pub fn initial_condition(&self) -> &InitialFn1d {
        &self.initial
    }

    pub fn source(&self) -> Option<&CoefficientFn1d> {
        self.source.as_ref()
    }
}

impl fmt::Debug for HeatData1d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeatData1d")
            .field("has_source", &self.source.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`HeatData1d`]. Diffusion and initial condition are required.
#[derive(Default)]
pub struct HeatData1dBuilder {
    a: Option<CoefficientFn1d>,
    b: Option<CoefficientFn1d>,
    c: Option<CoefficientFn1d>,
    initial: Option<InitialFn1d>,
    source: Option<CoefficientFn1d>,
}

impl HeatData1dBuilder {
    /// Diffusion `A(t, x)`.
    pub fn a_coefficient(mut self, f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.a = Some(Arc::new(f));
        self
    }

    /// Convection `B(t, x)`.
    pub fn b_coefficient(mut self, f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.b = Some(Arc::new(f));
        self
    }

    /// Reaction `C(t, x)`.
    pub fn c_coefficient(mut self, f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.c = Some(Arc::new(f));
        self
    }

    pub fn initial_condition(mut self, f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        self.initial = Some(Arc::new(f));
        self
    }

    pub fn source(mut self, f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> Result<HeatData1d, FdError> {
        Ok(HeatData1d {
            a: required(self.a, "heat a_coefficient")?,
            b: self.b.unwrap_or_else(zero_1d),
            c: self.c.unwrap_or_else(zero_1d),
            initial: required(self.initial, "heat initial_condition")?,
            source: self.source,
        })
    }
}

/// Data of `u_t = A u_xx + B u_yy + C u_xy + D u_x + E u_y + F u + S`.
#[derive(Clone)]
pub struct HeatData2d {
    pub(crate) a: CoefficientFn2d,
    pub(crate) b: CoefficientFn2d,
    pub(crate) c: CoefficientFn2d,
    pub(crate) d: CoefficientFn2d,
    pub(crate) e: CoefficientFn2d,
    pub(crate) f: CoefficientFn2d,
    pub(crate) initial: InitialFn2d,
    pub(crate) source: Option<CoefficientFn2d>,
}

impl HeatData2d {
    pub fn builder() -> HeatData2dBuilder {
        HeatData2dBuilder::default()
    }

    pub fn initial_condition(&self) -> &InitialFn2d {
        &self.initial
    }

    pub fn source(&self) -> Option<&CoefficientFn2d> {
        self.source.as_ref()
    }
}

impl fmt::Debug for HeatData2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeatData2d")
            .field("has_source", &self.source.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`HeatData2d`]. Both diffusions and the initial condition are required.
#[derive(Default)]
pub struct HeatData2dBuilder {
    coefficients: [Option<CoefficientFn2d>; 6],
    initial: Option<InitialFn2d>,
    source: Option<CoefficientFn2d>,
}

impl HeatData2dBuilder {
    fn set(mut self, slot: usize, f: CoefficientFn2d) -> Self {
        self.coefficients[slot] = Some(f);
        self
    }

    /// Diffusion along x.
    pub fn a_coefficient(self, f: impl Fn(f64, f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.set(0, Arc::new(f))
    }

    /// Diffusion along y.
    pub fn b_coefficient(self, f: impl Fn(f64, f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.set(1, Arc::new(f))
    }

    /// Mixed `u_xy` term.
    pub fn c_coefficient(self, f: impl Fn(f64, f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.set(2, Arc::new(f))
    }

    /// Convection along x.
    pub fn d_coefficient(self, f: impl Fn(f64, f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.set(3, Arc::new(f))
    }

    /// Convection along y.
    pub fn e_coefficient(self, f: impl Fn(f64, f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.set(4, Arc::new(f))
    }

    /// Reaction.
    pub fn f_coefficient(self, f: impl Fn(f64, f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.set(5, Arc::new(f))
    }

    pub fn initial_condition(mut self, f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.initial = Some(Arc::new(f));
        self
    }

    pub fn source(mut self, f: impl Fn(f64, f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> Result<HeatData2d, FdError> {
        let [a, b, c, d, e, f] = self.coefficients;
        Ok(HeatData2d {
            a: required(a, "heat 2d a_coefficient")?,
            b: required(b, "heat 2d b_coefficient")?,
            c: c.unwrap_or_else(zero_2d),
            d: d.unwrap_or_else(zero_2d),
            e: e.unwrap_or_else(zero_2d),
            f: f.unwrap_or_else(zero_2d),
            initial: required(self.initial, "heat 2d initial_condition")?,
            source: self.source,
        })
    }
}

/// Data of `u_t = A u_xx + B u_yy + C u_zz + D u_xy + E u_xz + F u_yz + G u_x + H u_y + I u_z + J u + S`.
#[derive(Clone)]
pub struct HeatData3d {
    pub(crate) coefficients: [CoefficientFn3d; 10],
    pub(crate) initial: InitialFn3d,
    pub(crate) source: Option<CoefficientFn3d>,
}

impl HeatData3d {
    pub fn builder() -> HeatData3dBuilder {
        HeatData3dBuilder::default()
    }

    pub fn initial_condition(&self) -> &InitialFn3d {
        &self.initial
    }

    pub fn source(&self) -> Option<&CoefficientFn3d> {
        self.source.as_ref()
    }
}

impl fmt::Debug for HeatData3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeatData3d")
            .field("has_source", &self.source.is_some())
            .finish_non_exhaustive()
    }
}

/// Position of each term in [`HeatData3d`] coefficient order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term3d {
    DiffusionX = 0,
    DiffusionY = 1,
    DiffusionZ = 2,
    MixedXY = 3,
    MixedXZ = 4,
    MixedYZ = 5,
    ConvectionX = 6,
    ConvectionY = 7,
    ConvectionZ = 8,
    Reaction = 9,
}

/// Builder for [`HeatData3d`]. The three diffusions and the initial condition are required.
#[derive(Default)]
pub struct HeatData3dBuilder {
    coefficients: [Option<CoefficientFn3d>; 10],
    initial: Option<InitialFn3d>,
    source: Option<CoefficientFn3d>,
}

impl HeatData3dBuilder {
    pub fn term(mut self, term: Term3d, f: impl Fn(f64, f64, f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.coefficients[term as usize] = Some(Arc::new(f));
        self
    }

    pub fn initial_condition(mut self, f: impl Fn(f64, f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.initial = Some(Arc::new(f));
        self
    }

    pub fn source(mut self, f: impl Fn(f64, f64, f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> Result<HeatData3d, FdError> {
        for (term, name) in [
            (Term3d::DiffusionX, "x"),
            (Term3d::DiffusionY, "y"),
            (Term3d::DiffusionZ, "z"),
        ] {
            if self.coefficients[term as usize].is_none() {
                return Err(FdError::InvalidInput(format!(
                    "heat 3d diffusion along {name} is required"
                )));
            }
        }
        let coefficients = self.coefficients.map(|c| c.unwrap_or_else(zero_3d));
        Ok(HeatData3d {
            coefficients,
            initial: required(self.initial, "heat 3d initial_condition")?,
            source: self.source,
        })
    }
}

/// Data of `u_tt + A u_t = B u_xx + C u_x + D u + S` with `u(t0,x)` and `u_t(t0,x)`.
#[derive(Clone)]
pub struct WaveData1d {
    pub(crate) a: CoefficientFn1d,
    pub(crate) b: CoefficientFn1d,
    pub(crate) c: CoefficientFn1d,
    pub(crate) d: CoefficientFn1d,
    pub(crate) first_initial: InitialFn1d,
    pub(crate) second_initial: InitialFn1d,
    pub(crate) source: Option<CoefficientFn1d>,
}

impl WaveData1d {
    pub fn builder() -> WaveData1dBuilder {
        WaveData1dBuilder::default()
    }

    pub fn source(&self) -> Option<&CoefficientFn1d> {
        self.source.as_ref()
    }
}

impl fmt::Debug for WaveData1d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaveData1d")
            .field("has_source", &self.source.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`WaveData1d`]. `B` and both initial conditions are required.
#[derive(Default)]
pub struct WaveData1dBuilder {
    a: Option<CoefficientFn1d>,
    b: Option<CoefficientFn1d>,
    c: Option<CoefficientFn1d>,
    d: Option<CoefficientFn1d>,
    first_initial: Option<InitialFn1d>,
    second_initial: Option<InitialFn1d>,
    source: Option<CoefficientFn1d>,
}

impl WaveData1dBuilder {
    /// Damping `A(t, x)` on `u_t`.
    pub fn a_coefficient(mut self, f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.a = Some(Arc::new(f));
        self
    }

    /// Squared wave speed `B(t, x)`.
    pub fn b_coefficient(mut self, f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.b = Some(Arc::new(f));
        self
    }

    pub fn c_coefficient(mut self, f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.c = Some(Arc::new(f));
        self
    }

    pub fn d_coefficient(mut self, f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.d = Some(Arc::new(f));
        self
    }

    /// `u(t0, x)`.
    pub fn first_initial_condition(mut self, f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        self.first_initial = Some(Arc::new(f));
        self
    }

    /// `u_t(t0, x)`.
    pub fn second_initial_condition(mut self, f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        self.second_initial = Some(Arc::new(f));
        self
    }

    pub fn source(mut self, f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> Result<WaveData1d, FdError> {
        Ok(WaveData1d {
            a: self.a.unwrap_or_else(zero_1d),
            b: required(self.b, "wave b_coefficient")?,
            c: self.c.unwrap_or_else(zero_1d),
            d: self.d.unwrap_or_else(zero_1d),
            first_initial: required(self.first_initial, "wave first initial condition")?,
            second_initial: required(self.second_initial, "wave second initial condition")?,
            source: self.source,
        })
    }
}
