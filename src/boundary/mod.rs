//! Dirichlet, Neumann and Robin boundary conditions in 1D, 2D and 3D.
//!
//! Conditions are stated along the axis direction in physical coordinates:
//! Neumann prescribes `∂u/∂x = g`, Robin prescribes `∂u/∂x + β·u = g`.
//! Every consumer resolves a [`Boundary`] into a [`BoundaryCondition`] and
//! matches it exhaustively.

use std::fmt;
use std::sync::Arc;

pub mod transform;

pub use transform::{to_computational, to_computational_lower, to_computational_upper};

/// Boundary variant over a value provider `V`.
#[derive(Clone)]
pub enum Boundary<V> {
    /// Prescribed value.
    Dirichlet(V),
    /// Prescribed first derivative.
    Neumann(V),
    /// `u' + linear·u = value`.
    Robin { linear: V, value: V },
}

impl<V> Boundary<V> {
    /// Resolves the providers with `eval` into plain numbers.
    pub fn resolve_with(&self, eval: impl Fn(&V) -> f64) -> BoundaryCondition {
        match self {
            Self::Dirichlet(v) => BoundaryCondition::Dirichlet(eval(v)),
            Self::Neumann(v) => BoundaryCondition::Neumann(eval(v)),
            Self::Robin { linear, value } => BoundaryCondition::Robin {
                linear: eval(linear),
                value: eval(value),
            },
        }
    }

    pub fn is_dirichlet(&self) -> bool {
        matches!(self, Self::Dirichlet(_))
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Dirichlet(_) => "Dirichlet",
            Self::Neumann(_) => "Neumann",
            Self::Robin { .. } => "Robin",
        }
    }
}

impl<V> fmt::Debug for Boundary<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// A boundary evaluated at one time (and transverse position).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCondition {
    Dirichlet(f64),
    Neumann(f64),
    Robin { linear: f64, value: f64 },
}

impl BoundaryCondition {
    /// Prescribed value of a Dirichlet condition.
    #[inline]
    pub fn dirichlet_value(&self) -> Option<f64> {
        match *self {
            Self::Dirichlet(g) => Some(g),
            Self::Neumann(_) | Self::Robin { .. } => None,
        }
    }
}

/// Value provider of a 1D boundary: a constant or a function of time.
#[derive(Clone)]
pub enum BoundaryValue1d {
    Constant(f64),
    TimeDependent(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl BoundaryValue1d {
    #[inline]
    fn at(&self, time: f64) -> f64 {
        match self {
            Self::Constant(v) => *v,
            Self::TimeDependent(f) => f(time),
        }
    }

    fn is_time_dependent(&self) -> bool {
        matches!(self, Self::TimeDependent(_))
    }
}

/// Boundary of a 1D problem.
pub type Boundary1d = Boundary<BoundaryValue1d>;

/// Boundary function `(t, s) -> value` along one side of a 2D domain.
pub type BoundaryFn2d = Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>;
/// Boundary of a 2D problem; `s` is the physical coordinate along the side.
pub type Boundary2d = Boundary<BoundaryFn2d>;

/// Boundary function `(t, s1, s2) -> value` on one face of a 3D domain.
pub type BoundaryFn3d = Arc<dyn Fn(f64, f64, f64) -> f64 + Send + Sync>;
/// Boundary of a 3D problem; `s1, s2` are the remaining physical coordinates in axis order.
pub type Boundary3d = Boundary<BoundaryFn3d>;

impl Boundary<BoundaryValue1d> {
    pub fn dirichlet(value: f64) -> Self {
        Self::Dirichlet(BoundaryValue1d::Constant(value))
    }

    pub fn neumann(value: f64) -> Self {
        Self::Neumann(BoundaryValue1d::Constant(value))
    }

    pub fn robin(linear: f64, value: f64) -> Self {
        Self::Robin {
            linear: BoundaryValue1d::Constant(linear),
            value: BoundaryValue1d::Constant(value),
        }
    }

    pub fn dirichlet_fn(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::Dirichlet(BoundaryValue1d::TimeDependent(Arc::new(f)))
    }

    pub fn neumann_fn(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::Neumann(BoundaryValue1d::TimeDependent(Arc::new(f)))
    }

    pub fn robin_fn(
        linear: impl Fn(f64) -> f64 + Send + Sync + 'static,
        value: impl Fn(f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self::Robin {
            linear: BoundaryValue1d::TimeDependent(Arc::new(linear)),
            value: BoundaryValue1d::TimeDependent(Arc::new(value)),
        }
    }

    pub fn is_time_dependent(&self) -> bool {
        match self {
            Self::Dirichlet(v) | Self::Neumann(v) => v.is_time_dependent(),
            Self::Robin { linear, value } => linear.is_time_dependent() || value.is_time_dependent(),
        }
    }

    /// Condition of a time-independent boundary.
    ///
    /// # Panics
    /// If the boundary is time-dependent.
    pub fn value(&self) -> BoundaryCondition {
        assert!(
            !self.is_time_dependent(),
            "value() called on a time-dependent {:?} boundary",
            self
        );
        self.resolve_with(|v| v.at(0.0))
    }

    /// Condition of a time-dependent boundary at `time`.
    ///
    /// # Panics
    /// If the boundary is time-independent.
    pub fn value_at(&self, time: f64) -> BoundaryCondition {
        assert!(
            self.is_time_dependent(),
            "value_at() called on a time-independent {:?} boundary",
            self
        );
        self.resolve_with(|v| v.at(time))
    }

    /// Dispatches to [`Self::value`] or [`Self::value_at`] on the time-dependence flag.
    pub fn condition_at(&self, time: f64) -> BoundaryCondition {
        if self.is_time_dependent() {
            self.value_at(time)
        } else {
            self.value()
        }
    }
}

impl Boundary<BoundaryFn2d> {
    pub fn dirichlet(f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::Dirichlet(Arc::new(f))
    }

    pub fn neumann(f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::Neumann(Arc::new(f))
    }

    pub fn robin(
        linear: impl Fn(f64, f64) -> f64 + Send + Sync + 'static,
        value: impl Fn(f64, f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self::Robin {
            linear: Arc::new(linear),
            value: Arc::new(value),
        }
    }

    #[inline]
    pub fn condition_at(&self, time: f64, s: f64) -> BoundaryCondition {
        self.resolve_with(|f| f(time, s))
    }
}

impl Boundary<BoundaryFn3d> {
    pub fn dirichlet(f: impl Fn(f64, f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::Dirichlet(Arc::new(f))
    }

    pub fn neumann(f: impl Fn(f64, f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::Neumann(Arc::new(f))
    }

    pub fn robin(
        linear: impl Fn(f64, f64, f64) -> f64 + Send + Sync + 'static,
        value: impl Fn(f64, f64, f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self::Robin {
            linear: Arc::new(linear),
            value: Arc::new(value),
        }
    }

    #[inline]
    pub fn condition_at(&self, time: f64, s1: f64, s2: f64) -> BoundaryCondition {
        self.resolve_with(|f| f(time, s1, s2))
    }
}

/// Ordered `(lower, upper)` boundaries of one axis.
#[derive(Clone)]
pub struct BoundaryPair<V> {
    pub lower: Boundary<V>,
    pub upper: Boundary<V>,
}

impl<V> BoundaryPair<V> {
    pub fn new(lower: Boundary<V>, upper: Boundary<V>) -> Self {
        Self { lower, upper }
    }
}

impl<V> fmt::Debug for BoundaryPair<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.lower, self.upper)
    }
}

pub type BoundaryPair1d = BoundaryPair<BoundaryValue1d>;
pub type BoundaryPair2d = BoundaryPair<BoundaryFn2d>;
pub type BoundaryPair3d = BoundaryPair<BoundaryFn3d>;
