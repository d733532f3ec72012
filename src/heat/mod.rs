//! 1D heat equation: scheme coefficients, implicit and explicit methods, time loops.

pub mod coefficients;
pub mod explicit;
pub mod implicit;
pub mod solver;
pub mod time_loop;

pub use coefficients::HeatSchemeCoefficients;
pub use explicit::ExplicitHeatMethod;
pub use implicit::ImplicitHeatMethod;
pub use solver::HeatSolver1d;
pub use time_loop::{run, run_with_stepping, HeatMethod};
