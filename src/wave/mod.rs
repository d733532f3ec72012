//! 1D damped wave equation with explicit and implicit three-level schemes.

pub mod coefficients;
pub mod method;
pub mod solver;
pub mod time_loop;

pub use coefficients::WaveSchemeCoefficients;
pub use method::WaveMethod;
pub use solver::WaveSolver1d;
pub use time_loop::{run, run_with_stepping};
