//! 3D heat equation with mixed derivatives, solved by the Douglas ADI scheme.

pub mod boundary;
pub mod coefficients;
pub mod douglas;
pub mod solver;
pub mod time_loop;

pub use boundary::HeatBoundaries3d;
pub use coefficients::HeatSchemeCoefficients3d;
pub use douglas::DouglasMethod3d;
pub use solver::HeatSolver3d;
pub use time_loop::{run, run_with_stepping};
