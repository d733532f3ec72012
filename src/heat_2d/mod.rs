//! 2D heat equation with mixed derivatives, solved by ADI splitting.

pub mod boundary;
pub mod coefficients;
pub mod solver;
pub mod splitting;
pub mod time_loop;

pub use boundary::{HeatBoundaries2d, HestonBoundaryTransform};
pub use coefficients::HeatSchemeCoefficients2d;
pub use solver::HeatSolver2d;
pub use splitting::SplittingMethod2d;
pub use time_loop::{run, run_with_stepping};
