//! Linear-system plumbing shared by the time-stepping methods.

pub mod line;
pub mod stencil;
pub mod tridiagonal;

pub use line::LineSystem;
pub use stencil::{apply_line, lower_ghost, upper_ghost, StencilWeights};
pub use tridiagonal::{tridiagonal_solver, SorSolver, ThomasLuSolver, TridiagonalSolver};
