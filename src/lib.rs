//! Finite-difference solvers for heat (diffusion) and wave equations in one, two
//! and three space dimensions, built for derivatives-pricing PDEs.
//!
//! Problems are posed in physical coordinates and solved on a uniform
//! computational grid over `[0, 1]^d`. A hyperbolic-sine grid transform maps the
//! computational grid onto the physical range, concentrating nodes around a
//! chosen point (typically the strike), and the PDE coefficients and boundary
//! conditions are rewritten by the chain rule so every stencil stays uniform.
//!
//! Supported equations:
//! - 1D heat `u_t = a u_xx + b u_x + c u + S` with θ-implicit (Euler, Crank-Nicolson)
//!   and explicit (Euler, Saulyev, Barakat-Clark) schemes.
//! - 1D damped wave `u_tt + a u_t = b u_xx + c u_x + d u + S` with explicit and
//!   implicit three-level schemes.
//! - 2D heat with a mixed derivative, ADI splitting (Douglas-Rachford, Craig-Sneyd,
//!   modified Craig-Sneyd, Hundsdorfer-Verwer) and a Heston-type degenerate edge.
//! - 3D heat with all mixed derivatives, Douglas ADI.
//!
//! Boundaries are Dirichlet, Neumann (`u_x = g`) or Robin (`u_x + βu = g`), constant
//! or time dependent. Linear systems go through the [`solvers::TridiagonalSolver`]
//! contract (Thomas LU or SOR), which eliminates the boundary rows.
//!
//! # Feature Flags
//! - `parallel`: evaluates 2D/3D grid functions with Rayon.
//!
//! # Quick Start
//! Steady state of `u_t = u_xx + 2` with zero Dirichlet ends:
//! ```rust
//! use openferric_pde::prelude::*;
//!
//! let space = Range::new(0.0, 1.0).unwrap();
//! let discretization =
//!     DiscretizationConfig1d::new(space, 101, Range::new(0.0, 2.0).unwrap(), 201).unwrap();
//! let data = HeatData1d::builder()
//!     .a_coefficient(|_, _| 1.0)
//!     .initial_condition(|_| 0.0)
//!     .source(|_, _| 2.0)
//!     .build()
//!     .unwrap();
//! let solver = HeatSolver1d::new(
//!     data,
//!     discretization,
//!     BoundaryPair1d::new(Boundary1d::dirichlet(0.0), Boundary1d::dirichlet(0.0)),
//!     GridHints1d::uniform(&space),
//!     HeatSolverConfig1d::default(),
//! )
//! .unwrap();
//! let mut u = vec![0.0; 101];
//! solver.solve(&mut u).unwrap();
//! // u(x) = x(1 - x)
//! assert!((u[50] - 0.25).abs() < 1.0e-3);
//! ```

pub mod boundary;
pub mod core;
pub mod grid;
pub mod heat;
pub mod heat_2d;
pub mod heat_3d;
pub mod output;
pub mod pde;
pub mod solvers;
pub mod wave;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::boundary::{
        Boundary1d, Boundary2d, Boundary3d, BoundaryCondition, BoundaryPair1d, BoundaryPair2d,
        BoundaryPair3d,
    };
    pub use crate::core::{FdError, GridKind, Range, TraverseDirection};
    pub use crate::grid::{
        DiscretizationConfig1d, DiscretizationConfig2d, DiscretizationConfig3d, GridHints1d,
        GridHints2d, GridHints3d,
    };
    pub use crate::heat::HeatSolver1d;
    pub use crate::heat_2d::{HeatBoundaries2d, HeatSolver2d, HestonBoundaryTransform};
    pub use crate::heat_3d::{HeatBoundaries3d, HeatSolver3d};
    pub use crate::pde::{
        ExplicitScheme, HeatData1d, HeatData2d, HeatData3d, HeatSolverConfig1d, ImplicitScheme,
        SplittingMethod, SplittingSolverConfig, Term3d, TridiagonalMethod, WaveData1d, WaveScheme,
        WaveSolverConfig1d,
    };
    pub use crate::wave::WaveSolver1d;
}
