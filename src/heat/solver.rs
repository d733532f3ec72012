use std::sync::Arc;

use nalgebra::DMatrix;

use crate::boundary::BoundaryPair1d;
use crate::core::{ensure_len, FdError};
use crate::grid::{of_space_1d, DiscretizationConfig1d, GridConfig1d, GridHints1d, GridTransform1d};
use crate::pde::{ExplicitScheme, HeatData1d, HeatDataTransform1d, HeatSolverConfig1d, SolverMethod};
use crate::solvers::tridiagonal_solver;

use super::coefficients::HeatSchemeCoefficients;
use super::explicit::ExplicitHeatMethod;
use super::implicit::ImplicitHeatMethod;
use super::time_loop::{self, HeatMethod};

/// 1D heat equation solver on a sinh-stretched grid.
///
/// ```rust
/// use openferric_pde::boundary::{Boundary1d, BoundaryPair1d};
/// use openferric_pde::core::Range;
/// use openferric_pde::grid::{DiscretizationConfig1d, GridHints1d};
/// use openferric_pde::heat::HeatSolver1d;
/// use openferric_pde::pde::{HeatData1d, HeatSolverConfig1d, ImplicitScheme};
///
/// let space = Range::new(0.0, 1.0).unwrap();
/// let discretization =
///     DiscretizationConfig1d::new(space, 51, Range::new(0.0, 1.0).unwrap(), 101).unwrap();
/// let data = HeatData1d::builder()
///     .a_coefficient(|_, _| 1.0)
///     .initial_condition(|_| 0.0)
///     .source(|_, _| 2.0)
///     .build()
///     .unwrap();
/// let solver = HeatSolver1d::new(
///     data,
///     discretization,
///     BoundaryPair1d::new(Boundary1d::dirichlet(0.0), Boundary1d::dirichlet(0.0)),
///     GridHints1d::uniform(&space),
///     HeatSolverConfig1d::implicit(ImplicitScheme::Euler),
/// )
/// .unwrap();
/// let mut u = vec![0.0; 51];
/// solver.solve(&mut u).unwrap();
/// assert!((u[25] - 0.25).abs() < 1e-2);
/// ```
#[derive(Debug, Clone)]
pub struct HeatSolver1d {
    discretization: DiscretizationConfig1d,
    transform: Arc<HeatDataTransform1d>,
    boundaries: BoundaryPair1d,
    config: HeatSolverConfig1d,
}

impl HeatSolver1d {
    pub fn new(
        data: HeatData1d,
        discretization: DiscretizationConfig1d,
        boundaries: BoundaryPair1d,
        hints: GridHints1d,
        config: HeatSolverConfig1d,
    ) -> Result<Self, FdError> {
        if let SolverMethod::Implicit(scheme) = config.method {
            scheme.validate()?;
        }
        let grid = GridTransform1d::new(&discretization, &hints)?;
        Ok(Self {
            discretization,
            transform: Arc::new(HeatDataTransform1d::new(data, grid)),
            boundaries,
            config,
        })
    }

    pub fn discretization(&self) -> &DiscretizationConfig1d {
        &self.discretization
    }

    pub fn grid_transform(&self) -> &GridTransform1d {
        self.transform.grid_transform()
    }

    /// Physical coordinates of the solution nodes.
    pub fn space_points(&self) -> Result<Vec<f64>, FdError> {
        let grid = GridConfig1d::new(self.discretization.number_of_space_points())?;
        let mut xs = vec![0.0; grid.size()];
        of_space_1d(&grid, self.grid_transform(), &mut xs)?;
        Ok(xs)
    }

    fn method(&self) -> Result<Box<dyn HeatMethod>, FdError> {
        let n = self.discretization.number_of_space_points();
        match self.config.method {
            SolverMethod::Implicit(scheme) => {
                let coefficients =
                    HeatSchemeCoefficients::new(self.transform.clone(), &self.discretization, scheme.theta())?;
                let solver = tridiagonal_solver(self.config.tridiagonal, n, coefficients.h)?;
                log::debug!(
                    "implicit heat solver: {:?}, n = {}, k = {:.3e}, lambda = {:.3e}",
                    scheme,
                    n,
                    coefficients.k,
                    coefficients.lambda
                );
                Ok(Box::new(ImplicitHeatMethod::new(
                    coefficients,
                    self.boundaries.clone(),
                    solver,
                )?))
            }
            SolverMethod::Explicit(scheme) => {
                let coefficients =
                    HeatSchemeCoefficients::new(self.transform.clone(), &self.discretization, 0.0)?;
                let t0 = self.discretization.time_range().lower();
                let ratio = coefficients.stability_ratio(t0);
                if matches!(scheme, ExplicitScheme::Euler) && ratio >= 0.5 {
                    log::warn!(
                        "explicit Euler heat step with lambda * max(a) = {ratio:.3} >= 0.5 is unstable"
                    );
                }
                log::debug!("explicit heat solver: {:?}, n = {}, k = {:.3e}", scheme, n, coefficients.k);
                Ok(Box::new(ExplicitHeatMethod::new(
                    coefficients,
                    self.boundaries.clone(),
                    scheme,
                )))
            }
        }
    }

    /// Fills `solution` with the initial (or terminal) condition.
    pub fn initialise(&self, solution: &mut [f64]) -> Result<(), FdError> {
        let grid = GridConfig1d::new(self.discretization.number_of_space_points())?;
        ensure_len("solution", solution.len(), grid.size())?;
        for (i, v) in solution.iter_mut().enumerate() {
            *v = self.transform.initial_condition(grid.value_for(i));
        }
        Ok(())
    }

    /// Solves from the initial condition; `solution` holds the final time slice.
    pub fn solve(&self, solution: &mut [f64]) -> Result<(), FdError> {
        self.initialise(solution)?;
        self.resume(solution)
    }

    /// Marches an already-populated `solution` through the whole time grid.
    pub fn resume(&self, solution: &mut [f64]) -> Result<(), FdError> {
        let mut method = self.method()?;
        time_loop::run(method.as_mut(), &self.discretization, self.config.traverse, solution)
    }

    /// As [`Self::solve`], also recording every slice; row = time index.
    pub fn solve_with_surface(&self, solution: &mut [f64], surface: &mut DMatrix<f64>) -> Result<(), FdError> {
        self.initialise(solution)?;
        let mut method = self.method()?;
        time_loop::run_with_stepping(
            method.as_mut(),
            &self.discretization,
            self.config.traverse,
            solution,
            surface,
        )
    }
}
