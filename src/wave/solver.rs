use std::sync::Arc;

use nalgebra::DMatrix;

use crate::boundary::BoundaryPair1d;
use crate::core::{ensure_len, FdError};
use crate::grid::{of_space_1d, DiscretizationConfig1d, GridConfig1d, GridHints1d, GridTransform1d};
use crate::pde::{WaveData1d, WaveDataTransform1d, WaveScheme, WaveSolverConfig1d};
use crate::solvers::tridiagonal_solver;

use super::coefficients::WaveSchemeCoefficients;
use super::method::WaveMethod;
use super::time_loop;

/// 1D damped wave equation solver `u_tt + a u_t = b u_xx + c u_x + d u + S`.
#[derive(Debug, Clone)]
pub struct WaveSolver1d {
    discretization: DiscretizationConfig1d,
    transform: Arc<WaveDataTransform1d>,
    boundaries: BoundaryPair1d,
    config: WaveSolverConfig1d,
}

impl WaveSolver1d {
    pub fn new(
        data: WaveData1d,
        discretization: DiscretizationConfig1d,
        boundaries: BoundaryPair1d,
        hints: GridHints1d,
        config: WaveSolverConfig1d,
    ) -> Result<Self, FdError> {
        let grid = GridTransform1d::new(&discretization, &hints)?;
        Ok(Self {
            discretization,
            transform: Arc::new(WaveDataTransform1d::new(data, grid)),
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

    pub fn space_points(&self) -> Result<Vec<f64>, FdError> {
        let grid = GridConfig1d::new(self.discretization.number_of_space_points())?;
        let mut xs = vec![0.0; grid.size()];
        of_space_1d(&grid, self.grid_transform(), &mut xs)?;
        Ok(xs)
    }

    fn method(&self) -> Result<WaveMethod, FdError> {
        let coefficients = WaveSchemeCoefficients::new(self.transform.clone(), &self.discretization)?;
        let n = coefficients.size();
        let solver = match self.config.scheme {
            WaveScheme::Implicit => Some(tridiagonal_solver(self.config.tridiagonal, n, coefficients.h)?),
            WaveScheme::Explicit => {
                let courant = coefficients.courant_number(self.discretization.time_range().lower());
                if courant > 1.0 {
                    log::warn!("explicit wave step with Courant number {courant:.3} > 1 is unstable");
                }
                None
            }
        };
        log::debug!(
            "wave solver: {:?}, n = {}, k = {:.3e}, lambda = {:.3e}",
            self.config.scheme,
            n,
            coefficients.k,
            coefficients.lambda
        );
        WaveMethod::new(coefficients, self.boundaries.clone(), self.config.scheme, solver)
    }

    /// Fills the displacement and velocity initial slices.
    fn initial_slices(&self, solution: &mut [f64]) -> Result<Vec<f64>, FdError> {
        let grid = GridConfig1d::new(self.discretization.number_of_space_points())?;
        ensure_len("solution", solution.len(), grid.size())?;
        let mut velocity = vec![0.0; grid.size()];
        for i in 0..grid.size() {
            let zeta = grid.value_for(i);
            solution[i] = self.transform.first_initial_condition(zeta);
            velocity[i] = self.transform.second_initial_condition(zeta);
        }
        Ok(velocity)
    }

    pub fn solve(&self, solution: &mut [f64]) -> Result<(), FdError> {
        let velocity = self.initial_slices(solution)?;
        let mut method = self.method()?;
        time_loop::run(&mut method, &self.discretization, self.config.traverse, solution, &velocity)
    }

    /// As [`Self::solve`], also recording every slice; row = time index.
    pub fn solve_with_surface(&self, solution: &mut [f64], surface: &mut DMatrix<f64>) -> Result<(), FdError> {
        let velocity = self.initial_slices(solution)?;
        let mut method = self.method()?;
        time_loop::run_with_stepping(
            &mut method,
            &self.discretization,
            self.config.traverse,
            solution,
            &velocity,
            surface,
        )
    }
}
