use std::fmt;
use std::sync::Arc;

use nalgebra::DMatrix;

use crate::core::FdError;
use crate::grid::{of_function_3d, DiscretizationConfig3d, GridConfig3d, GridHints3d, GridTransform3d};
use crate::pde::{HeatData3d, HeatDataTransform3d, InitialFn3d, SplittingMethod, SplittingSolverConfig};

use super::boundary::HeatBoundaries3d;
use super::coefficients::HeatSchemeCoefficients3d;
use super::douglas::DouglasMethod3d;
use super::time_loop;

/// 3D heat equation solver using the Douglas scheme.
///
/// The solution is one `n1 × n2` matrix per axis-3 node.
#[derive(Clone)]
pub struct HeatSolver3d {
    discretization: DiscretizationConfig3d,
    transform: Arc<HeatDataTransform3d>,
    initial: InitialFn3d,
    boundaries: HeatBoundaries3d,
    config: SplittingSolverConfig,
}

impl fmt::Debug for HeatSolver3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeatSolver3d")
            .field("discretization", &self.discretization)
            .field("boundaries", &self.boundaries)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HeatSolver3d {
    pub fn new(
        data: HeatData3d,
        discretization: DiscretizationConfig3d,
        boundaries: HeatBoundaries3d,
        hints: GridHints3d,
        config: SplittingSolverConfig,
    ) -> Result<Self, FdError> {
        config.validate()?;
        if config.splitting != SplittingMethod::DouglasRachford {
            return Err(FdError::InvalidInput(format!(
                "3d heat solver supports Douglas-Rachford splitting only, got {:?}",
                config.splitting
            )));
        }
        let grid = GridTransform3d::new(&discretization, &hints)?;
        let initial = data.initial_condition().clone();
        Ok(Self {
            discretization,
            transform: Arc::new(HeatDataTransform3d::new(data, grid)),
            initial,
            boundaries,
            config,
        })
    }

    pub fn discretization(&self) -> &DiscretizationConfig3d {
        &self.discretization
    }

    pub fn grid_transform(&self) -> &GridTransform3d {
        self.transform.grid_transform()
    }

    /// Zeroed layers of the right shape.
    pub fn layers(&self) -> Vec<DMatrix<f64>> {
        let (n1, n2, n3) = self.discretization.number_of_space_points();
        vec![DMatrix::zeros(n1, n2); n3]
    }

    pub fn initialise(&self, solution: &mut [DMatrix<f64>]) -> Result<(), FdError> {
        let grid = GridConfig3d::new(self.discretization.number_of_space_points())?;
        let initial = &self.initial;
        of_function_3d(&grid, self.grid_transform(), |x, y, z| initial(x, y, z), solution)
    }

    fn method(&self) -> Result<DouglasMethod3d, FdError> {
        let scheme = HeatSchemeCoefficients3d::new(self.transform.clone(), &self.discretization)?;
        log::debug!(
            "3d heat solver: theta = {}, grid {:?}, k = {:.3e}",
            self.config.weighting,
            scheme.shape(),
            scheme.k
        );
        DouglasMethod3d::new(scheme, self.boundaries.clone(), &self.config)
    }

    pub fn solve(&self, solution: &mut [DMatrix<f64>]) -> Result<(), FdError> {
        self.initialise(solution)?;
        let mut method = self.method()?;
        time_loop::run(&mut method, &self.discretization, self.config.traverse, solution)
    }

    /// As [`Self::solve`], also recording `history[time index]`.
    pub fn solve_with_history(
        &self,
        solution: &mut [DMatrix<f64>],
        history: &mut [Vec<DMatrix<f64>>],
    ) -> Result<(), FdError> {
        self.initialise(solution)?;
        let mut method = self.method()?;
        time_loop::run_with_stepping(
            &mut method,
            &self.discretization,
            self.config.traverse,
            solution,
            history,
        )
    }
}
