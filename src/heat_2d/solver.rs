use std::fmt;
use std::sync::Arc;

use nalgebra::DMatrix;

use crate::core::FdError;
use crate::grid::{of_function_2d, DiscretizationConfig2d, GridConfig2d, GridHints2d, GridTransform2d};
use crate::pde::{HeatData2d, HeatDataTransform2d, InitialFn2d, SplittingSolverConfig};

use super::boundary::HeatBoundaries2d;
use super::coefficients::HeatSchemeCoefficients2d;
use super::splitting::SplittingMethod2d;
use super::time_loop;

/// 2D heat equation solver with ADI splitting.
///
/// The solution matrix has one row per axis-1 node and one column per
/// axis-2 node.
#[derive(Clone)]
pub struct HeatSolver2d {
    discretization: DiscretizationConfig2d,
    transform: Arc<HeatDataTransform2d>,
    initial: InitialFn2d,
    boundaries: HeatBoundaries2d,
    config: SplittingSolverConfig,
}

impl fmt::Debug for HeatSolver2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeatSolver2d")
            .field("discretization", &self.discretization)
            .field("boundaries", &self.boundaries)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HeatSolver2d {
    pub fn new(
        data: HeatData2d,
        discretization: DiscretizationConfig2d,
        boundaries: HeatBoundaries2d,
        hints: GridHints2d,
        config: SplittingSolverConfig,
    ) -> Result<Self, FdError> {
        config.validate()?;
        let grid = GridTransform2d::new(&discretization, &hints)?;
        let initial = data.initial_condition().clone();
        Ok(Self {
            discretization,
            transform: Arc::new(HeatDataTransform2d::new(data, grid)),
            initial,
            boundaries,
            config,
        })
    }

    pub fn discretization(&self) -> &DiscretizationConfig2d {
        &self.discretization
    }

    pub fn grid_transform(&self) -> &GridTransform2d {
        self.transform.grid_transform()
    }

    /// Physical nodes of axis 1 and axis 2.
    pub fn space_points(&self) -> Result<(Vec<f64>, Vec<f64>), FdError> {
        let grid = GridConfig2d::new(self.discretization.number_of_space_points())?;
        let t = self.grid_transform();
        let xs = (0..grid.axis_1().size())
            .map(|i| t.axis_1().value_for(grid.axis_1().value_for(i)))
            .collect();
        let ys = (0..grid.axis_2().size())
            .map(|j| t.axis_2().value_for(grid.axis_2().value_for(j)))
            .collect();
        Ok((xs, ys))
    }

    pub fn initialise(&self, solution: &mut DMatrix<f64>) -> Result<(), FdError> {
        let grid = GridConfig2d::new(self.discretization.number_of_space_points())?;
        let initial = &self.initial;
        of_function_2d(&grid, self.grid_transform(), |x, y| initial(x, y), solution)
    }

    fn method(&self) -> Result<SplittingMethod2d, FdError> {
        let scheme = HeatSchemeCoefficients2d::new(self.transform.clone(), &self.discretization)?;
        log::debug!(
            "2d heat solver: {:?}, theta = {}, grid {:?}, k = {:.3e}",
            self.config.splitting,
            self.config.weighting,
            scheme.shape(),
            scheme.k
        );
        SplittingMethod2d::new(scheme, self.boundaries.clone(), &self.config)
    }

    pub fn solve(&self, solution: &mut DMatrix<f64>) -> Result<(), FdError> {
        self.initialise(solution)?;
        let mut method = self.method()?;
        time_loop::run(&mut method, &self.discretization, self.config.traverse, solution)
    }

    /// As [`Self::solve`], also recording `surfaces[time index]`.
    pub fn solve_with_surfaces(
        &self,
        solution: &mut DMatrix<f64>,
        surfaces: &mut [DMatrix<f64>],
    ) -> Result<(), FdError> {
        self.initialise(solution)?;
        let mut method = self.method()?;
        time_loop::run_with_stepping(
            &mut method,
            &self.discretization,
            self.config.traverse,
            solution,
            surfaces,
        )
    }
}
