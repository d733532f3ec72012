//! Drives an ADI method across the time grid.

use nalgebra::DMatrix;

use crate::core::{ensure_len, FdError, TraverseDirection};
use crate::grid::{time_points, DiscretizationConfig2d};

use super::splitting::SplittingMethod2d;

pub fn run(
    method: &mut SplittingMethod2d,
    config: &DiscretizationConfig2d,
    traverse: TraverseDirection,
    solution: &mut DMatrix<f64>,
) -> Result<(), FdError> {
    march(method, config, traverse, solution, |_, _| {})
}

/// As [`run`], also copying every slice into `surfaces[time index]`.
pub fn run_with_stepping(
    method: &mut SplittingMethod2d,
    config: &DiscretizationConfig2d,
    traverse: TraverseDirection,
    solution: &mut DMatrix<f64>,
    surfaces: &mut [DMatrix<f64>],
) -> Result<(), FdError> {
    let n_t = config.number_of_time_points();
    ensure_len("recorded surfaces", surfaces.len(), n_t)?;
    for s in surfaces.iter() {
        if s.shape() != solution.shape() {
            return Err(FdError::InvalidInput(format!(
                "recorded surface is {}x{}, expected {}x{}",
                s.nrows(),
                s.ncols(),
                solution.nrows(),
                solution.ncols()
            )));
        }
    }
    surfaces[traverse.initial_index(n_t)].copy_from(solution);
    march(method, config, traverse, solution, |idx, slice| {
        surfaces[idx].copy_from(slice)
    })
}

fn march<F>(
    method: &mut SplittingMethod2d,
    config: &DiscretizationConfig2d,
    traverse: TraverseDirection,
    solution: &mut DMatrix<f64>,
    mut on_step: F,
) -> Result<(), FdError>
where
    F: FnMut(usize, &DMatrix<f64>),
{
    if method.shape() != config.number_of_space_points() {
        return Err(FdError::InvalidInput(
            "splitting method and discretization disagree on the grid".to_string(),
        ));
    }
    let times = time_points(&config.time_range(), config.number_of_time_points());
    let steps = traverse.steps(times.len());
    log::debug!(
        "2d heat time loop: {:?} with {:?}, {} steps of {:.3e}",
        traverse,
        method.splitting(),
        steps.len(),
        config.time_step()
    );
    for (from, to) in steps {
        method.step(solution, times[from], times[to])?;
        log::trace!("2d heat step {} -> {} done", from, to);
        on_step(to, solution);
    }
    Ok(())
}
