//! Drives a heat method across the time grid.

use nalgebra::DMatrix;

use crate::core::{ensure_len, FdError, TraverseDirection};
use crate::grid::{time_points, DiscretizationConfig1d};

/// One-step heat update on the computational grid.
pub trait HeatMethod {
    fn size(&self) -> usize;

    /// Advances `solution` from time `from` to time `to`.
    ///
    /// Backward traversal passes `to < from`; the step length is `|to − from|`.
    fn step(&mut self, solution: &mut [f64], from: f64, to: f64) -> Result<(), FdError>;
}

/// Marches `solution` from the initial time index to the last one in `traverse` order.
pub fn run<M: HeatMethod + ?Sized>(
    method: &mut M,
    config: &DiscretizationConfig1d,
    traverse: TraverseDirection,
    solution: &mut [f64],
) -> Result<(), FdError> {
    march(method, config, traverse, solution, |_, _| {})
}

/// As [`run`], also copying every time slice into row `time index` of `surface`.
pub fn run_with_stepping<M: HeatMethod + ?Sized>(
    method: &mut M,
    config: &DiscretizationConfig1d,
    traverse: TraverseDirection,
    solution: &mut [f64],
    surface: &mut DMatrix<f64>,
) -> Result<(), FdError> {
    let n_t = config.number_of_time_points();
    if surface.nrows() != n_t || surface.ncols() != solution.len() {
        return Err(FdError::InvalidInput(format!(
            "surface is {}x{}, expected {}x{}",
            surface.nrows(),
            surface.ncols(),
            n_t,
            solution.len()
        )));
    }
    let first = traverse.initial_index(n_t);
    record(surface, first, solution);
    march(method, config, traverse, solution, |idx, slice| {
        record(surface, idx, slice)
    })
}

fn record(surface: &mut DMatrix<f64>, row: usize, slice: &[f64]) {
    for (j, v) in slice.iter().enumerate() {
        surface[(row, j)] = *v;
    }
}

fn march<M, F>(
    method: &mut M,
    config: &DiscretizationConfig1d,
    traverse: TraverseDirection,
    solution: &mut [f64],
    mut on_step: F,
) -> Result<(), FdError>
where
    M: HeatMethod + ?Sized,
    F: FnMut(usize, &[f64]),
{
    ensure_len("solution", solution.len(), config.number_of_space_points())?;
    ensure_len("heat method", method.size(), config.number_of_space_points())?;
    let times = time_points(&config.time_range(), config.number_of_time_points());
    let steps = traverse.steps(times.len());
    log::debug!(
        "heat time loop: {:?}, {} steps of {:.3e}",
        traverse,
        steps.len(),
        config.time_step()
    );
    for (from, to) in steps {
        method.step(solution, times[from], times[to])?;
        log::trace!("heat step {} -> {} done", from, to);
        on_step(to, solution);
    }
    Ok(())
}
