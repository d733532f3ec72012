//! Drives a three-level wave method across the time grid.

use nalgebra::DMatrix;

use crate::core::{ensure_len, FdError, TraverseDirection};
use crate::grid::{time_points, DiscretizationConfig1d};

use super::method::WaveMethod;

/// Marches `solution` (holding `u⁰`) with initial velocity `velocity`.
///
/// On return `solution` holds the last time slice.
pub fn run(
    method: &mut WaveMethod,
    config: &DiscretizationConfig1d,
    traverse: TraverseDirection,
    solution: &mut [f64],
    velocity: &[f64],
) -> Result<(), FdError> {
    march(method, config, traverse, solution, velocity, |_, _| {})
}

/// As [`run`], also copying every slice into row `time index` of `surface`.
pub fn run_with_stepping(
    method: &mut WaveMethod,
    config: &DiscretizationConfig1d,
    traverse: TraverseDirection,
    solution: &mut [f64],
    velocity: &[f64],
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
    for (j, v) in solution.iter().enumerate() {
        surface[(first, j)] = *v;
    }
    march(method, config, traverse, solution, velocity, |row, slice| {
        for (j, v) in slice.iter().enumerate() {
            surface[(row, j)] = *v;
        }
    })
}

fn march<F>(
    method: &mut WaveMethod,
    config: &DiscretizationConfig1d,
    traverse: TraverseDirection,
    solution: &mut [f64],
    velocity: &[f64],
    mut on_step: F,
) -> Result<(), FdError>
where
    F: FnMut(usize, &[f64]),
{
    let n = config.number_of_space_points();
    ensure_len("solution", solution.len(), n)?;
    ensure_len("velocity", velocity.len(), n)?;
    ensure_len("wave method", method.size(), n)?;
    let times = time_points(&config.time_range(), config.number_of_time_points());
    let steps = traverse.steps(times.len());
    log::debug!(
        "wave time loop: {:?}, {} steps of {:.3e}",
        traverse,
        steps.len(),
        config.time_step()
    );

    let mut steps = steps.into_iter();
    let Some((first_from, first_to)) = steps.next() else {
        return Ok(());
    };
    let mut previous = solution.to_vec();
    let mut next = vec![0.0; n];
    method.first_step(&previous, velocity, &mut next, times[first_from], times[first_to])?;
    on_step(first_to, &next);
    let mut current = next.clone();
    let mut t_prev = times[first_from];

    for (from, to) in steps {
        method.step(&previous, &current, &mut next, [t_prev, times[from], times[to]])?;
        log::trace!("wave step {} -> {} done", from, to);
        on_step(to, &next);
        std::mem::swap(&mut previous, &mut current);
        std::mem::swap(&mut current, &mut next);
        t_prev = times[from];
    }
    solution.copy_from_slice(&current);
    Ok(())
}
