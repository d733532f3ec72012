use nalgebra::DMatrix;

use crate::core::{ensure_len, FdError, TraverseDirection};
use crate::grid::{time_points, DiscretizationConfig3d};

use super::douglas::DouglasMethod3d;

pub fn run(
    method: &mut DouglasMethod3d,
    config: &DiscretizationConfig3d,
    traverse: TraverseDirection,
    solution: &mut [DMatrix<f64>],
) -> Result<(), FdError> {
    march(method, config, traverse, solution, |_, _| {})
}

/// As [`run`], also copying every slice into `history[time index]`.
pub fn run_with_stepping(
    method: &mut DouglasMethod3d,
    config: &DiscretizationConfig3d,
    traverse: TraverseDirection,
    solution: &mut [DMatrix<f64>],
    history: &mut [Vec<DMatrix<f64>>],
) -> Result<(), FdError> {
    let n_t = config.number_of_time_points();
    ensure_len("recorded slices", history.len(), n_t)?;
    for slice in history.iter() {
        ensure_len("recorded slice layers", slice.len(), solution.len())?;
    }
    copy_layers(&mut history[traverse.initial_index(n_t)], solution)?;
    let mut result = Ok(());
    march(method, config, traverse, solution, |idx, layers| {
        if result.is_ok() {
            result = copy_layers(&mut history[idx], layers);
        }
    })?;
    result
}

fn copy_layers(target: &mut [DMatrix<f64>], source: &[DMatrix<f64>]) -> Result<(), FdError> {
    for (t, s) in target.iter_mut().zip(source) {
        if t.shape() != s.shape() {
            return Err(FdError::InvalidInput(format!(
                "recorded layer is {}x{}, expected {}x{}",
                t.nrows(),
                t.ncols(),
                s.nrows(),
                s.ncols()
            )));
        }
        t.copy_from(s);
    }
    Ok(())
}

fn march<F>(
    method: &mut DouglasMethod3d,
    config: &DiscretizationConfig3d,
    traverse: TraverseDirection,
    solution: &mut [DMatrix<f64>],
    mut on_step: F,
) -> Result<(), FdError>
where
    F: FnMut(usize, &[DMatrix<f64>]),
{
    let (n1, n2, n3) = config.number_of_space_points();
    if method.shape() != [n1, n2, n3] {
        return Err(FdError::InvalidInput(
            "Douglas method and discretization disagree on the grid".to_string(),
        ));
    }
    let times = time_points(&config.time_range(), config.number_of_time_points());
    let steps = traverse.steps(times.len());
    log::debug!(
        "3d heat time loop: {:?}, {} steps of {:.3e}",
        traverse,
        steps.len(),
        config.time_step()
    );
    for (from, to) in steps {
        method.step(solution, times[from], times[to])?;
        log::trace!("3d heat step {} -> {} done", from, to);
        on_step(to, solution);
    }
    Ok(())
}
