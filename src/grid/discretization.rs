//! Materialises physical grids and grid functions into containers.

use nalgebra::DMatrix;

use crate::core::{ensure_len, FdError, Range};

use super::config::{GridConfig1d, GridConfig2d, GridConfig3d};
use super::transform::{GridTransform1d, GridTransform2d, GridTransform3d};

/// Physical coordinates `x(ζ_i)` of every grid point.
pub fn of_space_1d(
    grid: &GridConfig1d,
    transform: &GridTransform1d,
    out: &mut [f64],
) -> Result<(), FdError> {
    of_function_1d(grid, transform, |x| x, out)
}

/// Fills `out[i] = f(x(ζ_i))`.
pub fn of_function_1d<F>(
    grid: &GridConfig1d,
    transform: &GridTransform1d,
    f: F,
    out: &mut [f64],
) -> Result<(), FdError>
where
    F: Fn(f64) -> f64,
{
    ensure_len("1d container", out.len(), grid.size())?;
    for (i, v) in out.iter_mut().enumerate() {
        *v = f(transform.value_for(grid.value_for(i)));
    }
    Ok(())
}

/// Fills `out[i] = f(t, x(ζ_i))`.
pub fn of_time_function_1d<F>(
    grid: &GridConfig1d,
    transform: &GridTransform1d,
    time: f64,
    f: F,
    out: &mut [f64],
) -> Result<(), FdError>
where
    F: Fn(f64, f64) -> f64,
{
    of_function_1d(grid, transform, |x| f(time, x), out)
}

fn check_matrix(what: &str, m: &DMatrix<f64>, rows: usize, cols: usize) -> Result<(), FdError> {
    if m.nrows() != rows || m.ncols() != cols {
        return Err(FdError::InvalidInput(format!(
            "{what} is {}x{}, expected {rows}x{cols}",
            m.nrows(),
            m.ncols()
        )));
    }
    Ok(())
}

/// Fills `out[(i, j)] = f(x(ζ_i), y(η_j))`.
pub fn of_function_2d<F>(
    grid: &GridConfig2d,
    transform: &GridTransform2d,
    f: F,
    out: &mut DMatrix<f64>,
) -> Result<(), FdError>
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    let (n1, n2) = (grid.axis_1().size(), grid.axis_2().size());
    check_matrix("2d container", out, n1, n2)?;
    let fill_column = |j: usize, column: &mut [f64]| {
        let y = transform.axis_2().value_for(grid.axis_2().value_for(j));
        for (i, v) in column.iter_mut().enumerate() {
            *v = f(transform.axis_1().value_for(grid.axis_1().value_for(i)), y);
        }
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.as_mut_slice()
            .par_chunks_mut(n1)
            .enumerate()
            .for_each(|(j, column)| fill_column(j, column));
    }
    #[cfg(not(feature = "parallel"))]
    {
        out.as_mut_slice()
            .chunks_mut(n1)
            .enumerate()
            .for_each(|(j, column)| fill_column(j, column));
    }
    Ok(())
}

/// Fills layer `l` of `out` with `f(x(ζ_i), y(η_j), z(ξ_l))`.
pub fn of_function_3d<F>(
    grid: &GridConfig3d,
    transform: &GridTransform3d,
    f: F,
    out: &mut [DMatrix<f64>],
) -> Result<(), FdError>
where
    F: Fn(f64, f64, f64) -> f64 + Sync,
{
    let (n1, n2, n3) = (grid.axis_1().size(), grid.axis_2().size(), grid.axis_3().size());
    ensure_len("3d container layers", out.len(), n3)?;
    for layer in out.iter() {
        check_matrix("3d container layer", layer, n1, n2)?;
    }
    let fill_layer = |l: usize, layer: &mut DMatrix<f64>| {
        let z = transform.axis(2).value_for(grid.axis_3().value_for(l));
        for j in 0..n2 {
            let y = transform.axis(1).value_for(grid.axis_2().value_for(j));
            for i in 0..n1 {
                let x = transform.axis(0).value_for(grid.axis_1().value_for(i));
                layer[(i, j)] = f(x, y, z);
            }
        }
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.par_iter_mut()
            .enumerate()
            .for_each(|(l, layer)| fill_layer(l, layer));
    }
    #[cfg(not(feature = "parallel"))]
    {
        out.iter_mut()
            .enumerate()
            .for_each(|(l, layer)| fill_layer(l, layer));
    }
    Ok(())
}

/// Time grid `t0 + n·k` for `n = 0..points`.
pub fn time_points(range: &Range, points: usize) -> Vec<f64> {
    let k = range.spread() / (points.max(2) - 1) as f64;
    (0..points).map(|n| range.lower() + n as f64 * k).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridKind;
    use crate::grid::config::{DiscretizationConfig1d, DiscretizationConfig2d, GridHints1d, GridHints2d};
    use approx::assert_relative_eq;

    #[test]
    fn of_space_is_monotone_and_spans_the_range() {
        let cfg = DiscretizationConfig1d::new(
            Range::new(-2.0, 3.0).expect("space"),
            41,
            Range::new(0.0, 1.0).expect("time"),
            2,
        )
        .expect("config");
        let grid = GridConfig1d::new(41).expect("grid");
        let transform = GridTransform1d::new(&cfg, &GridHints1d::new(0.0, 2.0, GridKind::Nonuniform))
            .expect("transform");
        let mut xs = vec![0.0; 41];
        of_space_1d(&grid, &transform, &mut xs).expect("fill");
        assert_relative_eq!(xs[0], -2.0, epsilon = 1.0e-12);
        assert_relative_eq!(xs[40], 3.0, epsilon = 1.0e-12);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn of_function_rejects_wrong_container_size() {
        let cfg = DiscretizationConfig1d::new(
            Range::new(0.0, 1.0).expect("space"),
            11,
            Range::new(0.0, 1.0).expect("time"),
            2,
        )
        .expect("config");
        let grid = GridConfig1d::new(11).expect("grid");
        let transform =
            GridTransform1d::new(&cfg, &GridHints1d::uniform(&cfg.space_range())).expect("transform");
        let mut out = vec![0.0; 10];
        assert!(of_function_1d(&grid, &transform, |x| x, &mut out).is_err());
    }

    #[test]
    fn of_time_function_evaluates_at_the_given_time() {
        let cfg = DiscretizationConfig1d::new(
            Range::new(0.0, 1.0).expect("space"),
            6,
            Range::new(0.0, 1.0).expect("time"),
            2,
        )
        .expect("config");
        let grid = GridConfig1d::new(6).expect("grid");
        let transform =
            GridTransform1d::new(&cfg, &GridHints1d::uniform(&cfg.space_range())).expect("transform");
        let mut xs = vec![0.0; 6];
        let mut out = vec![0.0; 6];
        of_space_1d(&grid, &transform, &mut xs).expect("space");
        of_time_function_1d(&grid, &transform, 0.5, |t, x| t + x * x, &mut out).expect("fill");
        for (x, v) in xs.iter().zip(&out) {
            assert_relative_eq!(*v, 0.5 + x * x, epsilon = 1.0e-15);
        }
    }

    #[test]
    fn of_function_2d_fills_axis_major_matrix() {
        let cfg = DiscretizationConfig2d::new(
            (Range::new(0.0, 2.0).expect("x"), Range::new(0.0, 1.0).expect("y")),
            (5, 4),
            Range::new(0.0, 1.0).expect("time"),
            2,
        )
        .expect("config");
        let grid = GridConfig2d::new((5, 4)).expect("grid");
        let transform = GridTransform2d::new(&cfg, &GridHints2d::uniform(&cfg.space_ranges().0))
            .expect("transform");
        let mut out = DMatrix::zeros(5, 4);
        of_function_2d(&grid, &transform, |x, y| x + 10.0 * y, &mut out).expect("fill");
        assert_relative_eq!(out[(0, 0)], 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(out[(4, 3)], 12.0, epsilon = 1.0e-12);
        assert_relative_eq!(out[(4, 0)], 2.0, epsilon = 1.0e-12);
    }

    #[test]
    fn time_points_cover_both_ends() {
        let pts = time_points(&Range::new(1.0, 2.0).expect("time"), 5);
        assert_eq!(pts.len(), 5);
        assert_relative_eq!(pts[4], 2.0, epsilon = 1.0e-15);
    }
}
