//! Comma-separated section writers.
//!
//! Each dump is a sequence of headed sections (`SPACE_POINTS`, `TIME_POINTS`,
//! `VALUES`, or `SPACE_POINTS_X` / `SPACE_POINTS_Y` in 2D), one line of
//! comma-separated numbers per row. Space points are physical coordinates.

use std::io::Write;

use nalgebra::DMatrix;

use crate::core::{ensure_len, FdError};
use crate::grid::{
    of_space_1d, time_points, DiscretizationConfig1d, DiscretizationConfig2d, GridConfig1d, GridConfig2d,
    GridHints1d, GridHints2d, GridTransform1d, GridTransform2d,
};

fn write_row<W: Write>(out: &mut W, values: impl IntoIterator<Item = f64>) -> Result<(), FdError> {
    let mut first = true;
    for v in values {
        if !first {
            out.write_all(b",")?;
        }
        write!(out, "{v}")?;
        first = false;
    }
    out.write_all(b"\n")?;
    Ok(())
}

fn space_points_1d(config: &DiscretizationConfig1d, hints: &GridHints1d) -> Result<Vec<f64>, FdError> {
    let grid = GridConfig1d::new(config.number_of_space_points())?;
    let transform = GridTransform1d::new(config, hints)?;
    let mut xs = vec![0.0; grid.size()];
    of_space_1d(&grid, &transform, &mut xs)?;
    Ok(xs)
}

/// `SPACE_POINTS` and `VALUES` of a single 1D slice.
pub fn write_solution_1d<W: Write>(
    out: &mut W,
    config: &DiscretizationConfig1d,
    hints: &GridHints1d,
    solution: &[f64],
) -> Result<(), FdError> {
    ensure_len("solution", solution.len(), config.number_of_space_points())?;
    writeln!(out, "SPACE_POINTS")?;
    write_row(out, space_points_1d(config, hints)?)?;
    writeln!(out, "VALUES")?;
    write_row(out, solution.iter().copied())
}

/// `SPACE_POINTS`, `TIME_POINTS` and one `VALUES` row per time index.
pub fn write_surface_1d<W: Write>(
    out: &mut W,
    config: &DiscretizationConfig1d,
    hints: &GridHints1d,
    surface: &DMatrix<f64>,
) -> Result<(), FdError> {
    let (n_t, n) = (config.number_of_time_points(), config.number_of_space_points());
    if surface.shape() != (n_t, n) {
        return Err(FdError::InvalidInput(format!(
            "surface is {}x{}, expected {n_t}x{n}",
            surface.nrows(),
            surface.ncols()
        )));
    }
    writeln!(out, "SPACE_POINTS")?;
    write_row(out, space_points_1d(config, hints)?)?;
    writeln!(out, "TIME_POINTS")?;
    write_row(out, time_points(&config.time_range(), n_t))?;
    writeln!(out, "VALUES")?;
    for row in surface.row_iter() {
        write_row(out, row.iter().copied())?;
    }
    Ok(())
}

/// `SPACE_POINTS_X`, `SPACE_POINTS_Y` and one `VALUES` row per axis-1 node.
pub fn write_solution_2d<W: Write>(
    out: &mut W,
    config: &DiscretizationConfig2d,
    hints: &GridHints2d,
    solution: &DMatrix<f64>,
) -> Result<(), FdError> {
    let grid = GridConfig2d::new(config.number_of_space_points())?;
    let (n1, n2) = (grid.axis_1().size(), grid.axis_2().size());
    if solution.shape() != (n1, n2) {
        return Err(FdError::InvalidInput(format!(
            "solution is {}x{}, expected {n1}x{n2}",
            solution.nrows(),
            solution.ncols()
        )));
    }
    let transform = GridTransform2d::new(config, hints)?;
    writeln!(out, "SPACE_POINTS_X")?;
    write_row(
        out,
        (0..n1).map(|i| transform.axis_1().value_for(grid.axis_1().value_for(i))),
    )?;
    writeln!(out, "SPACE_POINTS_Y")?;
    write_row(
        out,
        (0..n2).map(|j| transform.axis_2().value_for(grid.axis_2().value_for(j))),
    )?;
    writeln!(out, "VALUES")?;
    for row in solution.row_iter() {
        write_row(out, row.iter().copied())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Range;

    #[test]
    fn solution_1d_has_space_and_value_sections() {
        let space = Range::new(0.0, 1.0).expect("space");
        let config = DiscretizationConfig1d::new(space, 3, Range::new(0.0, 1.0).expect("time"), 2)
            .expect("config");
        let mut buf = Vec::new();
        write_solution_1d(&mut buf, &config, &GridHints1d::uniform(&space), &[1.0, 2.0, 3.0])
            .expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "SPACE_POINTS");
        assert_eq!(lines[1].split(',').count(), 3);
        assert_eq!(lines[2], "VALUES");
        assert_eq!(lines[3], "1,2,3");
    }

    #[test]
    fn surface_1d_writes_one_row_per_time_point() {
        let space = Range::new(0.0, 1.0).expect("space");
        let config = DiscretizationConfig1d::new(space, 4, Range::new(0.0, 1.0).expect("time"), 3)
            .expect("config");
        let surface = DMatrix::from_fn(3, 4, |r, c| (r * 4 + c) as f64);
        let mut buf = Vec::new();
        write_surface_1d(&mut buf, &config, &GridHints1d::uniform(&space), &surface).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "TIME_POINTS");
        assert_eq!(lines[3], "0,0.5,1");
        assert_eq!(lines[4], "VALUES");
        assert_eq!(&lines[5..], &["0,1,2,3", "4,5,6,7", "8,9,10,11"]);
    }

    #[test]
    fn mismatched_surface_is_rejected() {
        let space = Range::new(0.0, 1.0).expect("space");
        let config = DiscretizationConfig1d::new(space, 4, Range::new(0.0, 1.0).expect("time"), 3)
            .expect("config");
        let mut buf = Vec::new();
        let err = write_surface_1d(&mut buf, &config, &GridHints1d::uniform(&space), &DMatrix::zeros(2, 4));
        assert!(matches!(err, Err(FdError::InvalidInput(_))));
    }
}
