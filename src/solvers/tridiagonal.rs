//! Tridiagonal systems with boundary-row elimination.
//!
//! Bands are assembled for every node including both ends, as if ghost nodes
//! existed. [`TridiagonalSolver::solve`] then closes the system: a Dirichlet
//! end drops its row and moves the known value to the right-hand side, a
//! Neumann or Robin end folds the ghost node `u_{-1} = u_1 − 2h(g − β u_0)`
//! (mirrored at the upper end) into the boundary row.

use crate::boundary::BoundaryCondition;
use crate::core::{ensure_len, FdError, SINGULAR_PIVOT};
use crate::pde::TridiagonalMethod;

/// Linear solver for one tridiagonal line.
pub trait TridiagonalSolver: Send {
    /// Number of unknowns including both boundary nodes.
    fn size(&self) -> usize;

    /// `lower[i]` multiplies `u_{i-1}`, `upper[i]` multiplies `u_{i+1}`.
    fn set_diagonals(&mut self, lower: &[f64], diagonal: &[f64], upper: &[f64]) -> Result<(), FdError>;

    fn set_rhs(&mut self, rhs: &[f64]) -> Result<(), FdError>;

    /// Solves under the given end conditions, overwriting `solution`.
    ///
    /// Iterative solvers use the incoming `solution` as their first guess.
    fn solve(
        &mut self,
        lower: BoundaryCondition,
        upper: BoundaryCondition,
        solution: &mut [f64],
    ) -> Result<(), FdError>;
}

/// Builds the solver selected by `method` for lines of `size` nodes spaced `space_step` apart.
pub fn tridiagonal_solver(
    method: TridiagonalMethod,
    size: usize,
    space_step: f64,
) -> Result<Box<dyn TridiagonalSolver>, FdError> {
    match method {
        TridiagonalMethod::ThomasLu => Ok(Box::new(ThomasLuSolver::new(size, space_step)?)),
        TridiagonalMethod::Sor {
            omega,
            tolerance,
            max_iterations,
        } => Ok(Box::new(SorSolver::new(
            size,
            space_step,
            omega,
            tolerance,
            max_iterations,
        )?)),
    }
}

/// Bands and right-hand side shared by every solver.
#[derive(Debug, Clone)]
struct BandedSystem {
    h: f64,
    lower: Vec<f64>,
    diagonal: Vec<f64>,
    upper: Vec<f64>,
    rhs: Vec<f64>,
    work_lower: Vec<f64>,
    work_diagonal: Vec<f64>,
    work_upper: Vec<f64>,
    work_rhs: Vec<f64>,
}

impl BandedSystem {
    fn new(size: usize, h: f64) -> Result<Self, FdError> {
        if size < 3 {
            return Err(FdError::InvalidInput(format!(
                "tridiagonal system needs >= 3 nodes, got {size}"
            )));
        }
        if !h.is_finite() || h <= 0.0 {
            return Err(FdError::InvalidInput(format!(
                "space step must be finite and > 0, got {h}"
            )));
        }
        Ok(Self {
            h,
            lower: vec![0.0; size],
            diagonal: vec![0.0; size],
            upper: vec![0.0; size],
            rhs: vec![0.0; size],
            work_lower: vec![0.0; size],
            work_diagonal: vec![0.0; size],
            work_upper: vec![0.0; size],
            work_rhs: vec![0.0; size],
        })
    }

    fn size(&self) -> usize {
        self.diagonal.len()
    }

    fn set_diagonals(&mut self, lower: &[f64], diagonal: &[f64], upper: &[f64]) -> Result<(), FdError> {
        let n = self.size();
        ensure_len("lower band", lower.len(), n)?;
        ensure_len("diagonal", diagonal.len(), n)?;
        ensure_len("upper band", upper.len(), n)?;
        self.lower.copy_from_slice(lower);
        self.diagonal.copy_from_slice(diagonal);
        self.upper.copy_from_slice(upper);
        Ok(())
    }

    fn set_rhs(&mut self, rhs: &[f64]) -> Result<(), FdError> {
        ensure_len("right-hand side", rhs.len(), self.size())?;
        self.rhs.copy_from_slice(rhs);
        Ok(())
    }

    /// Copies the system into the work buffers, closes both ends and
    /// returns the half-open range of rows left to solve.
    fn close(
        &mut self,
        lower: BoundaryCondition,
        upper: BoundaryCondition,
        solution: &mut [f64],
    ) -> Result<(usize, usize), FdError> {
        let n = self.size();
        ensure_len("solution", solution.len(), n)?;
        self.work_lower.copy_from_slice(&self.lower);
        self.work_diagonal.copy_from_slice(&self.diagonal);
        self.work_upper.copy_from_slice(&self.upper);
        self.work_rhs.copy_from_slice(&self.rhs);

        let start = match lower {
            BoundaryCondition::Dirichlet(g) => {
                solution[0] = g;
                self.work_rhs[1] -= self.work_lower[1] * g;
                1
            }
            BoundaryCondition::Neumann(g) => {
                self.fold_lower_ghost(0.0, g);
                0
            }
            BoundaryCondition::Robin { linear, value } => {
                self.fold_lower_ghost(linear, value);
                0
            }
        };
        let end = match upper {
            BoundaryCondition::Dirichlet(g) => {
                solution[n - 1] = g;
                self.work_rhs[n - 2] -= self.work_upper[n - 2] * g;
                n - 1
            }
            BoundaryCondition::Neumann(g) => {
                self.fold_upper_ghost(0.0, g);
                n
            }
            BoundaryCondition::Robin { linear, value } => {
                self.fold_upper_ghost(linear, value);
                n
            }
        };
        self.work_lower[start] = 0.0;
        self.work_upper[end - 1] = 0.0;
        Ok((start, end))
    }

    /// Row 0 with `u_{-1} = u_1 − 2h(g − β u_0)` substituted.
    fn fold_lower_ghost(&mut self, beta: f64, g: f64) {
        let two_h = 2.0 * self.h;
        let a0 = self.work_lower[0];
        self.work_diagonal[0] += two_h * beta * a0;
        self.work_upper[0] += a0;
        self.work_rhs[0] += two_h * g * a0;
    }

    /// Row `N−1` with `u_N = u_{N−2} + 2h(g − β u_{N−1})` substituted.
    fn fold_upper_ghost(&mut self, beta: f64, g: f64) {
        let two_h = 2.0 * self.h;
        let last = self.size() - 1;
        let c = self.work_upper[last];
        self.work_diagonal[last] -= two_h * beta * c;
        self.work_lower[last] += c;
        self.work_rhs[last] -= two_h * g * c;
    }
}

/// Direct Thomas (LU) elimination.
#[derive(Debug, Clone)]
pub struct ThomasLuSolver {
    system: BandedSystem,
    c_star: Vec<f64>,
    d_star: Vec<f64>,
}

impl ThomasLuSolver {
    pub fn new(size: usize, space_step: f64) -> Result<Self, FdError> {
        Ok(Self {
            system: BandedSystem::new(size, space_step)?,
            c_star: vec![0.0; size],
            d_star: vec![0.0; size],
        })
    }
}

impl TridiagonalSolver for ThomasLuSolver {
    fn size(&self) -> usize {
        self.system.size()
    }

    fn set_diagonals(&mut self, lower: &[f64], diagonal: &[f64], upper: &[f64]) -> Result<(), FdError> {
        self.system.set_diagonals(lower, diagonal, upper)
    }

    fn set_rhs(&mut self, rhs: &[f64]) -> Result<(), FdError> {
        self.system.set_rhs(rhs)
    }

    fn solve(
        &mut self,
        lower: BoundaryCondition,
        upper: BoundaryCondition,
        solution: &mut [f64],
    ) -> Result<(), FdError> {
        let (start, end) = self.system.close(lower, upper, solution)?;
        let s = &self.system;
        solve_tridiagonal_inplace(
            &s.work_lower[start..end],
            &s.work_diagonal[start..end],
            &s.work_upper[start..end],
            &s.work_rhs[start..end],
            &mut self.c_star[start..end],
            &mut self.d_star[start..end],
            &mut solution[start..end],
        )
    }
}

/// Successive over-relaxation (Gauss-Seidel for `omega = 1`).
#[derive(Debug, Clone)]
pub struct SorSolver {
    system: BandedSystem,
    omega: f64,
    tolerance: f64,
    max_iterations: usize,
}

impl SorSolver {
    /// `omega` must lie in `(0, 2)`.
    pub fn new(
        size: usize,
        space_step: f64,
        omega: f64,
        tolerance: f64,
        max_iterations: usize,
    ) -> Result<Self, FdError> {
        if !omega.is_finite() || omega <= 0.0 || omega >= 2.0 {
            return Err(FdError::InvalidInput(format!(
                "SOR omega must be in (0, 2), got {omega}"
            )));
        }
        if !tolerance.is_finite() || tolerance <= 0.0 || max_iterations == 0 {
            return Err(FdError::InvalidInput(
                "SOR tolerance must be > 0 and max_iterations >= 1".to_string(),
            ));
        }
        Ok(Self {
            system: BandedSystem::new(size, space_step)?,
            omega,
            tolerance,
            max_iterations,
        })
    }
}

impl TridiagonalSolver for SorSolver {
    fn size(&self) -> usize {
        self.system.size()
    }

    fn set_diagonals(&mut self, lower: &[f64], diagonal: &[f64], upper: &[f64]) -> Result<(), FdError> {
        self.system.set_diagonals(lower, diagonal, upper)
    }

    fn set_rhs(&mut self, rhs: &[f64]) -> Result<(), FdError> {
        self.system.set_rhs(rhs)
    }

    fn solve(
        &mut self,
        lower: BoundaryCondition,
        upper: BoundaryCondition,
        solution: &mut [f64],
    ) -> Result<(), FdError> {
        let (start, end) = self.system.close(lower, upper, solution)?;
        let s = &self.system;
        for i in start..end {
            if s.work_diagonal[i].abs() <= SINGULAR_PIVOT {
                return Err(FdError::NumericalError(
                    "SOR solver zero diagonal".to_string(),
                ));
            }
        }

        for iteration in 0..self.max_iterations {
            let mut max_change = 0.0_f64;
            let mut max_value = 0.0_f64;
            for i in start..end {
                let mut sigma = s.work_rhs[i];
                if i > start {
                    sigma -= s.work_lower[i] * solution[i - 1];
                }
                if i + 1 < end {
                    sigma -= s.work_upper[i] * solution[i + 1];
                }
                let gauss_seidel = sigma / s.work_diagonal[i];
                let updated = solution[i] + self.omega * (gauss_seidel - solution[i]);
                max_change = max_change.max((updated - solution[i]).abs());
                max_value = max_value.max(updated.abs());
                solution[i] = updated;
            }
            if !max_change.is_finite() {
                return Err(FdError::NumericalError(
                    "SOR iteration diverged".to_string(),
                ));
            }
            if max_change <= self.tolerance * (1.0 + max_value) {
                log::trace!("SOR converged after {} iterations", iteration + 1);
                return Ok(());
            }
        }
        Err(FdError::ConvergenceFailure(format!(
            "SOR did not converge within {} iterations (omega = {})",
            self.max_iterations, self.omega
        )))
    }
}

/// Thomas algorithm on an open system (`lower[0]` and `upper[n-1]` ignored).
pub(crate) fn solve_tridiagonal_inplace(
    lower: &[f64],
    diag: &[f64],
    upper: &[f64],
    rhs: &[f64],
    c_star: &mut [f64],
    d_star: &mut [f64],
    out: &mut [f64],
) -> Result<(), FdError> {
    let n = diag.len();
    if n == 0 {
        return Ok(());
    }
    if lower.len() != n
        || upper.len() != n
        || rhs.len() != n
        || c_star.len() != n
        || d_star.len() != n
        || out.len() != n
    {
        return Err(FdError::InvalidInput(
            "tridiagonal input lengths must match".to_string(),
        ));
    }

    if diag[0].abs() <= SINGULAR_PIVOT {
        return Err(FdError::NumericalError(
            "tridiagonal solver singular matrix".to_string(),
        ));
    }

    c_star[0] = if n > 1 { upper[0] / diag[0] } else { 0.0 };
    d_star[0] = rhs[0] / diag[0];

    for i in 1..n {
        let denom = (-lower[i]).mul_add(c_star[i - 1], diag[i]);
        if denom.abs() <= SINGULAR_PIVOT {
            return Err(FdError::NumericalError(
                "tridiagonal solver singular matrix".to_string(),
            ));
        }
        c_star[i] = if i < n - 1 { upper[i] / denom } else { 0.0 };
        d_star[i] = (-lower[i]).mul_add(d_star[i - 1], rhs[i]) / denom;
    }

    out[n - 1] = d_star[n - 1];
    for i in (0..n - 1).rev() {
        out[i] = (-c_star[i]).mul_add(out[i + 1], d_star[i]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -u'' = 2 on [0, 1] assembled with h = 1/(n-1): rows (-1, 2, -1)/h² = 2.
    fn poisson(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>, f64) {
        let h = 1.0 / (n - 1) as f64;
        let inv_h2 = 1.0 / (h * h);
        (
            vec![-inv_h2; n],
            vec![2.0 * inv_h2; n],
            vec![-inv_h2; n],
            vec![2.0; n],
            h,
        )
    }

    fn solve_with(
        mut solver: Box<dyn TridiagonalSolver>,
        n: usize,
        lower: BoundaryCondition,
        upper: BoundaryCondition,
    ) -> Vec<f64> {
        let (l, d, u, f, _) = poisson(n);
        solver.set_diagonals(&l, &d, &u).expect("bands");
        solver.set_rhs(&f).expect("rhs");
        let mut x = vec![0.0; n];
        solver.solve(lower, upper, &mut x).expect("solve");
        x
    }

    #[test]
    fn thomas_solves_dirichlet_poisson_exactly() {
        let n = 21;
        let (.., h) = poisson(n);
        let x = solve_with(
            tridiagonal_solver(TridiagonalMethod::ThomasLu, n, h).expect("solver"),
            n,
            BoundaryCondition::Dirichlet(0.0),
            BoundaryCondition::Dirichlet(0.0),
        );
        for (i, xi) in x.iter().enumerate() {
            let z = i as f64 * h;
            assert_relative_eq!(*xi, z * (1.0 - z), epsilon = 1.0e-12);
        }
    }

    #[test]
    fn neumann_end_folds_ghost_node() {
        // u = x(2 - x) has u(0) = 0 and u'(1) = 0.
        let n = 41;
        let (.., h) = poisson(n);
        let x = solve_with(
            Box::new(ThomasLuSolver::new(n, h).expect("solver")),
            n,
            BoundaryCondition::Dirichlet(0.0),
            BoundaryCondition::Neumann(0.0),
        );
        for (i, xi) in x.iter().enumerate() {
            let z = i as f64 * h;
            assert_relative_eq!(*xi, z * (2.0 - z), epsilon = 1.0e-10);
        }
    }

    #[test]
    fn robin_lower_end_uses_the_linear_term() {
        // u = 1 + x - x^2: u'(0) - u(0) = 0, u(1) = 1.
        let n = 41;
        let (.., h) = poisson(n);
        let x = solve_with(
            Box::new(ThomasLuSolver::new(n, h).expect("solver")),
            n,
            BoundaryCondition::Robin { linear: -1.0, value: 0.0 },
            BoundaryCondition::Dirichlet(1.0),
        );
        for (i, xi) in x.iter().enumerate() {
            let z = i as f64 * h;
            assert_relative_eq!(*xi, 1.0 + z - z * z, epsilon = 1.0e-10);
        }
    }

    #[test]
    fn sor_matches_thomas() {
        let n = 15;
        let (.., h) = poisson(n);
        let direct = solve_with(
            tridiagonal_solver(TridiagonalMethod::ThomasLu, n, h).expect("solver"),
            n,
            BoundaryCondition::Dirichlet(1.0),
            BoundaryCondition::Robin { linear: 1.0, value: 0.5 },
        );
        let iterative = solve_with(
            tridiagonal_solver(TridiagonalMethod::sor(1.8), n, h).expect("solver"),
            n,
            BoundaryCondition::Dirichlet(1.0),
            BoundaryCondition::Robin { linear: 1.0, value: 0.5 },
        );
        for (a, b) in direct.iter().zip(&iterative) {
            assert_relative_eq!(*a, *b, epsilon = 1.0e-8);
        }
    }

    #[test]
    fn sor_reports_non_convergence() {
        let n = 41;
        let (l, d, u, f, h) = poisson(n);
        let mut solver = SorSolver::new(n, h, 1.0, 1.0e-14, 3).expect("solver");
        solver.set_diagonals(&l, &d, &u).expect("bands");
        solver.set_rhs(&f).expect("rhs");
        let mut x = vec![0.0; n];
        let err = solver
            .solve(BoundaryCondition::Dirichlet(0.0), BoundaryCondition::Dirichlet(0.0), &mut x)
            .expect_err("three sweeps are not enough");
        assert!(matches!(err, FdError::ConvergenceFailure(_)));
    }

    #[test]
    fn rejects_mismatched_bands() {
        let mut solver = ThomasLuSolver::new(5, 0.25).expect("solver");
        assert!(solver.set_diagonals(&[0.0; 4], &[1.0; 5], &[0.0; 5]).is_err());
        assert!(SorSolver::new(5, 0.25, 2.5, 1.0e-10, 100).is_err());
    }
}
