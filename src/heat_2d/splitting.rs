//! ADI splitting steps for the 2D heat equation.
//!
//! Each step starts from the explicit predictor `Y0 = U + k·F(U)` and runs
//! one implicit sweep per axis, `(I − θkF_j) Y_j = Y_{j-1} − θkF_j(U)`.
//! Craig–Sneyd, modified Craig–Sneyd and Hundsdorfer–Verwer add a corrector
//! built from the operators at the predicted state and sweep again.

use nalgebra::DMatrix;

use crate::boundary::BoundaryCondition;
use crate::core::FdError;
use crate::grid::GridTransform2d;
use crate::pde::{HeatCoefficients2d, SplittingMethod, SplittingSolverConfig};
use crate::solvers::{tridiagonal_solver, LineSystem, TridiagonalSolver};

use super::boundary::HeatBoundaries2d;
use super::coefficients::HeatSchemeCoefficients2d;

struct Workspace {
    line_1: LineSystem,
    line_2: LineSystem,
    solver_1: Box<dyn TridiagonalSolver>,
    solver_2: Box<dyn TridiagonalSolver>,
}

/// Coefficients and `k·S` at one time.
struct Level {
    time: f64,
    coefficients: Vec<HeatCoefficients2d>,
    source: DMatrix<f64>,
    has_source: bool,
}

impl Level {
    fn new(n1: usize, n2: usize) -> Self {
        Self {
            time: f64::NAN,
            coefficients: vec![
                HeatCoefficients2d {
                    a: 0.0,
                    b: 0.0,
                    c: 0.0,
                    d: 0.0,
                    e: 0.0,
                    f: 0.0,
                };
                n1 * n2
            ],
            source: DMatrix::zeros(n1, n2),
            has_source: false,
        }
    }

    fn fill(&mut self, scheme: &HeatSchemeCoefficients2d, t: f64) {
        self.time = t;
        scheme.fill(t, &mut self.coefficients);
        self.has_source = scheme.fill_source(t, &mut self.source);
    }
}

/// `k·F0(u)`, `k·F1(u)` and `k·F2(u)` at one level.
struct Operators {
    mixed: DMatrix<f64>,
    axis_1: DMatrix<f64>,
    axis_2: DMatrix<f64>,
}

impl Operators {
    fn new(n1: usize, n2: usize) -> Self {
        Self {
            mixed: DMatrix::zeros(n1, n2),
            axis_1: DMatrix::zeros(n1, n2),
            axis_2: DMatrix::zeros(n1, n2),
        }
    }
}

/// `out = base + Σ c·m`.
fn combine(out: &mut DMatrix<f64>, base: &DMatrix<f64>, terms: &[(f64, &DMatrix<f64>)]) {
    out.copy_from(base);
    for (c, m) in terms {
        for (o, v) in out.iter_mut().zip(m.iter()) {
            *o = c.mul_add(*v, *o);
        }
    }
}

struct Context {
    scheme: HeatSchemeCoefficients2d,
    boundaries: HeatBoundaries2d,
    theta: f64,
}

impl Context {
    fn transform(&self) -> &GridTransform2d {
        self.scheme.transform().grid_transform()
    }

    fn axis_2_conditions(&self, t: f64, i: usize, degenerate_value: f64) -> (BoundaryCondition, BoundaryCondition) {
        let zeta = self.scheme.grid().axis_1().value_for(i);
        let (lower, upper) = self.boundaries.axis_2_conditions(self.transform(), t, zeta);
        (lower.unwrap_or(BoundaryCondition::Dirichlet(degenerate_value)), upper)
    }

    fn axis_1_conditions(&self, t: f64, j: usize) -> (BoundaryCondition, BoundaryCondition) {
        let eta = self.scheme.grid().axis_2().value_for(j);
        self.boundaries.axis_1_conditions(self.transform(), t, eta)
    }

    fn operators(&self, level: &Level, input: &DMatrix<f64>, work: &mut Workspace, out: &mut Operators) {
        let (n1, n2) = self.scheme.shape();
        out.mixed.fill(0.0);
        for j in 1..n2 - 1 {
            for i in 1..n1 - 1 {
                let w = self.scheme.mixed_weight(&level.coefficients[i + j * n1]);
                out.mixed[(i, j)] = w
                    * (input[(i + 1, j + 1)] - input[(i + 1, j - 1)] - input[(i - 1, j + 1)]
                        + input[(i - 1, j - 1)]);
            }
        }
        if level.has_source {
            out.mixed += &level.source;
        }

        let line = &mut work.line_1;
        for j in 0..n2 {
            let (lower, upper) = self.axis_1_conditions(level.time, j);
            for i in 0..n1 {
                line.weights[i] = self.scheme.axis_1_weights(&level.coefficients[i + j * n1], 0.5);
                line.values[i] = input[(i, j)];
            }
            line.apply(lower, upper, self.scheme.h_1);
            for i in 0..n1 {
                out.axis_1[(i, j)] = line.out[i];
            }
        }

        let line = &mut work.line_2;
        for i in 0..n1 {
            let (lower, upper) = self.axis_2_conditions(level.time, i, input[(i, 0)]);
            for j in 0..n2 {
                line.weights[j] = self.scheme.axis_2_weights(&level.coefficients[i + j * n1]);
                line.values[j] = input[(i, j)];
            }
            line.apply(lower, upper, self.scheme.h_2);
            for j in 0..n2 {
                out.axis_2[(i, j)] = line.out[j];
            }
        }
    }

    /// Implicit axis-1 sweep: `(I − θkF1) out = rhs` along every column.
    fn sweep_axis_1(
        &self,
        level: &Level,
        rhs: &DMatrix<f64>,
        work: &mut Workspace,
        out: &mut DMatrix<f64>,
    ) -> Result<(), FdError> {
        let (n1, n2) = self.scheme.shape();
        let Workspace { line_1: line, solver_1: solver, .. } = work;
        for j in 0..n2 {
            let (lower, upper) = self.axis_1_conditions(level.time, j);
            for i in 0..n1 {
                let w = self.scheme.axis_1_weights(&level.coefficients[i + j * n1], 0.5);
                line.set_bands(i, w, self.theta);
                line.rhs[i] = rhs[(i, j)];
                line.values[i] = rhs[(i, j)];
            }
            line.solve(solver.as_mut(), lower, upper)?;
            for i in 0..n1 {
                out[(i, j)] = line.values[i];
            }
        }
        Ok(())
    }

    /// Implicit axis-2 sweep along every row; a degenerate edge is held at `degenerate`.
    fn sweep_axis_2(
        &self,
        level: &Level,
        rhs: &DMatrix<f64>,
        degenerate: &[f64],
        work: &mut Workspace,
        out: &mut DMatrix<f64>,
    ) -> Result<(), FdError> {
        let (n1, n2) = self.scheme.shape();
        let Workspace { line_2: line, solver_2: solver, .. } = work;
        for i in 0..n1 {
            let (lower, upper) = self.axis_2_conditions(level.time, i, degenerate[i]);
            for j in 0..n2 {
                let w = self.scheme.axis_2_weights(&level.coefficients[i + j * n1]);
                line.set_bands(j, w, self.theta);
                line.rhs[j] = rhs[(i, j)];
                line.values[j] = rhs[(i, j)];
            }
            line.solve(solver.as_mut(), lower, upper)?;
            for j in 0..n2 {
                out[(i, j)] = line.values[j];
            }
        }
        Ok(())
    }

    /// Both implicit sweeps from `start`, correcting against `reference`.
    #[allow(clippy::too_many_arguments)]
    fn sweeps(
        &self,
        level: &Level,
        start: &DMatrix<f64>,
        reference: &Operators,
        degenerate: &[f64],
        work: &mut Workspace,
        rhs: &mut DMatrix<f64>,
        intermediate: &mut DMatrix<f64>,
        out: &mut DMatrix<f64>,
    ) -> Result<(), FdError> {
        combine(rhs, start, &[(-self.theta, &reference.axis_1)]);
        self.sweep_axis_1(level, rhs, work, intermediate)?;
        self.enforce(level.time, degenerate, intermediate);
        combine(rhs, intermediate, &[(-self.theta, &reference.axis_2)]);
        self.sweep_axis_2(level, rhs, degenerate, work, out)?;
        self.enforce(level.time, degenerate, out);
        Ok(())
    }

    /// Explicit step of the degenerate lower axis-2 edge.
    ///
    /// Axis-2 diffusion and the mixed term vanish there; the axis-2 drift uses
    /// the one-sided difference `(−3u_0 + 4u_1 − u_2)/(2h)`.
    fn degenerate_row(&self, level: &Level, u: &DMatrix<f64>, work: &mut Workspace, out: &mut [f64]) {
        let (n1, _) = self.scheme.shape();
        let (k, h_2) = (self.scheme.k, self.scheme.h_2);
        let (lower, upper) = self.axis_1_conditions(level.time, 0);
        let line = &mut work.line_1;
        for i in 0..n1 {
            line.weights[i] = self.scheme.axis_1_weights(&level.coefficients[i], 1.0);
            line.values[i] = u[(i, 0)];
        }
        line.apply(lower, upper, self.scheme.h_1);
        for i in 0..n1 {
            let slope = (-3.0 * u[(i, 0)] + 4.0 * u[(i, 1)] - u[(i, 2)]) / (2.0 * h_2);
            let source = if level.has_source { level.source[(i, 0)] } else { 0.0 };
            out[i] = u[(i, 0)] + line.out[i] + k * level.coefficients[i].e * slope + source;
        }
    }

    /// Writes Dirichlet data at time `t`; axis-1 values win at the corners.
    fn enforce(&self, t: f64, degenerate: &[f64], u: &mut DMatrix<f64>) {
        let (n1, n2) = self.scheme.shape();
        for i in 0..n1 {
            let zeta = self.scheme.grid().axis_1().value_for(i);
            let (lower, upper) = self.boundaries.axis_2_conditions(self.transform(), t, zeta);
            match lower {
                Some(BoundaryCondition::Dirichlet(g)) => u[(i, 0)] = g,
                Some(_) => {}
                None => u[(i, 0)] = degenerate[i],
            }
            if let Some(g) = upper.dirichlet_value() {
                u[(i, n2 - 1)] = g;
            }
        }
        for j in 0..n2 {
            let (lower, upper) = self.axis_1_conditions(t, j);
            if let Some(g) = lower.dirichlet_value() {
                u[(0, j)] = g;
            }
            if let Some(g) = upper.dirichlet_value() {
                u[(n1 - 1, j)] = g;
            }
        }
    }
}

/// One ADI time step of the 2D heat equation.
pub struct SplittingMethod2d {
    context: Context,
    splitting: SplittingMethod,
    work: Workspace,
    old: Level,
    new: Level,
    at_start: Operators,
    at_predictor: Operators,
    predictor: DMatrix<f64>,
    corrected: DMatrix<f64>,
    rhs: DMatrix<f64>,
    intermediate: DMatrix<f64>,
    degenerate: Vec<f64>,
}

impl SplittingMethod2d {
    pub fn new(
        scheme: HeatSchemeCoefficients2d,
        boundaries: HeatBoundaries2d,
        config: &SplittingSolverConfig,
    ) -> Result<Self, FdError> {
        config.validate()?;
        let (n1, n2) = scheme.shape();
        let work = Workspace {
            line_1: LineSystem::new(n1),
            line_2: LineSystem::new(n2),
            solver_1: tridiagonal_solver(config.tridiagonal, n1, scheme.h_1)?,
            solver_2: tridiagonal_solver(config.tridiagonal, n2, scheme.h_2)?,
        };
        Ok(Self {
            context: Context {
                scheme,
                boundaries,
                theta: config.weighting,
            },
            splitting: config.splitting,
            work,
            old: Level::new(n1, n2),
            new: Level::new(n1, n2),
            at_start: Operators::new(n1, n2),
            at_predictor: Operators::new(n1, n2),
            predictor: DMatrix::zeros(n1, n2),
            corrected: DMatrix::zeros(n1, n2),
            rhs: DMatrix::zeros(n1, n2),
            intermediate: DMatrix::zeros(n1, n2),
            degenerate: vec![0.0; n1],
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        self.context.scheme.shape()
    }

    pub fn splitting(&self) -> SplittingMethod {
        self.splitting
    }

    /// Advances `solution` from time `from` to time `to`.
    pub fn step(&mut self, solution: &mut DMatrix<f64>, from: f64, to: f64) -> Result<(), FdError> {
        let (n1, n2) = self.shape();
        if solution.shape() != (n1, n2) {
            return Err(FdError::InvalidInput(format!(
                "solution is {}x{}, expected {n1}x{n2}",
                solution.nrows(),
                solution.ncols()
            )));
        }
        let Self {
            context,
            splitting,
            work,
            old,
            new,
            at_start,
            at_predictor,
            predictor,
            corrected,
            rhs,
            intermediate,
            degenerate,
        } = self;

        if new.time == from {
            std::mem::swap(old, new);
        } else {
            old.fill(&context.scheme, from);
        }
        new.fill(&context.scheme, to);

        if context.boundaries.is_lower_degenerate() {
            context.degenerate_row(old, solution, work, degenerate);
        }
        context.operators(old, solution, work, at_start);
        combine(
            predictor,
            solution,
            &[(1.0, &at_start.mixed), (1.0, &at_start.axis_1), (1.0, &at_start.axis_2)],
        );
        context.enforce(to, degenerate, predictor);

        let theta = context.theta;
        match splitting {
            SplittingMethod::DouglasRachford => {
                context.sweeps(new, predictor, at_start, degenerate, work, rhs, intermediate, solution)?;
            }
            SplittingMethod::CraigSneyd => {
                context.sweeps(new, predictor, at_start, degenerate, work, rhs, intermediate, corrected)?;
                context.operators(new, corrected, work, at_predictor);
                combine(
                    corrected,
                    predictor,
                    &[(0.5, &at_predictor.mixed), (-0.5, &at_start.mixed)],
                );
                context.enforce(to, degenerate, corrected);
                context.sweeps(new, corrected, at_start, degenerate, work, rhs, intermediate, solution)?;
            }
            SplittingMethod::ModifiedCraigSneyd => {
                context.sweeps(new, predictor, at_start, degenerate, work, rhs, intermediate, corrected)?;
                context.operators(new, corrected, work, at_predictor);
                let half = 0.5 - theta;
                combine(
                    corrected,
                    predictor,
                    &[
                        (theta + half, &at_predictor.mixed),
                        (-(theta + half), &at_start.mixed),
                        (half, &at_predictor.axis_1),
                        (-half, &at_start.axis_1),
                        (half, &at_predictor.axis_2),
                        (-half, &at_start.axis_2),
                    ],
                );
                context.enforce(to, degenerate, corrected);
                context.sweeps(new, corrected, at_start, degenerate, work, rhs, intermediate, solution)?;
            }
            SplittingMethod::HundsdorferVerwer => {
                context.sweeps(new, predictor, at_start, degenerate, work, rhs, intermediate, corrected)?;
                context.operators(new, corrected, work, at_predictor);
                combine(
                    corrected,
                    predictor,
                    &[
                        (0.5, &at_predictor.mixed),
                        (-0.5, &at_start.mixed),
                        (0.5, &at_predictor.axis_1),
                        (-0.5, &at_start.axis_1),
                        (0.5, &at_predictor.axis_2),
                        (-0.5, &at_start.axis_2),
                    ],
                );
                context.enforce(to, degenerate, corrected);
                context.sweeps(new, corrected, at_predictor, degenerate, work, rhs, intermediate, solution)?;
            }
        }

        if solution.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(FdError::NumericalError(
                "2d splitting step produced non-finite values".to_string(),
            ))
        }
    }
}
