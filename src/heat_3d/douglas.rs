//! Douglas ADI step for the 3D heat equation.

use nalgebra::DMatrix;

use crate::boundary::BoundaryCondition;
use crate::core::{ensure_len, FdError};
use crate::pde::{HeatCoefficients3d, SplittingSolverConfig};
use crate::solvers::{tridiagonal_solver, LineSystem, TridiagonalSolver};

use super::boundary::HeatBoundaries3d;
use super::coefficients::HeatSchemeCoefficients3d;

/// A grid line along one axis of the flattened solution.
#[derive(Debug, Clone, Copy)]
struct LineGeometry {
    base: usize,
    stride: usize,
    transverse: (f64, f64),
}

struct Level {
    time: f64,
    coefficients: Vec<HeatCoefficients3d>,
    source: Vec<f64>,
    has_source: bool,
}

impl Level {
    fn new(len: usize) -> Self {
        Self {
            time: f64::NAN,
            coefficients: vec![[0.0; 10]; len],
            source: vec![0.0; len],
            has_source: false,
        }
    }

    fn fill(&mut self, scheme: &HeatSchemeCoefficients3d, t: f64) {
        self.time = t;
        scheme.fill(t, &mut self.coefficients);
        self.has_source = scheme.fill_source(t, &mut self.source);
    }
}

/// `Y0 = U + kF(U)`, then `(I − θkF_d) Y_d = Y_{d-1} − θkF_d(U)` for each axis.
pub struct DouglasMethod3d {
    scheme: HeatSchemeCoefficients3d,
    boundaries: HeatBoundaries3d,
    theta: f64,
    solvers: [Box<dyn TridiagonalSolver>; 3],
    lines: [LineSystem; 3],
    old: Level,
    new: Level,
    state: Vec<f64>,
    mixed: Vec<f64>,
    directional: [Vec<f64>; 3],
    stage: Vec<f64>,
    next: Vec<f64>,
    rhs: Vec<f64>,
}

impl DouglasMethod3d {
    pub fn new(
        scheme: HeatSchemeCoefficients3d,
        boundaries: HeatBoundaries3d,
        config: &SplittingSolverConfig,
    ) -> Result<Self, FdError> {
        config.validate()?;
        let shape = scheme.shape();
        let len = scheme.len();
        let solvers = [
            tridiagonal_solver(config.tridiagonal, shape[0], scheme.steps[0])?,
            tridiagonal_solver(config.tridiagonal, shape[1], scheme.steps[1])?,
            tridiagonal_solver(config.tridiagonal, shape[2], scheme.steps[2])?,
        ];
        Ok(Self {
            scheme,
            boundaries,
            theta: config.weighting,
            solvers,
            lines: shape.map(LineSystem::new),
            old: Level::new(len),
            new: Level::new(len),
            state: vec![0.0; len],
            mixed: vec![0.0; len],
            directional: [vec![0.0; len], vec![0.0; len], vec![0.0; len]],
            stage: vec![0.0; len],
            next: vec![0.0; len],
            rhs: vec![0.0; len],
        })
    }

    pub fn shape(&self) -> [usize; 3] {
        self.scheme.shape()
    }

    /// Advances the layered `solution` from `from` to `to`.
    pub fn step(&mut self, solution: &mut [DMatrix<f64>], from: f64, to: f64) -> Result<(), FdError> {
        let [n1, n2, n3] = self.shape();
        ensure_len("solution layers", solution.len(), n3)?;
        for layer in solution.iter() {
            if layer.shape() != (n1, n2) {
                return Err(FdError::InvalidInput(format!(
                    "solution layer is {}x{}, expected {n1}x{n2}",
                    layer.nrows(),
                    layer.ncols()
                )));
            }
        }
        for (l, layer) in solution.iter().enumerate() {
            let offset = l * n1 * n2;
            self.state[offset..offset + n1 * n2].copy_from_slice(layer.as_slice());
        }

        if self.new.time == from {
            std::mem::swap(&mut self.old, &mut self.new);
        } else {
            self.old.fill(&self.scheme, from);
        }
        self.new.fill(&self.scheme, to);

        self.explicit_operators();
        for n in 0..self.stage.len() {
            self.stage[n] = self.state[n]
                + self.mixed[n]
                + self.directional[0][n]
                + self.directional[1][n]
                + self.directional[2][n];
        }
        enforce(&self.scheme, &self.boundaries, to, &mut self.stage);

        for axis in 0..3 {
            for n in 0..self.rhs.len() {
                self.rhs[n] = (-self.theta).mul_add(self.directional[axis][n], self.stage[n]);
            }
            self.sweep(axis)?;
            enforce(&self.scheme, &self.boundaries, to, &mut self.next);
            std::mem::swap(&mut self.stage, &mut self.next);
        }

        if !self.stage.iter().all(|v| v.is_finite()) {
            return Err(FdError::NumericalError(
                "3d Douglas step produced non-finite values".to_string(),
            ));
        }
        for (l, layer) in solution.iter_mut().enumerate() {
            let offset = l * n1 * n2;
            layer.as_mut_slice().copy_from_slice(&self.stage[offset..offset + n1 * n2]);
        }
        Ok(())
    }

    /// Fills `mixed` with `k·F0(U)` and `directional[d]` with `k·F_d(U)` at the old level.
    fn explicit_operators(&mut self) {
        let [n1, n2, n3] = self.shape();
        let s = &self.scheme;
        let u = &self.state;
        self.mixed.fill(0.0);
        for l in 1..n3 - 1 {
            for j in 1..n2 - 1 {
                for i in 1..n1 - 1 {
                    let at = |a: usize, b: usize, c: usize| u[s.index(a, b, c)];
                    let n = s.index(i, j, l);
                    let [w_xy, w_xz, w_yz] = s.mixed_weights(&self.old.coefficients[n]);
                    self.mixed[n] = w_xy
                        * (at(i + 1, j + 1, l) - at(i + 1, j - 1, l) - at(i - 1, j + 1, l)
                            + at(i - 1, j - 1, l))
                        + w_xz
                            * (at(i + 1, j, l + 1) - at(i + 1, j, l - 1) - at(i - 1, j, l + 1)
                                + at(i - 1, j, l - 1))
                        + w_yz
                            * (at(i, j + 1, l + 1) - at(i, j + 1, l - 1) - at(i, j - 1, l + 1)
                                + at(i, j - 1, l - 1));
                }
            }
        }
        if self.old.has_source {
            for (m, src) in self.mixed.iter_mut().zip(&self.old.source) {
                *m += src;
            }
        }

        for axis in 0..3 {
            let line = &mut self.lines[axis];
            let out = &mut self.directional[axis];
            for geometry in line_geometries(s, axis) {
                let (lower, upper) = self.boundaries.conditions(
                    s.transform().grid_transform(),
                    axis,
                    self.old.time,
                    geometry.transverse.0,
                    geometry.transverse.1,
                );
                for m in 0..line.len() {
                    let n = geometry.base + m * geometry.stride;
                    line.weights[m] = s.axis_weights(axis, &self.old.coefficients[n]);
                    line.values[m] = u[n];
                }
                line.apply(lower, upper, s.steps[axis]);
                for m in 0..line.len() {
                    out[geometry.base + m * geometry.stride] = line.out[m];
                }
            }
        }
    }

    /// Solves `(I − θkF_axis) next = rhs` line by line at the new level.
    fn sweep(&mut self, axis: usize) -> Result<(), FdError> {
        let s = &self.scheme;
        let line = &mut self.lines[axis];
        let solver = &mut self.solvers[axis];
        for geometry in line_geometries(s, axis) {
            let (lower, upper) = self.boundaries.conditions(
                s.transform().grid_transform(),
                axis,
                self.new.time,
                geometry.transverse.0,
                geometry.transverse.1,
            );
            for m in 0..line.len() {
                let n = geometry.base + m * geometry.stride;
                let w = s.axis_weights(axis, &self.new.coefficients[n]);
                line.set_bands(m, w, self.theta);
                line.rhs[m] = self.rhs[n];
                line.values[m] = self.rhs[n];
            }
            line.solve(solver.as_mut(), lower, upper)?;
            for m in 0..line.len() {
                self.next[geometry.base + m * geometry.stride] = line.values[m];
            }
        }
        Ok(())
    }
}

/// Every line along `axis`, with its physical transverse coordinates.
fn line_geometries(s: &HeatSchemeCoefficients3d, axis: usize) -> Vec<LineGeometry> {
    let [n1, n2, n3] = s.shape();
    let mut out = Vec::new();
    match axis {
        0 => {
            for l in 0..n3 {
                for j in 0..n2 {
                    out.push(LineGeometry {
                        base: s.index(0, j, l),
                        stride: 1,
                        transverse: (s.coordinate(1, j), s.coordinate(2, l)),
                    });
                }
            }
        }
        1 => {
            for l in 0..n3 {
                for i in 0..n1 {
                    out.push(LineGeometry {
                        base: s.index(i, 0, l),
                        stride: n1,
                        transverse: (s.coordinate(0, i), s.coordinate(2, l)),
                    });
                }
            }
        }
        _ => {
            for j in 0..n2 {
                for i in 0..n1 {
                    out.push(LineGeometry {
                        base: s.index(i, j, 0),
                        stride: n1 * n2,
                        transverse: (s.coordinate(0, i), s.coordinate(1, j)),
                    });
                }
            }
        }
    }
    out
}

/// Writes Dirichlet data at time `t`; earlier axes win at edges.
fn enforce(s: &HeatSchemeCoefficients3d, boundaries: &HeatBoundaries3d, t: f64, u: &mut [f64]) {
    let shape = s.shape();
    for axis in (0..3).rev() {
        let last = shape[axis] - 1;
        for geometry in line_geometries(s, axis) {
            let (lower, upper) = boundaries.conditions(
                s.transform().grid_transform(),
                axis,
                t,
                geometry.transverse.0,
                geometry.transverse.1,
            );
            if let BoundaryCondition::Dirichlet(g) = lower {
                u[geometry.base] = g;
            }
            if let BoundaryCondition::Dirichlet(g) = upper {
                u[geometry.base + last * geometry.stride] = g;
            }
        }
    }
}
