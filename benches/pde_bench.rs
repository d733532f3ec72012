use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use nalgebra::DMatrix;
use openferric_pde::core::{GridKind, PI};
use openferric_pde::prelude::*;
use std::hint::black_box;

// Performance goals (guideline, measured on target hardware):
// - 1D Crank-Nicolson, 201 x 201: < 2 ms
// - 2D Douglas, 51 x 51 x 51 steps: < 50 ms

fn black_scholes_solver(points: usize, config: HeatSolverConfig1d) -> HeatSolver1d {
    let (strike, rate, vol) = (100.0, 0.05, 0.2);
    let data = HeatData1d::builder()
        .a_coefficient(move |_, s| 0.5 * vol * vol * s * s)
        .b_coefficient(move |_, s| rate * s)
        .c_coefficient(move |_, _| -rate)
        .initial_condition(move |s| (s - strike).max(0.0))
        .build()
        .expect("benchmark data should be valid");
    let space = Range::new(0.0, 400.0).expect("space range should be valid");
    let discretization = DiscretizationConfig1d::new(
        space,
        points,
        Range::new(0.0, 1.0).expect("time range should be valid"),
        points,
    )
    .expect("discretization should be valid");
    HeatSolver1d::new(
        data,
        discretization,
        BoundaryPair1d::new(
            Boundary1d::dirichlet(0.0),
            Boundary1d::dirichlet_fn(move |t| 400.0 - strike * (-rate * (1.0 - t)).exp()),
        ),
        GridHints1d::new(strike, 3.0, GridKind::Nonuniform),
        config.with_traverse(TraverseDirection::Backward),
    )
    .expect("benchmark solver should be valid")
}

fn bench_heat_1d_schemes(c: &mut Criterion) {
    let mut group = c.benchmark_group("heat_1d_black_scholes");

    for points in [101_usize, 201, 401] {
        let solver = black_scholes_solver(points, HeatSolverConfig1d::default());
        group.bench_with_input(BenchmarkId::new("crank_nicolson", points), &points, |b, &n| {
            let mut u = vec![0.0; n];
            b.iter(|| {
                solver.solve(black_box(&mut u)).expect("solve should succeed");
                black_box(u[n / 2])
            })
        });
    }

    let solver = black_scholes_solver(201, HeatSolverConfig1d::default().with_tridiagonal(TridiagonalMethod::sor(1.2)));
    group.bench_function("crank_nicolson_sor_201", |b| {
        let mut u = vec![0.0; 201];
        b.iter(|| {
            solver.solve(black_box(&mut u)).expect("solve should succeed");
            black_box(u[100])
        })
    });

    group.finish();
}

fn bench_heat_2d_splittings(c: &mut Criterion) {
    let unit = Range::new(0.0, 1.0).expect("range should be valid");
    let discretization = DiscretizationConfig2d::new(
        (unit, unit),
        (51, 51),
        Range::new(0.0, 0.1).expect("time range should be valid"),
        51,
    )
    .expect("discretization should be valid");
    let zero = || Boundary2d::dirichlet(|_, _| 0.0);
    let mut group = c.benchmark_group("heat_2d_adi");
    group.sample_size(20);

    for splitting in [
        SplittingMethod::DouglasRachford,
        SplittingMethod::CraigSneyd,
        SplittingMethod::ModifiedCraigSneyd,
        SplittingMethod::HundsdorferVerwer,
    ] {
        let data = HeatData2d::builder()
            .a_coefficient(|_, _, _| 1.0)
            .b_coefficient(|_, _, _| 1.0)
            .c_coefficient(|_, _, _| 0.2)
            .initial_condition(|x, y| (PI * x).sin() * (PI * y).sin())
            .build()
            .expect("benchmark data should be valid");
        let solver = HeatSolver2d::new(
            data,
            discretization,
            HeatBoundaries2d::new(
                BoundaryPair2d::new(zero(), zero()),
                BoundaryPair2d::new(zero(), zero()),
            ),
            GridHints2d::uniform(&unit),
            SplittingSolverConfig::new(splitting, 0.5),
        )
        .expect("benchmark solver should be valid");
        group.bench_function(format!("{splitting:?}"), |b| {
            let mut u = DMatrix::zeros(51, 51);
            b.iter(|| {
                solver.solve(black_box(&mut u)).expect("solve should succeed");
                black_box(u[(25, 25)])
            })
        });
    }

    group.finish();
}

fn bench_wave_1d(c: &mut Criterion) {
    let unit = Range::new(0.0, 1.0).expect("range should be valid");
    let mut group = c.benchmark_group("wave_1d");

    for scheme in [WaveScheme::Explicit, WaveScheme::Implicit] {
        let data = WaveData1d::builder()
            .b_coefficient(|_, _| 1.0)
            .first_initial_condition(|x| (PI * x).sin())
            .second_initial_condition(|_| 0.0)
            .build()
            .expect("benchmark data should be valid");
        let solver = WaveSolver1d::new(
            data,
            DiscretizationConfig1d::new(unit, 201, Range::new(0.0, 1.0).expect("time"), 401)
                .expect("discretization should be valid"),
            BoundaryPair1d::new(Boundary1d::dirichlet(0.0), Boundary1d::dirichlet(0.0)),
            GridHints1d::uniform(&unit),
            WaveSolverConfig1d::new(scheme),
        )
        .expect("benchmark solver should be valid");
        group.bench_function(format!("{scheme:?}"), |b| {
            let mut u = vec![0.0; 201];
            b.iter(|| {
                solver.solve(black_box(&mut u)).expect("solve should succeed");
                black_box(u[100])
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_heat_1d_schemes, bench_heat_2d_splittings, bench_wave_1d);
criterion_main!(benches);
