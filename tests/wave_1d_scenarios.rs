use approx::assert_abs_diff_eq;
use openferric_pde::core::PI;
use openferric_pde::prelude::*;

fn wave_solver(
    data: WaveData1d,
    points: usize,
    horizon: f64,
    time_points: usize,
    boundaries: BoundaryPair1d,
    config: WaveSolverConfig1d,
) -> WaveSolver1d {
    let space = Range::new(0.0, 1.0).expect("space");
    let discretization = DiscretizationConfig1d::new(
        space,
        points,
        Range::new(0.0, horizon).expect("time"),
        time_points,
    )
    .expect("discretization");
    WaveSolver1d::new(data, discretization, boundaries, GridHints1d::uniform(&space), config)
        .expect("wave solver")
}

fn fixed_ends() -> BoundaryPair1d {
    BoundaryPair1d::new(Boundary1d::dirichlet(0.0), Boundary1d::dirichlet(0.0))
}

fn solve(solver: &WaveSolver1d, points: usize) -> (Vec<f64>, Vec<f64>) {
    let mut u = vec![0.0; points];
    solver.solve(&mut u).expect("solve");
    (solver.space_points().expect("space points"), u)
}

#[test]
fn damped_standing_wave_decays_at_the_exact_rate() {
    let damping = 0.5;
    let omega = (PI * PI - 0.25 * damping * damping).sqrt();
    let horizon = 1.0;
    let envelope = (-0.5 * damping * horizon).exp()
        * ((omega * horizon).cos() + 0.5 * damping / omega * (omega * horizon).sin());
    for scheme in [WaveScheme::Explicit, WaveScheme::Implicit] {
        let data = WaveData1d::builder()
            .a_coefficient(move |_, _| damping)
            .b_coefficient(|_, _| 1.0)
            .first_initial_condition(|x| (PI * x).sin())
            .second_initial_condition(|_| 0.0)
            .build()
            .expect("data");
        let solver = wave_solver(data, 101, horizon, 1001, fixed_ends(), WaveSolverConfig1d::new(scheme));
        let (xs, u) = solve(&solver, 101);
        for (x, v) in xs.iter().zip(&u) {
            assert_abs_diff_eq!(*v, envelope * (PI * x).sin(), epsilon = 5.0e-3);
        }
    }
}

#[test]
fn initial_velocity_drives_the_string() {
    // u = sin(πx) sin(πt) / π.
    let data = WaveData1d::builder()
        .b_coefficient(|_, _| 1.0)
        .first_initial_condition(|_| 0.0)
        .second_initial_condition(|x| (PI * x).sin())
        .build()
        .expect("data");
    let solver = wave_solver(data, 101, 0.5, 501, fixed_ends(), WaveSolverConfig1d::default());
    let (xs, u) = solve(&solver, 101);
    for (x, v) in xs.iter().zip(&u) {
        assert_abs_diff_eq!(*v, (PI * x).sin() / PI, epsilon = 2.0e-3);
    }
}

#[test]
fn free_ends_reflect_a_cosine_mode() {
    // u = cos(πx) cos(πt); half a period later the profile is inverted.
    let data = WaveData1d::builder()
        .b_coefficient(|_, _| 1.0)
        .first_initial_condition(|x| (PI * x).cos())
        .second_initial_condition(|_| 0.0)
        .build()
        .expect("data");
    let boundaries = BoundaryPair1d::new(Boundary1d::neumann(0.0), Boundary1d::neumann(0.0));
    let solver = wave_solver(data, 101, 1.0, 1001, boundaries, WaveSolverConfig1d::default());
    let (xs, u) = solve(&solver, 101);
    for (x, v) in xs.iter().zip(&u) {
        assert_abs_diff_eq!(*v, -(PI * x).cos(), epsilon = 1.0e-2);
    }
}

#[test]
fn forced_string_follows_the_manufactured_solution() {
    // u = x(1 − x)(1 + t²) with S = u_tt − u_xx.
    let data = WaveData1d::builder()
        .b_coefficient(|_, _| 1.0)
        .first_initial_condition(|x| x * (1.0 - x))
        .second_initial_condition(|_| 0.0)
        .source(|t, x| 2.0 * x * (1.0 - x) + 2.0 * (1.0 + t * t))
        .build()
        .expect("data");
    for scheme in [WaveScheme::Explicit, WaveScheme::Implicit] {
        let solver = wave_solver(data.clone(), 51, 0.5, 201, fixed_ends(), WaveSolverConfig1d::new(scheme));
        let (xs, u) = solve(&solver, 51);
        for (x, v) in xs.iter().zip(&u) {
            assert_abs_diff_eq!(*v, x * (1.0 - x) * 1.25, epsilon = 1.0e-3);
        }
    }
}

#[test]
fn time_dependent_damping_matches_the_exact_solution_for_both_schemes() {
    // Spatially constant u with u'' + t·u' = 0, u(0) = 0, u'(0) = 1:
    // u(2) = ∫₀² exp(−s²/2) ds = √(π/2)·erf(√2).
    let exact = 1.196_288_013_322_608;
    for scheme in [WaveScheme::Explicit, WaveScheme::Implicit] {
        let data = WaveData1d::builder()
            .a_coefficient(|t, _| t)
            .b_coefficient(|_, _| 1.0)
            .first_initial_condition(|_| 0.0)
            .second_initial_condition(|_| 1.0)
            .build()
            .expect("data");
        let free = BoundaryPair1d::new(Boundary1d::neumann(0.0), Boundary1d::neumann(0.0));
        let solver = wave_solver(data, 11, 2.0, 201, free, WaveSolverConfig1d::new(scheme));
        let (_, u) = solve(&solver, 11);
        for v in &u {
            assert_abs_diff_eq!(*v, exact, epsilon = 1.0e-4);
        }
    }
}

#[test]
fn explicit_scheme_above_courant_limit_diverges() {
    // k/h = 2.
    let data = WaveData1d::builder()
        .b_coefficient(|_, _| 1.0)
        .first_initial_condition(|x| (PI * x).sin())
        .second_initial_condition(|_| 0.0)
        .build()
        .expect("data");
    let solver = wave_solver(data, 101, 2.0, 101, fixed_ends(), WaveSolverConfig1d::new(WaveScheme::Explicit));
    let mut u = vec![0.0; 101];
    let diverged = match solver.solve(&mut u) {
        Err(FdError::NumericalError(_)) => true,
        Err(other) => panic!("unexpected error {other}"),
        Ok(()) => u.iter().any(|v| v.abs() > 1.0e6),
    };
    assert!(diverged);
}

#[test]
fn implicit_scheme_stays_bounded_with_large_steps() {
    let data = WaveData1d::builder()
        .b_coefficient(|_, _| 1.0)
        .first_initial_condition(|x| (PI * x).sin())
        .second_initial_condition(|_| 0.0)
        .build()
        .expect("data");
    let solver = wave_solver(data, 101, 2.0, 101, fixed_ends(), WaveSolverConfig1d::new(WaveScheme::Implicit));
    let (_, u) = solve(&solver, 101);
    assert!(u.iter().all(|v| v.is_finite() && v.abs() <= 1.5));
}

#[test]
fn backward_traversal_mirrors_forward_for_autonomous_data() {
    let data = WaveData1d::builder()
        .a_coefficient(|_, _| 0.2)
        .b_coefficient(|_, x| 1.0 + 0.5 * x)
        .first_initial_condition(|x| (PI * x).sin())
        .second_initial_condition(|_| 0.0)
        .build()
        .expect("data");
    let forward = wave_solver(data.clone(), 41, 0.5, 101, fixed_ends(), WaveSolverConfig1d::default());
    let backward = wave_solver(
        data,
        41,
        0.5,
        101,
        fixed_ends(),
        WaveSolverConfig1d::default().with_traverse(TraverseDirection::Backward),
    );
    let (_, a) = solve(&forward, 41);
    let (_, b) = solve(&backward, 41);
    for (x, y) in a.iter().zip(&b) {
        assert_abs_diff_eq!(*x, *y, epsilon = 1.0e-12);
    }
}

#[test]
fn wave_config_loads_from_json() {
    let config = WaveSolverConfig1d::from_json(
        r#"{"scheme":"Explicit","traverse":"Forward","tridiagonal":"ThomasLu"}"#,
    )
    .expect("config");
    assert_eq!(config, WaveSolverConfig1d::new(WaveScheme::Explicit));
    assert!(WaveSolverConfig1d::from_json(r#"{"scheme":"Leapfrog"}"#).is_err());
}
