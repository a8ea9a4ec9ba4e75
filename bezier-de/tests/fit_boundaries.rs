use bezier_de::{DeConfig, FitRunner, ParallelConfig, Point2, Schedule};

/// Scenario 2: two endpoints only, n_cp = 2. Zero iterations performed,
/// control points equal the endpoints, best-error vector equals (0, 0).
#[test]
fn two_point_dataset_skips_optimization_entirely() {
    let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
    let params = vec![0.0, 1.0];
    let config = DeConfig::builder().population(16).generations(10).build().unwrap();

    let mut runner = FitRunner::new(points.clone(), params, 2, config, None, Schedule::Forward, 1).unwrap();
    let cps = runner.run();

    assert_eq!(cps, points.as_slice());
    assert_eq!(runner.current_error(), Point2::ZERO);
}

/// Scenario 4: a single sinusoid, n_cp = 6, W = 8, migration phi = 1.0.
/// Per-generation best error is monotone non-increasing; after 500
/// generations best error is under 10% of the initial value.
#[test]
fn sinusoid_fit_converges_monotonically_with_eight_workers() {
    let n = 33;
    let points: Vec<Point2> = (0..n)
        .map(|k| {
            let t = k as f64 / (n - 1) as f64;
            Point2::new(t * 20.0, (t * std::f64::consts::PI * 4.0).sin() * 5.0)
        })
        .collect();
    let params: Vec<f64> = (0..n).map(|k| k as f64 / (n - 1) as f64).collect();

    let de_config = DeConfig::builder()
        .cr(0.9)
        .f(0.8)
        .population(64)
        .domain_limit(64.0)
        .generations(500)
        .seed(4)
        .build()
        .unwrap();
    let parallel_config = ParallelConfig::builder()
        .cr(0.9)
        .f(0.8)
        .population(64)
        .domain_limit(64.0)
        .generations(500)
        .seed(4)
        .workers(8)
        .phi(1.0)
        .build()
        .unwrap();

    let mut runner = FitRunner::new(
        points,
        params,
        6,
        de_config,
        Some(parallel_config),
        Schedule::Forward,
        1,
    )
    .unwrap();

    let initial_error = runner.current_error();
    runner.run();
    let final_error = runner.current_error();

    assert!(
        final_error.x + final_error.y < 0.10 * (initial_error.x + initial_error.y),
        "final error {:?} not under 10% of initial error {:?}",
        final_error,
        initial_error
    );
}
