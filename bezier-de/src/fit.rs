//! Per-control-point fitting driver tying the Bezier evaluator to a
//! sequential or parallel DE solver.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::Rng;

use crate::bezier::BezierCurve;
use crate::config::{DeConfig, ParallelConfig};
use crate::error::ConfigError;
use crate::parallel::ParallelDe;
use crate::point::Point2;
use crate::solver::DeSolver;

/// The order in which interior control point indices are visited within a
/// round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Forward,
    Backward,
}

impl Schedule {
    fn order(self, n_cp: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = if n_cp >= 3 { (1..n_cp - 1).collect() } else { Vec::new() };
        if self == Schedule::Backward {
            indices.reverse();
        }
        indices
    }
}

fn error_is_better(a: f64, b: f64) -> bool {
    a < b
}

/// Drives the outer per-control-point optimization loop: for each interior
/// index, bind it as the evaluator's variable, run a DE solver against the
/// cached error, and write the recovered position back.
pub struct FitRunner {
    curve: BezierCurve,
    points: Arc<Vec<Point2>>,
    params: Vec<f64>,
    de_config: DeConfig,
    parallel_config: Option<ParallelConfig>,
    schedule: Schedule,
    rounds: usize,
}

impl FitRunner {
    /// `points[0]`/`points[last]` are pinned into `control_points[0]`/
    /// `control_points[n_cp - 1]`, matching the original constructor's
    /// endpoint-pinning behavior. `params` must be the same length as
    /// `points` and already in `[0, 1]` (see `bezier-io::chord_length_parameterize`).
    pub fn new(
        points: Vec<Point2>,
        params: Vec<f64>,
        n_cp: usize,
        de_config: DeConfig,
        parallel_config: Option<ParallelConfig>,
        schedule: Schedule,
        rounds: usize,
    ) -> Result<Self, ConfigError> {
        if points.len() < 2 {
            return Err(ConfigError::TooFewDataPoints(points.len()));
        }
        if n_cp > 2 && points.len() < 3 {
            // An interior control point needs at least one non-endpoint
            // data point to actually optimize against.
            return Err(ConfigError::TooFewDataPoints(points.len()));
        }
        if points.len() != params.len() {
            return Err(ConfigError::ParameterPointMismatch {
                params: params.len(),
                points: points.len(),
            });
        }
        if n_cp < 2 {
            return Err(ConfigError::TooFewControlPoints(n_cp));
        }

        let first = points[0];
        let last = points[points.len() - 1];
        let mut control_points = vec![Point2::ZERO; n_cp];
        control_points[0] = first;
        control_points[n_cp - 1] = last;
        if n_cp >= 3 {
            for i in 1..n_cp - 1 {
                let frac = i as f64 / (n_cp - 1) as f64;
                control_points[i] = first + (last - first) * frac;
            }
        }

        let mut curve = BezierCurve::new(control_points)?;
        curve.bind_parameters(&params);

        log::info!("FitRunner constructed: n_cp={n_cp}, points={}, rounds={rounds}", points.len());

        Ok(Self {
            curve,
            points: Arc::new(points),
            params,
            de_config,
            parallel_config,
            schedule,
            rounds,
        })
    }

    /// Runs the configured number of rounds and returns the final control
    /// points. For `n_cp == 2` this performs zero DE iterations: the curve
    /// is already just the line between the pinned endpoints.
    pub fn run(&mut self) -> &[Point2] {
        let n_cp = self.curve.n_cp();
        let indices = self.schedule.order(n_cp);
        for round in 0..self.rounds.max(1) {
            for &i in &indices {
                self.curve
                    .set_variable_cp(i)
                    .expect("index came from Schedule::order, must be a valid interior index");
                let best = self.optimize_one(round as u64, i as u64);
                self.curve.set_control_point(i, best);
                log::info!("round {round}: control point {i} -> ({:.4}, {:.4})", best.x, best.y);
            }
        }
        self.curve.control_points()
    }

    pub fn control_points(&self) -> &[Point2] {
        self.curve.control_points()
    }

    /// Current best-error vector of the underlying curve against the bound
    /// data set, computed naively (not via the solver's cache).
    pub fn current_error(&self) -> Point2 {
        self.curve.sum_squared_error(&self.points, &self.params)
    }

    fn optimize_one(&self, round: u64, index: u64) -> Point2 {
        let seed = self.de_config.seed ^ (round << 32) ^ index;
        let limit = self.de_config.domain_limit;

        if let Some(pc) = &self.parallel_config {
            let curve = Arc::new(self.curve.clone());
            let points = Arc::clone(&self.points);
            let curve_for_eval = Arc::clone(&curve);
            let points_for_eval = Arc::clone(&points);
            let mut de = ParallelDe::<2>::new(
                pc.base.cr,
                pc.base.f,
                pc.base.population,
                pc.workers,
                pc.phi,
                seed,
                move || {
                    let limit = limit;
                    Box::new(move |rng: &mut StdRng| rng.random_range(-limit..limit))
                },
                move || {
                    let curve = Arc::clone(&curve_for_eval);
                    let points = Arc::clone(&points_for_eval);
                    Box::new(move |v: &[f64; 2]| {
                        let e = curve.sum_squared_error_cached(Point2::new(v[0], v[1]), &points);
                        [e.x, e.y]
                    })
                },
                || Box::new(error_is_better),
            );
            de.step_n(self.de_config.generations);
            let position = de.best(error_is_better).1;
            Point2::new(position[0], position[1])
        } else {
            let curve = Arc::new(self.curve.clone());
            let points = Arc::clone(&self.points);
            let mut solver = DeSolver::<2>::new(
                self.de_config.cr,
                self.de_config.f,
                self.de_config.population,
                seed,
                Box::new(move |rng: &mut StdRng| rng.random_range(-limit..limit)),
                Box::new(move |v: &[f64; 2]| {
                    let e = curve.sum_squared_error_cached(Point2::new(v[0], v[1]), &points);
                    [e.x, e.y]
                }),
                Box::new(error_is_better),
            );
            solver.step_n(self.de_config.generations);
            let position = solver.best().1;
            Point2::new(position[0], position[1])
        }
    }
}
