//! Bezier curve evaluation and its per-control-point optimization cache.

use std::sync::OnceLock;

use crate::error::ConfigError;
use crate::point::Point2;

/// Largest number of control points a curve may have. Beyond this the
/// binomial cache (computed in `f64`, not integer factorials) starts to
/// lose precision.
pub const MAX_CP: usize = 20;

type BinomialTable = [[f64; MAX_CP]; MAX_CP];

static BINOMIAL_CACHE: OnceLock<BinomialTable> = OnceLock::new();

/// Process-wide table of `choose(n, i)`, populated once on first use.
///
/// Computed in double precision via a Pascal's-triangle recurrence rather
/// than factorials, so it stays exact (up to `f64` rounding) for every `n`
/// up to `MAX_CP - 1`, well past where `n!` would overflow a 64-bit integer.
pub fn binomial_table() -> &'static BinomialTable {
    BINOMIAL_CACHE.get_or_init(|| {
        let mut table = [[0.0_f64; MAX_CP]; MAX_CP];
        for n in 0..MAX_CP {
            table[n][0] = 1.0;
            table[n][n] = 1.0;
            for i in 1..n {
                table[n][i] = table[n - 1][i - 1] + table[n - 1][i];
            }
        }
        table
    })
}

/// A Bezier curve over a fixed set of control points, with an optimization
/// cache for repeatedly evaluating the error while a single interior
/// control point varies.
#[derive(Clone)]
pub struct BezierCurve {
    n_cp: usize,
    control_points: Vec<Point2>,
    variable_cp: Option<usize>,
    params: Vec<f64>,
    /// `p_cache[p][i]` = `C(n, i) * t_p^i * (1 - t_p)^(n - i)`.
    p_cache: Vec<Vec<f64>>,
    /// `k_cache[p]` = sum over `i != variable_cp` of `p_cache[p][i] * control_points[i]`.
    k_cache: Vec<Point2>,
}

impl BezierCurve {
    /// Builds a curve from its control points. `binomial_table()` must have
    /// already been warmed (it is, lazily, on first call, but constructing
    /// many evaluators concurrently should call it up front to avoid racing
    /// the `OnceLock` under contention).
    pub fn new(control_points: Vec<Point2>) -> Result<Self, ConfigError> {
        let n_cp = control_points.len();
        if n_cp < 2 {
            return Err(ConfigError::TooFewControlPoints(n_cp));
        }
        if n_cp > MAX_CP {
            return Err(ConfigError::TooManyControlPoints {
                got: n_cp,
                max: MAX_CP,
            });
        }
        binomial_table();
        Ok(Self {
            n_cp,
            control_points,
            variable_cp: None,
            params: Vec::new(),
            p_cache: Vec::new(),
            k_cache: Vec::new(),
        })
    }

    pub fn n_cp(&self) -> usize {
        self.n_cp
    }

    pub fn control_points(&self) -> &[Point2] {
        &self.control_points
    }

    pub fn control_point(&self, i: usize) -> Point2 {
        self.control_points[i]
    }

    pub fn set_control_point(&mut self, i: usize, value: Point2) {
        self.control_points[i] = value;
        if self.variable_cp == Some(i) {
            log::debug!("control point {i} changed in place without rebuilding k_cache");
        }
    }

    /// Evaluates `B(t)` directly from the control points, without any cache.
    /// Used for unparameterized queries such as output sampling.
    pub fn evaluate(&self, t: f64) -> Point2 {
        let n = self.n_cp - 1;
        let table = binomial_table();
        let mut acc = Point2::ZERO;
        for (i, cp) in self.control_points.iter().enumerate() {
            let basis = table[n][i] * t.powi(i as i32) * (1.0 - t).powi((n - i) as i32);
            acc = acc + *cp * basis;
        }
        acc
    }

    /// Naive per-coordinate sum of squared residuals against `points`
    /// sampled at `params`, bypassing any cache. Endpoints (index 0 and
    /// `N - 1`) are excluded: they coincide with the curve's endpoints and
    /// contribute zero.
    pub fn sum_squared_error(&self, points: &[Point2], params: &[f64]) -> Point2 {
        assert_eq!(points.len(), params.len());
        let n = points.len();
        let mut err = Point2::ZERO;
        if n < 2 {
            return err;
        }
        for k in 1..n - 1 {
            let b = self.evaluate(params[k]);
            let dx = points[k].x - b.x;
            let dy = points[k].y - b.y;
            err.x += dx * dx;
            err.y += dy * dy;
        }
        err
    }

    /// Rebuilds the parameter-product cache for `params`. Must be called
    /// before any cached evaluation, and again whenever the parameter
    /// sequence changes. O(N * n_cp).
    pub fn bind_parameters(&mut self, params: &[f64]) {
        let n = self.n_cp - 1;
        let table = binomial_table();
        self.params = params.to_vec();
        self.p_cache = params
            .iter()
            .map(|&t| {
                (0..self.n_cp)
                    .map(|i| table[n][i] * t.powi(i as i32) * (1.0 - t).powi((n - i) as i32))
                    .collect()
            })
            .collect();
        if let Some(v) = self.variable_cp {
            self.rebuild_k_cache(v);
        }
    }

    /// Sets the interior control point index currently treated as the free
    /// variable and rebuilds the constant-contribution cache. O(N * n_cp).
    pub fn set_variable_cp(&mut self, i: usize) -> Result<(), ConfigError> {
        if self.n_cp < 3 {
            return Err(ConfigError::TooFewControlPoints(self.n_cp));
        }
        if i == 0 || i >= self.n_cp - 1 {
            return Err(ConfigError::InvalidBounds {
                dim: i,
                lo: 1.0,
                hi: (self.n_cp - 2) as f64,
            });
        }
        self.rebuild_k_cache(i);
        Ok(())
    }

    pub fn variable_cp(&self) -> Option<usize> {
        self.variable_cp
    }

    fn rebuild_k_cache(&mut self, variable_cp: usize) {
        self.variable_cp = Some(variable_cp);
        self.k_cache = self
            .p_cache
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(i, _)| *i != variable_cp)
                    .fold(Point2::ZERO, |acc, (i, &p)| acc + self.control_points[i] * p)
            })
            .collect();
    }

    /// Evaluates the per-coordinate squared-error sum treating `candidate`
    /// as the value of the bound `variable_cp`, using the parameter-product
    /// and constant-contribution caches. O(N), the hot path of the solver.
    pub fn sum_squared_error_cached(&self, candidate: Point2, points: &[Point2]) -> Point2 {
        let variable_cp = self
            .variable_cp
            .expect("sum_squared_error_cached called before set_variable_cp");
        let mut err = Point2::ZERO;
        let n = points.len();
        for k in 1..n - 1 {
            let b = candidate * self.p_cache[k][variable_cp] + self.k_cache[k];
            let dx = points[k].x - b.x;
            let dy = points[k].y - b.y;
            err.x += dx * dx;
            err.y += dy * dy;
        }
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> BezierCurve {
        BezierCurve::new(vec![Point2::new(0.0, 0.0), Point2::new(10.0, 10.0)]).unwrap()
    }

    #[test]
    fn evaluate_line_is_linear_interpolation() {
        let c = line();
        let mid = c.evaluate(0.5);
        assert!((mid.x - 5.0).abs() < 1e-9);
        assert!((mid.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn binomial_table_matches_pascals_triangle() {
        let t = binomial_table();
        assert_eq!(t[4][0], 1.0);
        assert_eq!(t[4][1], 4.0);
        assert_eq!(t[4][2], 6.0);
        assert_eq!(t[4][4], 1.0);
    }

    #[test]
    fn cached_error_matches_naive_error() {
        let mut c = BezierCurve::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 10.0),
            Point2::new(10.0, 0.0),
        ])
        .unwrap();
        let points: Vec<Point2> = (0..5)
            .map(|k| c.evaluate(k as f64 / 4.0))
            .collect();
        let params: Vec<f64> = (0..5).map(|k| k as f64 / 4.0).collect();

        c.bind_parameters(&params);
        c.set_variable_cp(1).unwrap();

        let naive = c.sum_squared_error(&points, &params);
        let cached = c.sum_squared_error_cached(c.control_point(1), &points);

        assert!((naive.x - cached.x).abs() < 1e-9);
        assert!((naive.y - cached.y).abs() < 1e-9);
    }

    #[test]
    fn too_many_control_points_is_rejected() {
        let cps = vec![Point2::ZERO; MAX_CP + 1];
        assert!(matches!(
            BezierCurve::new(cps),
            Err(ConfigError::TooManyControlPoints { .. })
        ));
    }

    #[test]
    fn set_variable_cp_rejects_endpoints() {
        let mut c = BezierCurve::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 10.0),
            Point2::new(10.0, 0.0),
        ])
        .unwrap();
        assert!(c.set_variable_cp(0).is_err());
        assert!(c.set_variable_cp(2).is_err());
        assert!(c.set_variable_cp(1).is_ok());
    }
}
