//! Sequential Differential Evolution solver with per-dimension error
//! acceptance.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::Rng;

use crate::distinct_indices::distinct_indices;

/// One generation's worth of state plus the callbacks that make this solver
/// usable for an arbitrary error-producing, arbitrary-domain problem.
///
/// `D` is the dimensionality of a single population member (2 for this
/// crate's Bezier-fitting use, since a control point is an (x, y) pair).
pub struct DeSolver<const D: usize> {
    population: Vec<[f64; D]>,
    pop_errors: Vec<[f64; D]>,
    cr: f64,
    f: f64,
    rng: StdRng,
    evaluate_error: Box<dyn Fn(&[f64; D]) -> [f64; D] + Send + Sync>,
    error_is_better: Box<dyn Fn(f64, f64) -> bool + Send + Sync>,
}

impl<const D: usize> DeSolver<D> {
    /// Allocates the population and evaluates its initial errors.
    ///
    /// `sample_domain` is called `m * D` times; `evaluate_error`, `m` times.
    pub fn new(
        cr: f64,
        f: f64,
        m: usize,
        seed: u64,
        mut sample_domain: Box<dyn FnMut(&mut StdRng) -> f64 + Send>,
        evaluate_error: Box<dyn Fn(&[f64; D]) -> [f64; D] + Send + Sync>,
        error_is_better: Box<dyn Fn(f64, f64) -> bool + Send + Sync>,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let population: Vec<[f64; D]> = (0..m)
            .map(|_| std::array::from_fn(|_| sample_domain(&mut rng)))
            .collect();
        let pop_errors: Vec<[f64; D]> = population.iter().map(|p| evaluate_error(p)).collect();
        log::info!("DeSolver constructed: m={m}, cr={cr}, f={f}");
        Self {
            population,
            pop_errors,
            cr,
            f,
            rng,
            evaluate_error,
            error_is_better,
        }
    }

    pub fn population_size(&self) -> usize {
        self.population.len()
    }

    /// Runs one generation of mutation, crossover and per-dimension
    /// selection over every population member.
    pub fn step(&mut self) {
        let m = self.population.len();
        for a in 0..m {
            let (r1, r2, r3) = distinct_indices(&mut self.rng, m, a);
            let mutant: [f64; D] = std::array::from_fn(|d| {
                self.population[r1][d] + self.f * (self.population[r2][d] - self.population[r3][d])
            });
            let mut j = self.rng.random_range(0..D);
            let mut v = self.population[a];
            for step in 0..D {
                if step == 0 || self.rng.random::<f64>() <= self.cr {
                    v[j] = mutant[j];
                } else {
                    v[j] = self.population[a][j];
                }
                j = (j + 1) % D;
            }

            let e_new = (self.evaluate_error)(&v);
            for d in 0..D {
                if (self.error_is_better)(e_new[d], self.pop_errors[a][d]) {
                    self.population[a][d] = v[d];
                    self.pop_errors[a][d] = e_new[d];
                }
            }
        }
        log::debug!("generation complete, best error = {:?}", self.best().0);
    }

    pub fn step_n(&mut self, k: usize) {
        for _ in 0..k {
            self.step();
        }
    }

    /// Returns the best error/position pair, computed independently per
    /// dimension: dimension `d`'s error and position coordinate come from
    /// whichever population member is best in that dimension, which may
    /// differ member-to-member across dimensions.
    pub fn best(&self) -> ([f64; D], [f64; D]) {
        let mut best_error = self.pop_errors[0];
        let mut best_index = [0usize; D];
        for a in 1..self.population.len() {
            for d in 0..D {
                if (self.error_is_better)(self.pop_errors[a][d], best_error[d]) {
                    best_error[d] = self.pop_errors[a][d];
                    best_index[d] = a;
                }
            }
        }
        let best_position = std::array::from_fn(|d| self.population[best_index[d]][d]);
        (best_error, best_position)
    }

    pub fn population(&self) -> &[[f64; D]] {
        &self.population
    }

    pub fn pop_errors(&self) -> &[[f64; D]] {
        &self.pop_errors
    }

    /// Overwrites population member `slot` (used by the parallel driver's
    /// ring migration). Replaces both the position and its errors, since a
    /// migrated candidate has not been evaluated against this population's
    /// error callback yet.
    pub fn inject(&mut self, slot: usize, position: [f64; D]) {
        let error = (self.evaluate_error)(&position);
        self.population[slot] = position;
        self.pop_errors[slot] = error;
    }
}
