//! Fluent configuration builders for sequential and parallel solves.

use crate::error::ConfigError;

/// Configuration for a sequential [`crate::DeSolver`] run.
#[derive(Debug, Clone)]
pub struct DeConfig {
    pub cr: f64,
    pub f: f64,
    pub population: usize,
    pub domain_limit: f64,
    pub generations: usize,
    pub seed: u64,
}

impl DeConfig {
    pub fn builder() -> DeConfigBuilder {
        DeConfigBuilder::default()
    }
}

#[derive(Debug, Clone)]
pub struct DeConfigBuilder {
    cr: f64,
    f: f64,
    population: usize,
    domain_limit: f64,
    generations: usize,
    seed: u64,
}

impl Default for DeConfigBuilder {
    fn default() -> Self {
        Self {
            cr: 0.9,
            f: 0.8,
            population: 128,
            domain_limit: 128.0,
            generations: 200,
            seed: 0,
        }
    }
}

impl DeConfigBuilder {
    pub fn cr(mut self, cr: f64) -> Self {
        self.cr = cr;
        self
    }

    pub fn f(mut self, f: f64) -> Self {
        self.f = f;
        self
    }

    pub fn population(mut self, population: usize) -> Self {
        self.population = population;
        self
    }

    pub fn domain_limit(mut self, domain_limit: f64) -> Self {
        self.domain_limit = domain_limit;
        self
    }

    pub fn generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<DeConfig, ConfigError> {
        validate_rates(self.cr, self.f)?;
        if self.population < 4 {
            return Err(ConfigError::PopulationTooSmall(self.population));
        }
        Ok(DeConfig {
            cr: self.cr,
            f: self.f,
            population: self.population,
            domain_limit: self.domain_limit,
            generations: self.generations,
            seed: self.seed,
        })
    }
}

/// Configuration for a [`crate::ParallelDe`] run: a [`DeConfig`] plus the
/// worker count and migration probability.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    pub base: DeConfig,
    pub workers: usize,
    pub phi: f64,
}

impl ParallelConfig {
    pub fn builder() -> ParallelConfigBuilder {
        ParallelConfigBuilder::default()
    }

    pub fn per_worker_population(&self) -> usize {
        self.base.population / self.workers
    }
}

#[derive(Debug, Clone)]
pub struct ParallelConfigBuilder {
    base: DeConfigBuilder,
    workers: usize,
    phi: f64,
}

impl Default for ParallelConfigBuilder {
    fn default() -> Self {
        Self {
            base: DeConfigBuilder::default(),
            workers: 1,
            phi: 1.0,
        }
    }
}

impl ParallelConfigBuilder {
    pub fn cr(mut self, cr: f64) -> Self {
        self.base = self.base.cr(cr);
        self
    }

    pub fn f(mut self, f: f64) -> Self {
        self.base = self.base.f(f);
        self
    }

    pub fn population(mut self, population: usize) -> Self {
        self.base = self.base.population(population);
        self
    }

    pub fn domain_limit(mut self, domain_limit: f64) -> Self {
        self.base = self.base.domain_limit(domain_limit);
        self
    }

    pub fn generations(mut self, generations: usize) -> Self {
        self.base = self.base.generations(generations);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.base = self.base.seed(seed);
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn phi(mut self, phi: f64) -> Self {
        self.phi = phi;
        self
    }

    pub fn build(self) -> Result<ParallelConfig, ConfigError> {
        let base = self.base.build()?;
        if self.workers < 1 {
            return Err(ConfigError::WorkerCountTooSmall(self.workers));
        }
        if !(0.0..=1.0).contains(&self.phi) {
            return Err(ConfigError::MigrationProbabilityOutOfRange(self.phi));
        }
        if base.population % self.workers != 0 {
            return Err(ConfigError::PopulationNotDivisible {
                pop: base.population,
                workers: self.workers,
            });
        }
        let per_worker = base.population / self.workers;
        if per_worker < 5 {
            return Err(ConfigError::PopulationTooSmall(per_worker));
        }
        Ok(ParallelConfig {
            base,
            workers: self.workers,
            phi: self.phi,
        })
    }
}

fn validate_rates(cr: f64, f: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&cr) {
        return Err(ConfigError::CrossoverRateOutOfRange(cr));
    }
    if !(0.0..=1.0).contains(&f) {
        return Err(ConfigError::MutationFactorOutOfRange(f));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(DeConfig::builder().build().is_ok());
    }

    #[test]
    fn rejects_out_of_range_crossover_rate() {
        let err = DeConfig::builder().cr(1.5).build().unwrap_err();
        assert!(matches!(err, ConfigError::CrossoverRateOutOfRange(_)));
    }

    #[test]
    fn rejects_population_not_divisible_by_workers() {
        let err = ParallelConfig::builder()
            .population(100)
            .workers(3)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::PopulationNotDivisible { .. }));
    }

    #[test]
    fn rejects_sub_population_below_five() {
        let err = ParallelConfig::builder()
            .population(20)
            .workers(10)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::PopulationTooSmall(_)));
    }

    #[test]
    fn accepts_valid_parallel_config() {
        let cfg = ParallelConfig::builder()
            .population(128)
            .workers(4)
            .phi(1.0)
            .build()
            .unwrap();
        assert_eq!(cfg.per_worker_population(), 32);
    }
}
