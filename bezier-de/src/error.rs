use thiserror::Error;

/// Errors raised while validating configuration before a solve begins.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("population size must be at least 4, got {0}")]
    PopulationTooSmall(usize),

    #[error("mutation factor {0} is out of the [0, 1] range")]
    MutationFactorOutOfRange(f64),

    #[error("crossover rate {0} is out of the [0, 1] range")]
    CrossoverRateOutOfRange(f64),

    #[error("lower bound {lo} is not less than upper bound {hi} on dimension {dim}")]
    InvalidBounds { dim: usize, lo: f64, hi: f64 },

    #[error("worker count must be at least 1, got {0}")]
    WorkerCountTooSmall(usize),

    #[error("population {pop} is not divisible by worker count {workers}")]
    PopulationNotDivisible { pop: usize, workers: usize },

    #[error("migration probability {0} is out of the [0, 1] range")]
    MigrationProbabilityOutOfRange(f64),

    #[error("control point count {got} exceeds the maximum of {max}")]
    TooManyControlPoints { got: usize, max: usize },

    #[error("need at least 2 control points to fit an interior point, got {0}")]
    TooFewControlPoints(usize),

    #[error("data set has {0} points, need at least 2")]
    TooFewDataPoints(usize),

    #[error("parameter count {params} does not match point count {points}")]
    ParameterPointMismatch { params: usize, points: usize },
}
