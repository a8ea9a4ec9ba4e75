use thiserror::Error;

/// Boundary I/O failures: CSV parsing, file access, and malformed data sets.
#[derive(Debug, Error)]
pub enum BezierIoError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("data set has {0} points, need at least 3")]
    TooFewDataPoints(usize),

    #[error("{points} points but {params} parameter values")]
    MismatchedLengths { points: usize, params: usize },
}
