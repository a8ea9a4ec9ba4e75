//! Differential Evolution (DE) core for Bezier curve fitting.
//!
//! This crate provides the numerical engine used to recover the interior
//! control points of a Bezier curve from an ordered set of 2D data points:
//! a cached Bezier evaluator (`bezier`), a sequential DE solver with
//! per-dimension error acceptance (`solver`), a worker-pool-parallel
//! variant sharing a ring-migration step (`parallel`), and a thin
//! per-control-point fitting driver (`fit`) that ties them together.
//!
//! Boundary concerns (SVG parsing, chord-length parameterization, CLI
//! argument handling, result rendering) live in the sibling `bezier-io`
//! and `bezier-cli` crates.

mod config;
mod distinct_indices;
mod error;
mod fit;
mod parallel;
mod point;

pub mod bezier;
pub mod solver;

pub use bezier::{BezierCurve, MAX_CP};
pub use config::{DeConfig, DeConfigBuilder, ParallelConfig, ParallelConfigBuilder};
pub use error::ConfigError;
pub use fit::{FitRunner, Schedule};
pub use parallel::ParallelDe;
pub use point::Point2;
pub use solver::DeSolver;
