use std::path::PathBuf;

use bezier_de::{DeConfig, FitRunner, ParallelConfig, Schedule};
use bezier_io::{read_points_csv, render_svg_path};
use clap::Parser;

/// Fit a Bezier curve's interior control points to a set of 2D data points
/// with a parallel Differential Evolution search.
#[derive(Debug, Parser)]
#[command(name = "bezier-fit", version, about)]
struct Args {
    /// CSV file of data points (columns: x,y).
    #[arg(short = 'd', long = "data")]
    data: PathBuf,

    /// Number of control points, including the two pinned endpoints.
    #[arg(short = 'b', long = "control-points")]
    control_points: usize,

    /// Number of workers. 1 runs the sequential solver.
    #[arg(short = 'p', long = "workers")]
    workers: usize,

    /// Generations per control point per round.
    #[arg(short = 'g', long = "generations")]
    generations: usize,

    /// Population size (must be divisible by the worker count).
    #[arg(short = 'n', long = "population")]
    population: usize,

    /// Mutation weight F in [0, 1].
    #[arg(short = 'f', long = "mutation")]
    mutation: f64,

    /// Crossover rate CR in [0, 1].
    #[arg(short = 'c', long = "crossover")]
    crossover: f64,

    /// Run the outer per-control-point loop repeatedly until interrupted,
    /// for soak-testing the worker pool.
    #[arg(short = 's', long = "stress")]
    stress: bool,

    /// Where to write the rendered SVG path of the fitted curve.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Raise the log level (warn -> info -> debug).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Migration probability phi in [0, 1], only used when workers > 1.
    #[arg(long = "phi", default_value_t = 1.0)]
    phi: f64,

    /// Domain limit (+/-L) bounding the initial uniform sample.
    #[arg(long = "domain-limit", default_value_t = 128.0)]
    domain_limit: f64,

    /// RNG seed.
    #[arg(long = "seed", default_value_t = 0)]
    seed: u64,

    /// Number of outer rounds over all control points.
    #[arg(long = "rounds", default_value_t = 1)]
    rounds: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let points = read_points_csv(&args.data)?;
    let params = bezier_io::chord_length_parameterize(&points);

    let de_config = DeConfig::builder()
        .cr(args.crossover)
        .f(args.mutation)
        .population(args.population)
        .domain_limit(args.domain_limit)
        .generations(args.generations)
        .seed(args.seed)
        .build()?;

    let parallel_config = if args.workers > 1 {
        Some(
            ParallelConfig::builder()
                .cr(args.crossover)
                .f(args.mutation)
                .population(args.population)
                .domain_limit(args.domain_limit)
                .generations(args.generations)
                .seed(args.seed)
                .workers(args.workers)
                .phi(args.phi)
                .build()?,
        )
    } else {
        None
    };

    loop {
        let mut runner = FitRunner::new(
            points.clone(),
            params.clone(),
            args.control_points,
            de_config.clone(),
            parallel_config.clone(),
            Schedule::Forward,
            args.rounds,
        )?;
        let control_points = runner.run().to_vec();
        log::info!("fitted control points: {control_points:?}");

        if let Some(output) = &args.output {
            let curve = bezier_de::BezierCurve::new(control_points)?;
            let svg = render_svg_path(&curve, 256);
            std::fs::write(output, svg)?;
        }

        if !args.stress {
            break;
        }
    }

    Ok(())
}
