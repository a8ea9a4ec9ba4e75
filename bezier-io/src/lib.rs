//! Data ingestion and boundary helpers for `bezier-de`: CSV point
//! ingestion, chord-length parameterization, a `DataSet` container, and a
//! thin SVG path renderer for fitted curves.
//!
//! None of this crate's concerns are part of the DE core itself: they are
//! the boundary collaborators the core consumes values from or emits
//! values to.

mod chord_length;
mod csv_points;
mod dataset;
mod error;
mod svg;

pub use chord_length::chord_length_parameterize;
pub use csv_points::read_points_csv;
pub use dataset::DataSet;
pub use error::BezierIoError;
pub use svg::render_svg_path;
