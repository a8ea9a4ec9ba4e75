use std::path::Path;

use bezier_de::Point2;
use serde::Deserialize;

use crate::error::BezierIoError;

#[derive(Debug, Deserialize)]
struct PointRecord {
    x: f64,
    y: f64,
}

/// Reads an ordered list of 2D points from a headerless-or-headered CSV
/// file with `x,y` columns. Point ingestion's concrete format for this
/// rebuild: the original engine is fed by an SVG path parser, which is out
/// of scope here, and the workspace's own CLI binaries already read curve
/// data through the `csv` crate.
pub fn read_points_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Point2>, BezierIoError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_path(path.as_ref())?;

    let mut points = Vec::new();
    for result in reader.deserialize() {
        let record: PointRecord = result?;
        points.push(Point2::new(record.x, record.y));
    }
    if points.is_empty() {
        log::warn!("read_points_csv: {} contained no data rows", path.as_ref().display());
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_points_with_header() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "x,y").unwrap();
        writeln!(file, "0,0").unwrap();
        writeln!(file, "1.5,2.5").unwrap();
        file.flush().unwrap();

        let points = read_points_csv(file.path()).unwrap();
        assert_eq!(points, vec![Point2::new(0.0, 0.0), Point2::new(1.5, 2.5)]);
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let err = read_points_csv("/nonexistent/path/does-not-exist.csv").unwrap_err();
        assert!(matches!(err, BezierIoError::Csv(_) | BezierIoError::Io(_)));
    }
}
