use bezier_de::Point2;

use crate::chord_length::chord_length_parameterize;
use crate::error::BezierIoError;

/// An ordered sequence of data points paired with a parameter value per
/// point, both of the same length, with the first parameter equal to 0 and
/// the last equal to 1.
#[derive(Debug, Clone)]
pub struct DataSet {
    pub points: Vec<Point2>,
    pub params: Vec<f64>,
}

impl DataSet {
    /// Pairs `points` with caller-supplied `params` (e.g. an externally
    /// computed parameterization). Requires at least 3 points: fewer than
    /// that leaves no interior point for a fit to ever optimize.
    pub fn new(points: Vec<Point2>, params: Vec<f64>) -> Result<Self, BezierIoError> {
        if points.len() < 3 {
            return Err(BezierIoError::TooFewDataPoints(points.len()));
        }
        if points.len() != params.len() {
            return Err(BezierIoError::MismatchedLengths {
                points: points.len(),
                params: params.len(),
            });
        }
        Ok(Self { points, params })
    }

    /// Pairs `points` with chord-length parameters computed from the points
    /// themselves.
    pub fn from_points(points: Vec<Point2>) -> Result<Self, BezierIoError> {
        if points.len() < 3 {
            return Err(BezierIoError::TooFewDataPoints(points.len()));
        }
        let params = chord_length_parameterize(&points);
        Ok(Self { points, params })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_too_few_points() {
        let points = vec![Point2::ZERO, Point2::new(1.0, 0.0)];
        assert!(matches!(
            DataSet::from_points(points),
            Err(BezierIoError::TooFewDataPoints(2))
        ));
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let points = vec![Point2::ZERO, Point2::new(1.0, 0.0), Point2::new(2.0, 0.0)];
        let params = vec![0.0, 1.0];
        assert!(matches!(
            DataSet::new(points, params),
            Err(BezierIoError::MismatchedLengths { .. })
        ));
    }

    #[test]
    fn from_points_assigns_chord_length_params() {
        let points = vec![Point2::ZERO, Point2::new(1.0, 0.0), Point2::new(2.0, 0.0)];
        let ds = DataSet::from_points(points).unwrap();
        assert_eq!(ds.params, vec![0.0, 0.5, 1.0]);
    }
}
