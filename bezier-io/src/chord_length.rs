use bezier_de::Point2;

/// Chord-length parameterization: `t_k` is the cumulative edge length up to
/// point `k`, normalized by the total perimeter. `t_0 = 0`, `t_{N-1} = 1`.
///
/// Returns an all-zero vector for fewer than 2 points, and `[0.0]` for a
/// single point.
pub fn chord_length_parameterize(points: &[Point2]) -> Vec<f64> {
    if points.len() < 2 {
        return vec![0.0; points.len()];
    }
    let mut cumulative = vec![0.0; points.len()];
    for k in 1..points.len() {
        cumulative[k] = cumulative[k - 1] + points[k].distance(&points[k - 1]);
    }
    let total = cumulative[points.len() - 1];
    if total == 0.0 {
        log::warn!("chord_length_parameterize: total perimeter is zero, all points coincide");
        return cumulative;
    }
    cumulative.iter().map(|&c| c / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collinear_evenly_spaced_points_reproduce_uniform_spacing() {
        let n = 11;
        let points: Vec<Point2> = (0..n).map(|k| Point2::new(k as f64, 0.0)).collect();
        let params = chord_length_parameterize(&points);
        for (k, &t) in params.iter().enumerate() {
            let expected = k as f64 / (n - 1) as f64;
            assert!((t - expected).abs() < 1e-12, "k={k} t={t} expected={expected}");
        }
    }

    #[test]
    fn endpoints_are_zero_and_one() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 4.0),
            Point2::new(3.0, 9.0),
        ];
        let params = chord_length_parameterize(&points);
        assert_eq!(params[0], 0.0);
        assert_eq!(*params.last().unwrap(), 1.0);
    }
}
