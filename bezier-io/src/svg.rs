use std::fmt::Write as _;

use bezier_de::BezierCurve;

/// Renders `curve` as a single SVG `<path>` element, sampled at `samples`
/// uniformly-spaced parameter values. A thin boundary helper: SVG
/// *authoring* beyond this single element is a caller concern.
pub fn render_svg_path(curve: &BezierCurve, samples: usize) -> String {
    assert!(samples >= 2, "need at least 2 samples to draw a path");
    let mut d = String::new();
    for k in 0..samples {
        let t = k as f64 / (samples - 1) as f64;
        let p = curve.evaluate(t);
        if k == 0 {
            let _ = write!(d, "M {:.6} {:.6}", p.x, p.y);
        } else {
            let _ = write!(d, " L {:.6} {:.6}", p.x, p.y);
        }
    }
    format!(r#"<path d="{d}" fill="none" stroke="black"/>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_starts_and_ends_at_curve_endpoints() {
        let curve = BezierCurve::new(vec![
            bezier_de::Point2::new(0.0, 0.0),
            bezier_de::Point2::new(10.0, 10.0),
        ])
        .unwrap();
        let path = render_svg_path(&curve, 5);
        assert!(path.starts_with("<path d=\"M 0.000000 0.000000"));
        assert!(path.contains("L 10.000000 10.000000"));
    }
}
