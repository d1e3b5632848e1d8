//! Discrete curvature of a sampled parametric curve.
//!
//! A polyline is treated as `(x(t), y(t))` sampled at unit steps of `t`.
//! Derivatives use central differences in the interior and one-sided
//! differences at both ends, and the curvature at each vertex is
//!
//! ```text
//! k = |x'' y' - x' y''| / (x'^2 + y'^2)^(3/2)
//! ```
//!
//! Zero velocity (repeated vertices, single-vertex streets) yields a
//! non-finite value at that vertex rather than an error.

use geo::Coord;

/// First derivative with unit spacing, same length as the input.
///
/// Interior points average the two neighboring differences, the endpoints
/// take a single forward or backward difference. A single sample has a
/// derivative of zero.
pub fn gradient(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..n)
            .map(|i| match i {
                0 => values[1] - values[0],
                i if i == n - 1 => values[n - 1] - values[n - 2],
                i => (values[i + 1] - values[i - 1]) / 2.0,
            })
            .collect(),
    }
}

/// Curvature at every vertex of `coords`. The output is aligned by index with the input.
pub fn curvature(coords: &[Coord<f64>]) -> Vec<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = coords.iter().map(|c| (c.x, c.y)).unzip();

    let dx = gradient(&xs);
    let dy = gradient(&ys);
    let d2x = gradient(&dx);
    let d2y = gradient(&dy);

    (0..coords.len())
        .map(|i| {
            let speed_sq = dx[i] * dx[i] + dy[i] * dy[i];
            (d2x[i] * dy[i] - dx[i] * d2y[i]).abs() / speed_sq.powf(1.5)
        })
        .collect()
}
