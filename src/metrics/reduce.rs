//! Scalar reductions over curvature profiles and per-street values.
//!
//! NaN anywhere in the input makes min/max/median NaN, and mean/var
//! inherit it through arithmetic. Empty inputs reduce to NaN.

use super::method::AggregateFn;

/// Smallest value, NaN if any value is NaN.
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied()
        .reduce(|a, b| if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) })
        .unwrap_or(f64::NAN)
}

/// Largest value, NaN if any value is NaN.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied()
        .reduce(|a, b| if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) })
        .unwrap_or(f64::NAN)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() { return f64::NAN }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Middle value, or the average of the two middle values for even lengths.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() || values.iter().any(|v| v.is_nan()) { return f64::NAN }

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 { sorted[mid] } else { (sorted[mid - 1] + sorted[mid]) / 2.0 }
}

/// Population variance (divides by `n`).
pub fn variance(values: &[f64]) -> f64 {
    let mean = mean(values);
    if mean.is_nan() { return f64::NAN }
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64
}

/// Spread of a profile: `max - min`.
pub fn range(values: &[f64]) -> f64 {
    max(values) - min(values)
}

/// Count how often consecutive differences of `profile` reverse sign.
///
/// The running direction starts as `+1` if the first step rises and `-1`
/// otherwise. On every reversal the running direction becomes the raw
/// difference that caused it, not its sign, so later comparisons multiply
/// against that value. Profiles with two or fewer values have no changes.
pub fn direction_changes(profile: &[f64]) -> usize {
    if profile.len() <= 2 { return 0 }

    let mut direction = if profile[1] - profile[0] > 0.0 { 1.0 } else { -1.0 };
    let mut count = 0;
    for pair in profile[1..].windows(2) {
        let delta = pair[1] - pair[0];
        if delta * direction < 0.0 {
            direction = delta;
            count += 1;
        }
    }
    count
}

impl AggregateFn {
    /// Apply this aggregate across per-street values.
    pub fn apply(self, values: &[f64]) -> f64 {
        match self {
            AggregateFn::Min => min(values),
            AggregateFn::Mean => mean(values),
            AggregateFn::Median => median(values),
            AggregateFn::Max => max(values),
            AggregateFn::Var => variance(values),
        }
    }
}
