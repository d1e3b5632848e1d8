use tracing::warn;

use crate::types::{Region, Street};
use super::{method::{AggregateFn, Family, MethodSelection}, reduce, row::{MetricRow, MetricValue}};

/// Compute the requested metrics for one region.
///
/// `profiles` holds one curvature profile per street, aligned by index with `streets`.
/// Columns that the selection does not activate are absent from the row.
pub fn aggregate(
    region: &Region,
    streets: &[&Street],
    profiles: &[Vec<f64>],
    methods: &MethodSelection,
) -> MetricRow {
    debug_assert_eq!(streets.len(), profiles.len(), "one profile per street");

    let area = region.area();
    let mut metrics = Vec::new();

    for family in Family::ALL {
        if !methods.applies_family(family) { continue }

        match family {
            Family::Range | Family::Variance | Family::DirectionChanges => {
                let values = profiles.iter()
                    .map(|profile| per_street(family, profile))
                    .collect::<Vec<_>>();

                metrics.extend(AggregateFn::ALL.into_iter()
                    .filter(|&aggregate| methods.applies_aggregate(family, aggregate))
                    .map(|aggregate| (
                        format!("{family}_{aggregate}"),
                        MetricValue::Float(aggregate.apply(&values)),
                    )));
            }
            Family::DensityStreets => {
                let n_streets = streets.len();
                metrics.push(("n_streets".into(), MetricValue::Count(n_streets)));
                metrics.push(("density_streets".into(), MetricValue::Float(density(n_streets, region))));
            }
            Family::DensityPoints => {
                let n_points = streets.iter().map(|street| street.len()).sum::<usize>();
                metrics.push(("n_points".into(), MetricValue::Count(n_points)));
                metrics.push(("density_points".into(), MetricValue::Float(density(n_points, region))));
            }
        }
    }

    MetricRow::new(region.name(), area, metrics)
}

/// Reduce one street's profile to the family's scalar.
fn per_street(family: Family, profile: &[f64]) -> f64 {
    match family {
        Family::Range => reduce::range(profile),
        Family::Variance => reduce::variance(profile),
        Family::DirectionChanges => reduce::direction_changes(profile) as f64,
        Family::DensityStreets | Family::DensityPoints => unreachable!("{family} is a region-level metric"),
    }
}

/// Count per unit area. Regions without a positive area get NaN instead of a division by zero.
fn density(count: usize, region: &Region) -> f64 {
    if region.area() > 0.0 {
        count as f64 / region.area()
    } else {
        warn!("region {:?} has non-positive area {}; density is undefined", region.name(), region.area());
        f64::NAN
    }
}
