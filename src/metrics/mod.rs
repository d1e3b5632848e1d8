//! Per-region statistics over streets and their curvature profiles.

mod aggregate;
mod method;
mod reduce;
mod row;

pub use aggregate::aggregate;
pub use method::{aggregate_applies, family_applies, AggregateFn, Family, Method, MethodSelection, VOCABULARY};
pub use reduce::{direction_changes, max, mean, median, min, range, variance};
pub use row::{MetricRow, MetricValue};
