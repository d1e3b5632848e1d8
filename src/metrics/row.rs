use std::fmt;

/// A single computed metric: either a real-valued statistic or a count.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MetricValue {
    Float(f64),
    Count(usize),
}

impl MetricValue {
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            MetricValue::Float(value) => value,
            MetricValue::Count(count) => count as f64,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Float(value) => write!(f, "{value}"),
            MetricValue::Count(count) => write!(f, "{count}"),
        }
    }
}

/// Metrics for one region. Built once per region and never modified afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricRow {
    region: String,
    area: f64,
    metrics: Vec<(String, MetricValue)>, // In output column order.
}

impl MetricRow {
    pub fn new(region: impl Into<String>, area: f64, metrics: Vec<(String, MetricValue)>) -> Self {
        Self { region: region.into(), area, metrics }
    }

    #[inline] pub fn region(&self) -> &str { &self.region }

    #[inline] pub fn area(&self) -> f64 { self.area }

    /// Computed metric columns, excluding `region` and `area`.
    #[inline] pub fn metrics(&self) -> &[(String, MetricValue)] { &self.metrics }

    /// Look up a metric column by name.
    pub fn get(&self, column: &str) -> Option<MetricValue> {
        self.metrics.iter()
            .find(|(name, _)| name == column)
            .map(|&(_, value)| value)
    }

    /// All column names of this row, starting with `region` and `area`.
    pub fn columns(&self) -> Vec<&str> {
        ["region", "area"].into_iter()
            .chain(self.metrics.iter().map(|(name, _)| name.as_str()))
            .collect()
    }
}
