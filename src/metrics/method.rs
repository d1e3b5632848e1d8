use std::{fmt, str::FromStr};

use crate::error::ConfigError;

/// Every method token accepted on input, in canonical (lowercase) form.
pub const VOCABULARY: [&str; 18] = [
    "all",
    "range_min",
    "range_mean",
    "range_median",
    "range_max",
    "range_var",
    "variance_min",
    "variance_mean",
    "variance_median",
    "variance_max",
    "variance_var",
    "direction_changes_min",
    "direction_changes_mean",
    "direction_changes_median",
    "direction_changes_max",
    "direction_changes_var",
    "density_streets",
    "density_points",
];

const ALL: &str = "all";

/// Statistic categories, in output column order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    Range,
    Variance,
    DirectionChanges,
    DensityStreets,
    DensityPoints,
}

impl Family {
    pub const ALL: [Family; 5] = [
        Family::Range,
        Family::Variance,
        Family::DirectionChanges,
        Family::DensityStreets,
        Family::DensityPoints,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Family::Range => "range",
            Family::Variance => "variance",
            Family::DirectionChanges => "direction_changes",
            Family::DensityStreets => "density_streets",
            Family::DensityPoints => "density_points",
        }
    }

    /// Whether the family reduces each street to a scalar and then aggregates across streets.
    pub fn is_per_street(self) -> bool {
        matches!(self, Family::Range | Family::Variance | Family::DirectionChanges)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Aggregate functions applied across a region's per-street values, in output column order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AggregateFn {
    Min,
    Mean,
    Median,
    Max,
    Var,
}

impl AggregateFn {
    pub const ALL: [AggregateFn; 5] = [
        AggregateFn::Min,
        AggregateFn::Mean,
        AggregateFn::Median,
        AggregateFn::Max,
        AggregateFn::Var,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AggregateFn::Min => "min",
            AggregateFn::Mean => "mean",
            AggregateFn::Median => "median",
            AggregateFn::Max => "max",
            AggregateFn::Var => "var",
        }
    }
}

impl fmt::Display for AggregateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// A validated method token from [`VOCABULARY`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Method(&'static str);

impl Method {
    #[inline] pub fn token(self) -> &'static str { self.0 }
}

impl FromStr for Method {
    type Err = ConfigError;

    /// Case-insensitive lookup in the vocabulary.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        VOCABULARY.iter()
            .find(|&&token| token == lower)
            .map(|&token| Method(token))
            .ok_or_else(|| ConfigError::UnknownMethod(s.to_string()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.0) }
}

/// Whether any column of `family` may be emitted for the raw `tokens`.
///
/// Matching is by substring, not by parsing tokens apart: a per-street family applies if
/// `all` was requested or any token contains the family name. The density families apply
/// only for their exact token or `all`.
pub fn family_applies(tokens: &[&str], family: Family) -> bool {
    if tokens.contains(&ALL) { return true }
    if family.is_per_street() {
        tokens.iter().any(|token| token.contains(family.name()))
    } else {
        tokens.contains(&family.name())
    }
}

/// Whether the `{family}_{aggregate}` column is emitted for the raw `tokens`.
///
/// The tokens containing the family name (plus `all`, if present) are collected, and the
/// aggregate applies if that list holds `all` or any entry contains the aggregate name as
/// a substring. So `variance_min` activates both `variance_min` and `variance_var`, and a
/// bare `range` activates nothing.
pub fn aggregate_applies(tokens: &[&str], family: Family, aggregate: AggregateFn) -> bool {
    if !family.is_per_street() || !family_applies(tokens, family) { return false }

    let scoped = tokens.iter()
        .copied()
        .filter(|token| token.contains(family.name()) || *token == ALL)
        .collect::<Vec<_>>();

    scoped.contains(&ALL) || scoped.iter().any(|token| token.contains(aggregate.name()))
}

/// The validated set of requested method tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodSelection {
    methods: Vec<Method>,
}

impl MethodSelection {
    /// Validate raw tokens. Duplicates are dropped, first occurrence wins.
    pub fn parse<I, S>(tokens: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut methods = Vec::new();
        for token in tokens {
            let method = token.as_ref().parse::<Method>()?;
            if !methods.contains(&method) { methods.push(method) }
        }
        if methods.is_empty() { return Err(ConfigError::NoMethods) }
        Ok(Self { methods })
    }

    /// Selection containing only `all`.
    pub fn all() -> Self { Self { methods: vec![Method(ALL)] } }

    #[inline] pub fn methods(&self) -> &[Method] { &self.methods }

    #[inline]
    fn tokens(&self) -> Vec<&'static str> { self.methods.iter().map(|m| m.token()).collect() }

    /// Whether any column of `family` may be emitted.
    pub fn applies_family(&self, family: Family) -> bool {
        family_applies(&self.tokens(), family)
    }

    /// Whether the `{family}_{aggregate}` column is emitted.
    pub fn applies_aggregate(&self, family: Family, aggregate: AggregateFn) -> bool {
        aggregate_applies(&self.tokens(), family, aggregate)
    }

    /// Metric column names these methods produce, in output order (excluding `region` and `area`).
    pub fn columns(&self) -> Vec<String> {
        let mut columns = Vec::new();
        for family in Family::ALL {
            match family {
                Family::DensityStreets if self.applies_family(family) => {
                    columns.extend(["n_streets".to_string(), "density_streets".to_string()]);
                }
                Family::DensityPoints if self.applies_family(family) => {
                    columns.extend(["n_points".to_string(), "density_points".to_string()]);
                }
                _ if family.is_per_street() => {
                    columns.extend(AggregateFn::ALL.into_iter()
                        .filter(|&aggregate| self.applies_aggregate(family, aggregate))
                        .map(|aggregate| format!("{family}_{aggregate}")));
                }
                _ => {}
            }
        }
        columns
    }
}

impl Default for MethodSelection {
    fn default() -> Self { Self::all() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive_and_deduplicates() {
        let selection = MethodSelection::parse(["Range_Mean", "range_mean", "ALL"]).unwrap();
        let tokens = selection.methods().iter().map(|m| m.token()).collect::<Vec<_>>();
        assert_eq!(tokens, vec!["range_mean", "all"]);
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert_eq!(
            MethodSelection::parse(["range_mean", "curliness"]),
            Err(ConfigError::UnknownMethod("curliness".into()))
        );
        // A bare family name is not part of the vocabulary.
        assert_eq!(
            MethodSelection::parse(["range"]),
            Err(ConfigError::UnknownMethod("range".into()))
        );
    }

    #[test]
    fn empty_selection_is_rejected() {
        assert_eq!(MethodSelection::parse(Vec::<String>::new()), Err(ConfigError::NoMethods));
    }

    #[test]
    fn all_activates_every_column() {
        let columns = MethodSelection::all().columns();
        assert_eq!(columns.len(), 3 * 5 + 4);
        assert_eq!(columns[0], "range_min");
        assert_eq!(&columns[15..], &["n_streets", "density_streets", "n_points", "density_points"]);
    }

    #[test]
    fn compound_token_activates_its_aggregate() {
        let selection = MethodSelection::parse(["range_mean"]).unwrap();
        assert_eq!(selection.columns(), vec!["range_mean"]);
    }

    #[test]
    fn var_is_a_substring_of_variance() {
        let selection = MethodSelection::parse(["variance_min"]).unwrap();
        assert_eq!(selection.columns(), vec!["variance_min", "variance_var"]);
    }

    #[test]
    fn aggregates_do_not_leak_across_families() {
        let selection = MethodSelection::parse(["range_max", "direction_changes_median"]).unwrap();
        assert_eq!(selection.columns(), vec!["range_max", "direction_changes_median"]);
        assert!(!selection.applies_family(Family::Variance));
    }

    #[test]
    fn bare_family_token_activates_no_aggregate() {
        for aggregate in AggregateFn::ALL {
            assert!(!aggregate_applies(&["range"], Family::Range, aggregate));
        }
        // The family itself still matches, it just has nothing to emit.
        assert!(family_applies(&["range"], Family::Range));
    }

    #[test]
    fn density_tokens_apply_exactly() {
        let selection = MethodSelection::parse(["density_streets"]).unwrap();
        assert_eq!(selection.columns(), vec!["n_streets", "density_streets"]);
        assert!(!selection.applies_family(Family::DensityPoints));
        assert!(!selection.applies_aggregate(Family::DensityStreets, AggregateFn::Mean));
    }
}
