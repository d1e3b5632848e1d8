use ahash::AHashSet;

use crate::{error::ConfigError, types::Region};

/// Validate region names and keep only the selected regions, preserving input order.
///
/// `selection` of `None` keeps every region, including an empty set, which later
/// falls back to the implicit single region. Names must be unique, every selected
/// name must exist, and a selection must leave at least one region.
pub fn select_regions(regions: Vec<Region>, selection: Option<&[String]>) -> Result<Vec<Region>, ConfigError> {
    let mut names = AHashSet::with_capacity(regions.len());
    for region in &regions {
        if !names.insert(region.name()) {
            return Err(ConfigError::DuplicateRegion(region.name().to_string()));
        }
    }

    let Some(selection) = selection else { return Ok(regions) };

    if let Some(missing) = selection.iter().find(|name| !names.contains(name.as_str())) {
        return Err(ConfigError::UnknownRegion(missing.clone()));
    }
    let wanted = selection.iter().map(String::as_str).collect::<AHashSet<_>>();
    let regions = regions.into_iter()
        .filter(|region| wanted.contains(region.name()))
        .collect::<Vec<_>>();

    if regions.is_empty() { return Err(ConfigError::NoRegions) }
    Ok(regions)
}
