use tracing::{debug, info};

use crate::{geom::{self, Containment, ContainmentStrategy}, types::{Region, Street}};

/// Name of the implicit region used when no regions are supplied.
pub const SINGLE_REGION: &str = "[single_region]";

/// Streets tagged with their region, and the regions they were matched against.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub streets: Vec<Street>,
    pub regions: Vec<Region>,
    /// Number of streets that matched no region and were removed.
    pub dropped: usize,
}

/// Assign every street to at most one region, dropping streets that match none.
///
/// Without regions (`None` or empty), all streets go to a single implicit region
/// whose boundary is the bounding rectangle of every street coordinate.
pub fn assign(streets: Vec<Street>, regions: Option<Vec<Region>>, strategy: ContainmentStrategy) -> Assignment {
    match regions {
        Some(regions) if !regions.is_empty() => {
            let (streets, dropped) = {
                let containment = strategy.build(&regions);
                assign_with(streets, &regions, containment.as_ref())
            };
            Assignment { streets, regions, dropped }
        }
        _ => {
            let region = Region::new(
                SINGLE_REGION,
                geom::rect_to_multipolygon(geom::streets_bounds(&streets)),
            );
            info!("no regions supplied, using {} with area {}", SINGLE_REGION, region.area());

            let streets = streets.into_iter()
                .map(|mut street| { street.set_region(region.shared_name()); street })
                .collect();
            Assignment { streets, regions: vec![region], dropped: 0 }
        }
    }
}

/// Tag streets using an explicit containment test over `regions`.
///
/// Coordinates are scanned in street order and each is matched against the first
/// containing region; the street takes the match of the *last* coordinate that
/// matched anything. Returns the surviving streets and how many were dropped.
pub fn assign_with(streets: Vec<Street>, regions: &[Region], containment: &dyn Containment) -> (Vec<Street>, usize) {
    let total = streets.len();

    let assigned = streets.into_iter()
        .filter_map(|mut street| {
            let last_match = street.coords().iter()
                .filter_map(|&coord| containment.first_container(coord))
                .last()?;
            street.set_region(regions[last_match].shared_name());
            Some(street)
        })
        .collect::<Vec<_>>();

    let dropped = total - assigned.len();
    if dropped > 0 {
        debug!("dropped {dropped} of {total} streets outside every region");
    }
    info!("assigned {} streets to {} regions", assigned.len(), regions.len());

    (assigned, dropped)
}
