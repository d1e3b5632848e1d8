use geo::{BoundingRect, Contains, Coord, Point};
use rstar::{primitives::{GeomWithData, Rectangle}, RTree, AABB};
use smallvec::SmallVec;

use crate::types::Region;

/// Region bounding rectangle tagged with the region's input index.
type RegionEnvelope = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// Point-in-polygon capability over an ordered set of regions.
///
/// Implementations must report the *first* region, in input order, whose
/// boundary contains the coordinate. Points on a boundary are not contained.
pub trait Containment {
    /// Index of the first containing region, if any.
    fn first_container(&self, coord: Coord<f64>) -> Option<usize>;
}

/// Which containment implementation to build for a run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ContainmentStrategy {
    /// Test every region in order.
    #[default]
    Linear,
    /// Prefilter regions through an R-tree of bounding boxes.
    Indexed,
}

impl ContainmentStrategy {
    pub fn build<'a>(self, regions: &'a [Region]) -> Box<dyn Containment + 'a> {
        match self {
            ContainmentStrategy::Linear => Box::new(LinearScan::new(regions)),
            ContainmentStrategy::Indexed => Box::new(IndexedScan::new(regions)),
        }
    }
}

/// Naive scan over all regions, O(regions) per coordinate.
#[derive(Debug, Clone, Copy)]
pub struct LinearScan<'a> {
    regions: &'a [Region],
}

impl<'a> LinearScan<'a> {
    pub fn new(regions: &'a [Region]) -> Self { Self { regions } }
}

impl Containment for LinearScan<'_> {
    fn first_container(&self, coord: Coord<f64>) -> Option<usize> {
        let point = Point::from(coord);
        self.regions.iter().position(|region| region.boundary().contains(&point))
    }
}

/// Bounding-box prefiltered scan. Candidates are re-sorted by region index
/// so the first match agrees with [`LinearScan`].
#[derive(Debug, Clone)]
pub struct IndexedScan<'a> {
    regions: &'a [Region],
    rtree: RTree<RegionEnvelope>,
}

impl<'a> IndexedScan<'a> {
    pub fn new(regions: &'a [Region]) -> Self {
        Self {
            rtree: RTree::bulk_load(
                regions.iter().enumerate()
                    .filter_map(|(i, region)| region.boundary().bounding_rect().map(|rect| {
                        let corners = Rectangle::from_corners(rect.min().into(), rect.max().into());
                        RegionEnvelope::new(corners, i)
                    }))
                    .collect()
            ),
            regions,
        }
    }
}

impl Containment for IndexedScan<'_> {
    fn first_container(&self, coord: Coord<f64>) -> Option<usize> {
        let point = Point::from(coord);
        let mut candidates = self.rtree
            .locate_in_envelope_intersecting(&AABB::from_point([coord.x, coord.y]))
            .map(|envelope| envelope.data)
            .collect::<SmallVec<[usize; 4]>>();
        candidates.sort_unstable();
        candidates.into_iter().find(|&i| self.regions[i].boundary().contains(&point))
    }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, MultiPolygon};

    use super::*;

    fn square(name: &str, x0: f64, y0: f64, size: f64) -> Region {
        Region::new(name, MultiPolygon(vec![polygon![
            (x: x0, y: y0),
            (x: x0 + size, y: y0),
            (x: x0 + size, y: y0 + size),
            (x: x0, y: y0 + size),
        ]]))
    }

    fn make_regions() -> Vec<Region> {
        vec![
            square("west", 0.0, 0.0, 10.0),
            square("east", 10.0, 0.0, 10.0),
            square("overlap", 5.0, 0.0, 10.0), // Overlaps both
        ]
    }

    #[test]
    fn linear_returns_first_in_input_order() {
        let regions = make_regions();
        let scan = LinearScan::new(&regions);
        assert_eq!(scan.first_container(Coord { x: 2.0, y: 5.0 }), Some(0));
        assert_eq!(scan.first_container(Coord { x: 7.0, y: 5.0 }), Some(0));
        assert_eq!(scan.first_container(Coord { x: 12.0, y: 5.0 }), Some(1));
        assert_eq!(scan.first_container(Coord { x: 30.0, y: 5.0 }), None);
    }

    #[test]
    fn boundary_points_are_not_contained() {
        let regions = vec![square("only", 0.0, 0.0, 10.0)];
        let scan = LinearScan::new(&regions);
        assert_eq!(scan.first_container(Coord { x: 0.0, y: 5.0 }), None);
        assert_eq!(scan.first_container(Coord { x: 10.0, y: 10.0 }), None);
    }

    #[test]
    fn indexed_agrees_with_linear() {
        let regions = make_regions();
        let linear = LinearScan::new(&regions);
        let indexed = IndexedScan::new(&regions);
        for i in -4..=44 {
            for j in -2..=22 {
                let coord = Coord { x: i as f64 * 0.5, y: j as f64 * 0.5 };
                assert_eq!(linear.first_container(coord), indexed.first_container(coord), "at {coord:?}");
            }
        }
    }

    #[test]
    fn strategy_builds_matching_scans() {
        let regions = make_regions();
        let coord = Coord { x: 12.0, y: 1.0 };
        assert_eq!(ContainmentStrategy::Linear.build(&regions).first_container(coord), Some(1));
        assert_eq!(ContainmentStrategy::Indexed.build(&regions).first_container(coord), Some(1));
    }
}
