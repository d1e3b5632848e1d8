use std::sync::Arc;

use geo::{Area, Coord, MultiPolygon};

/// A street polyline in a planar, metric projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Street {
    coords: Vec<Coord<f64>>,
    region: Option<Arc<str>>, // Replaced on every region assignment.
}

impl Street {
    pub fn new(coords: Vec<Coord<f64>>) -> Self {
        Self { coords, region: None }
    }

    /// Build a street from `(x, y)` pairs.
    pub fn from_xy(points: &[(f64, f64)]) -> Self {
        Self::new(points.iter().map(|&(x, y)| Coord { x, y }).collect())
    }

    #[inline] pub fn coords(&self) -> &[Coord<f64>] { &self.coords }

    #[inline] pub fn len(&self) -> usize { self.coords.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.coords.is_empty() }

    /// Name of the region this street was assigned to, if any.
    #[inline] pub fn region(&self) -> Option<&str> { self.region.as_deref() }

    /// Label the street with `region`, replacing any earlier assignment.
    #[inline]
    pub(crate) fn set_region(&mut self, region: Arc<str>) {
        self.region = Some(region);
    }
}

/// A named polygon used to group streets.
#[derive(Debug, Clone)]
pub struct Region {
    name: Arc<str>,
    boundary: MultiPolygon<f64>,
    area: f64,
}

impl Region {
    pub fn new(name: impl Into<Arc<str>>, boundary: MultiPolygon<f64>) -> Self {
        let area = boundary.unsigned_area();
        Self { name: name.into(), boundary, area }
    }

    #[inline] pub fn name(&self) -> &str { &self.name }

    #[inline] pub(crate) fn shared_name(&self) -> Arc<str> { self.name.clone() }

    #[inline] pub fn boundary(&self) -> &MultiPolygon<f64> { &self.boundary }

    /// Polygon area in squared projection units.
    #[inline] pub fn area(&self) -> f64 { self.area }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, MultiPolygon};

    use super::*;

    #[test]
    fn region_area_is_positive_regardless_of_winding() {
        let cw = polygon![(x: 0.0, y: 0.0), (x: 0.0, y: 2.0), (x: 3.0, y: 2.0), (x: 3.0, y: 0.0)];
        let region = Region::new("a", MultiPolygon(vec![cw]));
        assert_eq!(region.area(), 6.0);
        assert_eq!(region.name(), "a");
    }

    #[test]
    fn street_starts_unassigned() {
        let street = Street::from_xy(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(street.len(), 2);
        assert!(street.region().is_none());
    }
}
