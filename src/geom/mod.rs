mod containment;
mod proj;

pub use containment::{Containment, ContainmentStrategy, IndexedScan, LinearScan};
pub use proj::Reprojector;

use geo::{BoundingRect, Coord, MultiPolygon, Rect};

use crate::types::Street;

/// Bounding rectangle of every coordinate of every street, if there is any coordinate at all.
pub(crate) fn streets_bounds(streets: &[Street]) -> Option<Rect<f64>> {
    streets.iter()
        .filter_map(|street| geo::LineString::from(street.coords().to_vec()).bounding_rect())
        .reduce(|a, b| Rect::new(
            Coord {
                x: a.min().x.min(b.min().x),
                y: a.min().y.min(b.min().y),
            },
            Coord {
                x: a.max().x.max(b.max().x),
                y: a.max().y.max(b.max().y),
            },
        ))
}

/// Polygon covering the given rectangle, or an empty MultiPolygon.
pub(crate) fn rect_to_multipolygon(rect: Option<Rect<f64>>) -> MultiPolygon<f64> {
    match rect {
        Some(rect) => MultiPolygon(vec![rect.to_polygon()]),
        None => MultiPolygon(vec![]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_all_streets() {
        let streets = vec![
            Street::from_xy(&[(0.0, 1.0), (2.0, 3.0)]),
            Street::from_xy(&[(-1.0, 5.0)]),
        ];
        let rect = streets_bounds(&streets).unwrap();
        assert_eq!(rect.min(), Coord { x: -1.0, y: 1.0 });
        assert_eq!(rect.max(), Coord { x: 2.0, y: 5.0 });
    }

    #[test]
    fn bounds_of_nothing_is_none() {
        assert!(streets_bounds(&[]).is_none());
        assert!(rect_to_multipolygon(None).0.is_empty());
    }
}
