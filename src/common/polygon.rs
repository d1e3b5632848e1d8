use geo::{Coord, LineString, MultiPolygon, Polygon};
use shapefile as shp;

/// Convert shapefile polygon rings to geo::MultiPolygon<f64>.
///
/// Shapefiles store each outer ring followed by its holes; `xy` extracts the
/// planar coordinate from whichever point flavor (plain, M, Z) the file uses.
pub(crate) fn rings_to_geo<P>(rings: &[shp::PolygonRing<P>], xy: impl Fn(&P) -> Coord<f64>) -> MultiPolygon<f64> {
    /// Ensure first and last are the same for geo::LineString coords
    fn ensure_closed(coords: &mut Vec<Coord<f64>>) {
        if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
            if first != last { coords.push(first) }
        }
    }

    let mut polys: Vec<Polygon<f64>> = Vec::new();
    let mut current_exterior: Option<LineString<f64>> = None;
    let mut current_holes: Vec<LineString<f64>> = Vec::new();

    for ring in rings {
        let mut coords = ring.points().iter().map(&xy).collect::<Vec<_>>();
        ensure_closed(&mut coords);
        let ls = LineString(coords);

        match ring {
            shp::PolygonRing::Outer(_) => {
                // flush previous polygon
                if let Some(ext) = current_exterior.take() {
                    polys.push(Polygon::new(ext, std::mem::take(&mut current_holes)));
                }
                current_exterior = Some(ls);
            }
            // A hole before any exterior is malformed; keep it as an exterior.
            shp::PolygonRing::Inner(_) if current_exterior.is_none() => current_exterior = Some(ls),
            shp::PolygonRing::Inner(_) => current_holes.push(ls),
        }
    }
    if let Some(ext) = current_exterior {
        polys.push(Polygon::new(ext, current_holes));
    }

    MultiPolygon(polys)
}

#[cfg(test)]
mod tests {
    use geo::Area;

    use super::*;

    fn pt(x: f64, y: f64) -> shp::Point { shp::Point { x, y } }

    fn xy(p: &shp::Point) -> Coord<f64> { Coord { x: p.x, y: p.y } }

    #[test]
    fn outer_ring_with_hole() {
        let rings = vec![
            shp::PolygonRing::Outer(vec![pt(0.0, 0.0), pt(0.0, 4.0), pt(4.0, 4.0), pt(4.0, 0.0), pt(0.0, 0.0)]),
            shp::PolygonRing::Inner(vec![pt(1.0, 1.0), pt(2.0, 1.0), pt(2.0, 2.0), pt(1.0, 2.0), pt(1.0, 1.0)]),
        ];
        let mp = rings_to_geo(&rings, xy);
        assert_eq!(mp.0.len(), 1);
        assert_eq!(mp.0[0].interiors().len(), 1);
        assert_eq!(mp.unsigned_area(), 15.0);
    }

    #[test]
    fn each_outer_ring_starts_a_polygon() {
        let rings = vec![
            shp::PolygonRing::Outer(vec![pt(0.0, 0.0), pt(0.0, 1.0), pt(1.0, 1.0), pt(1.0, 0.0)]),
            shp::PolygonRing::Outer(vec![pt(5.0, 5.0), pt(5.0, 7.0), pt(7.0, 7.0), pt(7.0, 5.0)]),
        ];
        let mp = rings_to_geo(&rings, xy);
        assert_eq!(mp.0.len(), 2);
        assert_eq!(mp.unsigned_area(), 5.0);
    }
}
