//! Shapefile reading for street polylines and region polygons.

use std::path::Path;

use anyhow::{bail, Context, Result};
use geo::Coord;
use shapefile::{dbase::{FieldValue, Record}, Reader, Shape};
use tracing::info;

use crate::{common, types::{Region, Street}};

/// Reads all shapes + attribute records from a given `.shp` file path.
fn read_shapefile(path: &Path) -> Result<Vec<(Shape, Record)>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open shapefile: {}", path.display()))?;

    let mut items = Vec::with_capacity(reader.shape_count()?);
    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result
            .with_context(|| format!("Error reading shape+record in {}", path.display()))?;
        items.push((shape, record));
    }
    Ok(items)
}

/// Coordinate system kind declared by a shapefile's `.prj` sidecar.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeclaredCrs {
    /// Lon/lat degrees (`GEOGCS`).
    Geographic,
    /// Planar coordinates (`PROJCS`).
    Projected,
}

/// Read the `.prj` next to the shapefile at `path`. `None` if there is no `.prj`.
pub fn declared_crs(path: &Path) -> Result<Option<DeclaredCrs>> {
    let prj = path.with_extension("prj");
    if !prj.exists() { return Ok(None) }

    let wkt = std::fs::read_to_string(&prj)
        .with_context(|| format!("Failed to read projection file: {}", prj.display()))?;
    let keyword = wkt.trim_start()
        .split(['[', '('])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_uppercase();

    match keyword.as_str() {
        "GEOGCS" | "GEOGCRS" | "GEODCRS" => Ok(Some(DeclaredCrs::Geographic)),
        "PROJCS" | "PROJCRS" => Ok(Some(DeclaredCrs::Projected)),
        _ => bail!("unrecognised coordinate system {:?} in {}", keyword, prj.display()),
    }
}

/// Read street polylines. Every part of a multi-part polyline becomes its own street.
pub fn read_streets(path: &Path) -> Result<Vec<Street>> {
    /// Split a polyline into per-part streets, skipping empty parts.
    fn parts_to_streets<P>(parts: &[Vec<P>], xy: impl Fn(&P) -> Coord<f64>) -> impl Iterator<Item = Street> {
        parts.iter()
            .filter(|part| !part.is_empty())
            .map(move |part| Street::new(part.iter().map(&xy).collect()))
    }

    let mut streets = Vec::new();
    for (shape, _) in read_shapefile(path)? {
        match shape {
            Shape::Polyline(line) => streets.extend(parts_to_streets(line.parts(), |p| Coord { x: p.x, y: p.y })),
            Shape::PolylineM(line) => streets.extend(parts_to_streets(line.parts(), |p| Coord { x: p.x, y: p.y })),
            Shape::PolylineZ(line) => streets.extend(parts_to_streets(line.parts(), |p| Coord { x: p.x, y: p.y })),
            Shape::NullShape => {}
            other => bail!("found non-Polyline shape in {}: {:?}", path.display(), other.shapetype()),
        }
    }

    info!("read {} streets from {}", streets.len(), path.display());
    Ok(streets)
}

/// Read region polygons, naming each region by its `name_field` attribute.
pub fn read_regions(path: &Path, name_field: &str) -> Result<Vec<Region>> {
    /// Get the value of a name field from a Record, as text
    fn get_name_field(record: &Record, field: &str) -> Result<String> {
        match record.get(field) {
            Some(FieldValue::Character(Some(s))) => Ok(s.trim().to_string()),
            Some(FieldValue::Numeric(Some(n))) => Ok(n.to_string()),
            Some(FieldValue::Integer(n)) => Ok(n.to_string()),
            Some(FieldValue::Double(n)) => Ok(n.to_string()),
            Some(FieldValue::Float(Some(n))) => Ok(n.to_string()),
            _ => bail!("missing or invalid region name field: {}", field)
        }
    }

    let regions = read_shapefile(path)?.into_iter()
        .map(|(shape, record)| {
            let name = get_name_field(&record, name_field)
                .with_context(|| format!("Error reading region name in {}", path.display()))?;
            let boundary = match shape {
                Shape::Polygon(polygon) => common::rings_to_geo(polygon.rings(), |p| Coord { x: p.x, y: p.y }),
                Shape::PolygonM(polygon) => common::rings_to_geo(polygon.rings(), |p| Coord { x: p.x, y: p.y }),
                Shape::PolygonZ(polygon) => common::rings_to_geo(polygon.rings(), |p| Coord { x: p.x, y: p.y }),
                other => bail!("found non-Polygon shape for region {:?} in {}: {:?}", name, path.display(), other.shapetype()),
            };
            Ok(Region::new(name, boundary))
        })
        .collect::<Result<Vec<_>>>()?;

    info!("read {} regions from {}", regions.len(), path.display());
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use shapefile::{
        dbase::{FieldName, TableWriterBuilder},
        Point, Polygon, PolygonRing, Polyline, Writer,
    };

    use super::*;

    #[test]
    fn reads_streets_and_regions_written_by_shapefile() {
        let tmp = tempfile::tempdir().unwrap();

        let streets_path = tmp.path().join("streets.shp");
        {
            let table = TableWriterBuilder::new()
                .add_character_field(FieldName::try_from("id").unwrap(), 8);
            let mut writer = Writer::from_path(&streets_path, table).unwrap();
            let line = Polyline::with_parts(vec![
                vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)],
                vec![Point::new(3.0, 3.0), Point::new(4.0, 4.0), Point::new(5.0, 5.0)],
            ]);
            let mut record = Record::default();
            record.insert("id".to_string(), FieldValue::Character(Some("s1".to_string())));
            writer.write_shape_and_record(&line, &record).unwrap();
        }

        let regions_path = tmp.path().join("regions.shp");
        {
            let table = TableWriterBuilder::new()
                .add_character_field(FieldName::try_from("region").unwrap(), 16);
            let mut writer = Writer::from_path(&regions_path, table).unwrap();
            let polygon = Polygon::with_rings(vec![PolygonRing::Outer(vec![
                Point::new(0.0, 0.0), Point::new(0.0, 10.0), Point::new(10.0, 10.0),
                Point::new(10.0, 0.0), Point::new(0.0, 0.0),
            ])]);
            let mut record = Record::default();
            record.insert("region".to_string(), FieldValue::Character(Some("centre".to_string())));
            writer.write_shape_and_record(&polygon, &record).unwrap();
        }

        let streets = read_streets(&streets_path).unwrap();
        assert_eq!(streets.iter().map(Street::len).collect::<Vec<_>>(), vec![2, 3]);

        let regions = read_regions(&regions_path, "region").unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].name(), "centre");
        assert_eq!(regions[0].area(), 100.0);

        assert!(read_regions(&regions_path, "missing").is_err());
        assert!(read_streets(&regions_path).is_err());
    }

    #[test]
    fn declared_crs_follows_prj_keyword() {
        let tmp = tempfile::tempdir().unwrap();
        let shp = tmp.path().join("streets.shp");
        assert_eq!(declared_crs(&shp).unwrap(), None);

        std::fs::write(
            tmp.path().join("streets.prj"),
            r#"GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137,298.257223563]]]"#,
        ).unwrap();
        assert_eq!(declared_crs(&shp).unwrap(), Some(DeclaredCrs::Geographic));

        std::fs::write(
            tmp.path().join("streets.prj"),
            r#"PROJCS["JGD2000 / Japan Plane Rectangular CS IX",GEOGCS["JGD2000"],PROJECTION["Transverse_Mercator"]]"#,
        ).unwrap();
        assert_eq!(declared_crs(&shp).unwrap(), Some(DeclaredCrs::Projected));

        std::fs::write(tmp.path().join("streets.prj"), "LOCAL_CS[\"grid\"]").unwrap();
        assert!(declared_crs(&shp).is_err());
    }
}
