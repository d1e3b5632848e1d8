use anyhow::{anyhow, Context, Result};
use geo::{Coord, MapCoords};
use proj4rs::{proj::Proj as Proj4, transform::transform};

use crate::types::{Region, Street};

/// Geographic lon/lat on the Web Mercator sphere (no datum shift, as EPSG:3857 does).
const SOURCE_LONLAT: &str = "+proj=longlat +a=6378137 +b=6378137 +no_defs +type=crs";

/// Spherical (Web) Mercator, EPSG:3857.
const TARGET_WEB_MERCATOR: &str =
    "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs +type=crs";

/// Reprojects lon/lat degrees into metric Web Mercator coordinates.
pub struct Reprojector {
    from: Proj4,
    to: Proj4,
}

impl Reprojector {
    pub fn lonlat_to_web_mercator() -> Result<Self> {
        let from = Proj4::from_proj_string(SOURCE_LONLAT)
            .with_context(|| anyhow!("failed to build source PROJ.4: {SOURCE_LONLAT}"))?;
        let to = Proj4::from_proj_string(TARGET_WEB_MERCATOR)
            .with_context(|| anyhow!("failed to build target PROJ.4: {TARGET_WEB_MERCATOR}"))?;
        Ok(Self { from, to })
    }

    /// Project one coordinate: degrees in, meters out.
    pub fn coord(&self, coord: Coord<f64>) -> Result<Coord<f64>> {
        let mut point = (coord.x.to_radians(), coord.y.to_radians(), 0.0);
        transform(&self.from, &self.to, &mut point)
            .map_err(|err| anyhow!("CRS transform failed at ({}, {}): {err:?}", coord.x, coord.y))?;
        Ok(Coord { x: point.0, y: point.1 })
    }

    pub fn street(&self, street: &Street) -> Result<Street> {
        let coords = street.coords().iter()
            .map(|&coord| self.coord(coord))
            .collect::<Result<Vec<_>>>()?;
        Ok(Street::new(coords))
    }

    /// Project a region's boundary; the area is recomputed in meters.
    pub fn region(&self, region: &Region) -> Result<Region> {
        let boundary = region.boundary().try_map_coords(|coord| self.coord(coord))
            .with_context(|| format!("failed to reproject region {:?}", region.name()))?;
        Ok(Region::new(region.name(), boundary))
    }
}
