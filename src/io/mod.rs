//! Reading street and region inputs, and writing the metric table.
//!
//! - `shp` - Shapefile input for street polylines and region polygons
//! - `csv` - CSV output of per-region metric rows

mod csv;
mod shp;

pub use csv::*;
pub use shp::*;
