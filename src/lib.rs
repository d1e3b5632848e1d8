#![doc = "Street curvature and density statistics per region"]
mod common;
mod error;
mod types;

pub mod curvature;
pub mod geom;
pub mod io;
pub mod metrics;
pub mod pipeline;
pub mod region;

#[doc(inline)]
pub use error::ConfigError;

#[doc(inline)]
pub use types::{Region, Street};

#[doc(inline)]
pub use metrics::{MethodSelection, MetricRow, MetricValue};

#[doc(inline)]
pub use pipeline::{run, Config, ConfigBuilder, Output, Report};
