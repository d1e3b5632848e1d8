//! End-to-end run: select regions, sample streets, assign, compute curvature, aggregate.

use std::path::{Path, PathBuf};

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use crate::{
    common,
    curvature::curvature,
    error::ConfigError,
    geom::ContainmentStrategy,
    io,
    metrics::{self, MethodSelection, MetricRow},
    region,
    types::{Region, Street},
};

/// File name of the metric table inside the output directory.
pub const RESULTS_FILE: &str = "results.csv";

/// Where the metric table goes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Output {
    /// Compute only; write nothing.
    #[default]
    Disabled,
    /// Clear this directory before the run and write `results.csv` into it.
    Directory(PathBuf),
}

/// Validated settings for one run. Build with [`Config::builder`].
#[derive(Clone, Debug)]
pub struct Config {
    methods: MethodSelection,
    region_selection: Option<Vec<String>>,
    containment: ContainmentStrategy,
    sample_size: Option<usize>,
    seed: Option<u64>,
    output: Output,
}

impl Config {
    pub fn builder() -> ConfigBuilder { ConfigBuilder::default() }

    #[inline] pub fn methods(&self) -> &MethodSelection { &self.methods }

    #[inline] pub fn region_selection(&self) -> Option<&[String]> { self.region_selection.as_deref() }

    #[inline] pub fn containment(&self) -> ContainmentStrategy { self.containment }

    #[inline] pub fn sample_size(&self) -> Option<usize> { self.sample_size }

    #[inline] pub fn output(&self) -> &Output { &self.output }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            methods: MethodSelection::all(),
            region_selection: None,
            containment: ContainmentStrategy::default(),
            sample_size: None,
            seed: None,
            output: Output::Disabled,
        }
    }
}

/// Collects raw settings; [`ConfigBuilder::build`] validates them all at once.
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    methods: Option<Vec<String>>,
    region_selection: Option<Vec<String>>,
    containment: ContainmentStrategy,
    sample_size: Option<usize>,
    seed: Option<u64>,
    output: Output,
}

impl ConfigBuilder {
    /// Method tokens; defaults to `all`.
    pub fn methods<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = Some(tokens.into_iter().map(Into::into).collect());
        self
    }

    /// Region names to keep; `None` keeps every region.
    pub fn region_selection(mut self, names: Option<Vec<String>>) -> Self {
        self.region_selection = names;
        self
    }

    pub fn containment(mut self, strategy: ContainmentStrategy) -> Self {
        self.containment = strategy;
        self
    }

    /// Randomly keep this many streets before assignment.
    pub fn sample_size(mut self, size: Option<usize>) -> Self {
        self.sample_size = size;
        self
    }

    /// Seed for street sampling, for reproducible runs.
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let methods = match self.methods {
            Some(tokens) => MethodSelection::parse(&tokens)?,
            None => MethodSelection::all(),
        };
        if self.sample_size == Some(0) { return Err(ConfigError::ZeroSampleSize) }

        Ok(Config {
            methods,
            region_selection: self.region_selection,
            containment: self.containment,
            sample_size: self.sample_size,
            seed: self.seed,
            output: self.output,
        })
    }
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct Report {
    /// One row per region, in region input order.
    pub rows: Vec<MetricRow>,
    /// Streets that were assigned a region.
    pub streets: Vec<Street>,
    /// Regions the streets were matched against.
    pub regions: Vec<Region>,
    /// Streets removed because no vertex fell inside any region.
    pub dropped: usize,
    /// Path of the written table, if output is enabled.
    pub table: Option<PathBuf>,
}

/// Run the full pipeline over in-memory streets and (optional) regions.
///
/// Region selection is validated before anything else happens, so configuration
/// faults never leave partial output behind.
pub fn run(config: &Config, streets: Vec<Street>, regions: Option<Vec<Region>>) -> Result<Report> {
    let regions = regions
        .map(|regions| region::select_regions(regions, config.region_selection()))
        .transpose()?;

    if let Output::Directory(dir) = &config.output {
        common::reset_dir(dir)?;
    }

    let streets = match config.sample_size {
        Some(size) => sample_streets(streets, size, config.seed),
        None => streets,
    };

    info!("assigning {} streets to regions", streets.len());
    let assignment = region::assign(streets, regions, config.containment);

    let rows = assignment.regions.iter()
        .map(|region| region_row(region, &assignment.streets, &config.methods))
        .collect::<Vec<_>>();

    let table = match &config.output {
        Output::Directory(dir) => Some(write_table(&rows, dir)?),
        Output::Disabled => None,
    };

    Ok(Report {
        rows,
        streets: assignment.streets,
        regions: assignment.regions,
        dropped: assignment.dropped,
        table,
    })
}

/// Metrics for the streets assigned to `region`.
fn region_row(region: &Region, streets: &[Street], methods: &MethodSelection) -> MetricRow {
    let region_streets = streets.iter()
        .filter(|street| street.region() == Some(region.name()))
        .collect::<Vec<_>>();

    let profiles = region_streets.iter()
        .map(|street| curvature(street.coords()))
        .collect::<Vec<_>>();

    debug!("region {:?}: {} streets", region.name(), region_streets.len());
    metrics::aggregate(region, &region_streets, &profiles, methods)
}

fn write_table(rows: &[MetricRow], dir: &Path) -> Result<PathBuf> {
    let path = dir.join(RESULTS_FILE);
    io::write_metric_table(rows, &path)?;
    info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(path)
}

/// Keep a uniform random subset of `size` streets, in their original order.
fn sample_streets(streets: Vec<Street>, size: usize, seed: Option<u64>) -> Vec<Street> {
    if size >= streets.len() { return streets }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut keep = vec![false; streets.len()];
    for i in rand::seq::index::sample(&mut rng, streets.len(), size) {
        keep[i] = true;
    }

    info!("sampled {} of {} streets", size, streets.len());
    streets.into_iter()
        .zip(keep)
        .filter_map(|(street, keep)| keep.then_some(street))
        .collect()
}
