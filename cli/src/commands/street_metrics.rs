use std::{path::{Path, PathBuf}, time::{Duration, Instant}};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use streetmetrics::{geom::{ContainmentStrategy, Reprojector}, io::{self, DeclaredCrs}, Config, Output, Region, Street};
use tracing::{info, warn};

use crate::cli::{Cli, InputCrs, StreetMetricsArgs};

/// Literal accepted by path-like options to mean "skip this".
const NONE: &str = "none";

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn is_none(value: &str) -> bool { value.eq_ignore_ascii_case(NONE) }

fn build_config(args: &StreetMetricsArgs) -> Result<Config> {
    let region_selection = (!args.region_selection.iter().any(|name| is_none(name)))
        .then(|| args.region_selection.clone());

    let output = if is_none(&args.output_dir) {
        Output::Disabled
    } else {
        Output::Directory(PathBuf::from(&args.output_dir))
    };

    let containment = if args.indexed { ContainmentStrategy::Indexed } else { ContainmentStrategy::Linear };

    let config = Config::builder()
        .methods(args.methods.iter().cloned())
        .region_selection(region_selection)
        .containment(containment)
        .sample_size(usize::try_from(args.random_sample_size).ok().filter(|&n| n > 0))
        .seed(args.seed)
        .output(output)
        .build()?;
    Ok(config)
}

/// Whether the coordinates in the shapefile at `path` are lon/lat degrees.
fn is_geographic(path: &Path, crs: InputCrs) -> Result<bool> {
    match crs {
        InputCrs::Wgs84 => Ok(true),
        InputCrs::Projected => Ok(false),
        InputCrs::Auto => match io::declared_crs(path)? {
            Some(declared) => Ok(declared == DeclaredCrs::Geographic),
            None => {
                warn!("{} has no .prj file, treating its coordinates as projected", path.display());
                Ok(false)
            }
        },
    }
}

fn read_inputs(args: &StreetMetricsArgs) -> Result<(Vec<Street>, Option<Vec<Region>>)> {
    let regions_path = (!is_none(&args.regions)).then(|| Path::new(&args.regions));

    let pb = spinner("Reading inputs...");
    let streets = io::read_streets(&args.input)?;
    let regions = regions_path
        .map(|path| io::read_regions(path, &args.region_variable))
        .transpose()?;
    pb.finish_and_clear();

    let proj = Reprojector::lonlat_to_web_mercator()?;

    let streets = if is_geographic(&args.input, args.crs)? {
        info!("reprojecting streets from lon/lat to Web Mercator");
        streets.iter()
            .map(|street| proj.street(street))
            .collect::<Result<Vec<_>>>()
            .context("failed to reproject streets")?
    } else {
        streets
    };

    let regions = match (regions, regions_path) {
        (Some(regions), Some(path)) if is_geographic(path, args.crs)? => {
            info!("reprojecting regions from lon/lat to Web Mercator");
            Some(regions.iter()
                .map(|region| proj.region(region))
                .collect::<Result<Vec<_>>>()
                .context("failed to reproject regions")?)
        }
        (regions, _) => regions,
    };
    Ok((streets, regions))
}

pub fn run(cli: &Cli, args: &StreetMetricsArgs) -> Result<()> {
    let config = build_config(args)?;
    if cli.verbose > 0 {
        info!("parameters: {:?}", args);
    }

    let start = Instant::now();
    let (streets, regions) = read_inputs(args)?;

    let pb = spinner("Computing street metrics...");
    let report = streetmetrics::run(&config, streets, regions)?;
    pb.finish_and_clear();

    info!(
        "{} streets in {} regions ({} outside every region)",
        report.streets.len(), report.regions.len(), report.dropped,
    );

    let table = io::rows_to_dataframe(&report.rows)?;
    println!("{table}");

    if let Some(path) = &report.table {
        println!("Results saved to: {}", path.display());
    }
    println!("  Processing time: {:.2?}", start.elapsed());
    Ok(())
}
