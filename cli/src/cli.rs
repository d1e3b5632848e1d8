use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use streetmetrics::metrics::VOCABULARY;

/// Street curvature and density statistics
#[derive(clap::Parser, Debug)]
#[command(name = "streetmetrics", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Compute curvature and density metrics of streets, per region
    StreetMetrics(StreetMetricsArgs),
}

/// Coordinate system of the input shapefiles.
#[derive(Copy, Clone, Eq, PartialEq, Debug, clap::ValueEnum)]
pub enum InputCrs {
    /// Read each file's .prj: geographic inputs are reprojected, projected ones used as-is
    Auto,
    /// Lon/lat degrees, reprojected to Web Mercator meters before analysis
    Wgs84,
    /// Already in a planar metric projection; used as-is
    Projected,
}

#[derive(clap::Args, Debug)]
pub struct StreetMetricsArgs {
    /// Shapefile with street lines used to calculate curvatures
    #[arg(short, long, default_value = "./inputs/streets/allroads_jgd2000.shp", value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Metrics to compute, repeatable; `all` selects every metric
    #[arg(
        short,
        long = "method",
        default_value = "all",
        ignore_case = true,
        value_parser = PossibleValuesParser::new(VOCABULARY),
    )]
    pub methods: Vec<String>,

    /// Shapefile with region polygons, or `none` to analyse all streets as one region
    #[arg(short = 'g', long, default_value = "./inputs/regions/shapefiles/regions.shp")]
    pub regions: String,

    /// Attribute of the regions shapefile holding each region's name
    #[arg(short = 'r', long, default_value = "region")]
    pub region_variable: String,

    /// Region names to keep, repeatable; `none` keeps every region
    #[arg(short = 's', long, default_value = "none")]
    pub region_selection: Vec<String>,

    /// Directory for outputs, or `none` to write nothing; cleared before each run
    #[arg(short, long, default_value = "./outputs/curvatures/")]
    pub output_dir: String,

    /// If positive, analyse a random sample of this many streets
    #[arg(short = 'n', long, default_value_t = -1, allow_negative_numbers = true)]
    pub random_sample_size: i64,

    /// Seed for the random street sample
    #[arg(long)]
    pub seed: Option<u64>,

    /// Coordinate system of the inputs; `auto` reads each shapefile's .prj
    #[arg(long, value_enum, default_value_t = InputCrs::Auto)]
    pub crs: InputCrs,

    /// Prefilter region containment tests with an R-tree
    #[arg(long)]
    pub indexed: bool,
}
