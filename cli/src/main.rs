
mod cli;
mod commands;

use anyhow::Context;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use commands::street_metrics;

fn setup_logging(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    setup_logging(cli.verbose)?;
    match &cli.command {
        Commands::StreetMetrics(args) => street_metrics::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
