//! Sea-ice dashboard generator.
//!
//! Fetches the NOAA ice chart, renders `footprint.html` and writes one
//! time-series figure per forecast region, then exits.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use dashboard::{run, DashboardConfig, RunOptions};
use ice_chart::ArcGisIceChart;

#[derive(Parser, Debug)]
#[command(name = "dashboard")]
#[command(about = "Kuskokwim Bay sea-ice map and region figures")]
struct Args {
    /// Configuration file path (YAML)
    #[arg(short, long, env = "DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for footprint.html
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Directory for region figures
    #[arg(long)]
    image_dir: Option<PathBuf>,

    /// Do not fetch the ice chart or write the map
    #[arg(long)]
    skip_map: bool,

    /// Do not load temperature tables or write figures
    #[arg(long)]
    skip_plots: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting sea-ice dashboard");

    let mut config = match &args.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if let Some(dir) = args.image_dir {
        config.image_dir = dir;
    }
    config.validate()?;

    info!(
        output_dir = %config.output_dir.display(),
        image_dir = %config.image_dir.display(),
        regions = ?config.regions,
        "Loaded configuration"
    );

    let source = ArcGisIceChart::new(config.ice_chart.clone())?;
    let options = RunOptions {
        skip_map: args.skip_map,
        skip_plots: args.skip_plots,
    };
    let run_date = chrono::Utc::now().date_naive();

    run(&config, &source, options, run_date).await?;

    Ok(())
}
