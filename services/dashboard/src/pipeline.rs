//! The end-to-end dashboard run.
//!
//! Two independent paths run one after the other:
//!
//! 1. map: fetch ice layers, reproject, compose and write `footprint.html`
//! 2. plots: load temperature tables, partition by region, write one
//!    figure per region
//!
//! Remote fetch and CSV load failures degrade to empty inputs. Everything
//! else (grid file, rendering, writing) aborts the run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use climatology::{load_temperature_table, partition_by_region, TableLoad};
use ice_chart::IceChartSource;
use projection::reproject_to_360;
use renderer::{build_map_document, load_region_grid, save_region_figure, write_map};
use tracing::{info, warn};

use crate::config::DashboardConfig;

/// Which outputs to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub skip_map: bool,
    pub skip_plots: bool,
}

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub map_path: Option<PathBuf>,
    pub image_paths: Vec<PathBuf>,
    pub fetch_failed: bool,
    pub failed_loads: Vec<PathBuf>,
}

async fn render_map(
    config: &DashboardConfig,
    source: &dyn IceChartSource,
    run_date: NaiveDate,
    summary: &mut RunSummary,
) -> Result<()> {
    let outcome = source.fetch_ice_layers().await;
    summary.fetch_failed = outcome.is_failed();
    if summary.fetch_failed {
        warn!("Ice chart unavailable, map will have no ice layers");
    }

    let (concentration, prediction) = outcome.into_collections();
    let concentration = reproject_to_360(&concentration);
    let prediction = reproject_to_360(&prediction);

    let grid = load_region_grid(&config.grid_file)
        .with_context(|| format!("Failed to load region grid {}", config.grid_file.display()))?;

    let document = build_map_document(&config.map, &concentration, &prediction, &grid, run_date)
        .context("Failed to compose map")?;
    let path = write_map(&document, &config.output_dir).context("Failed to write map")?;

    summary.map_path = Some(path);
    Ok(())
}

fn render_plots(config: &DashboardConfig, summary: &mut RunSummary) -> Result<()> {
    let mut tables = Vec::with_capacity(2);
    for path in [&config.historical_csv, &config.projected_csv] {
        let outcome = load_temperature_table(path);
        if let TableLoad::Failed { path, .. } = &outcome {
            summary.failed_loads.push(path.clone());
        }
        tables.push(outcome.into_table());
    }
    let (historical, projected) = (&tables[0], &tables[1]);

    let regions = config.region_ids()?;
    let historical = partition_by_region(historical, &regions);
    let projected = partition_by_region(projected, &regions);

    for (hist, proj) in historical.iter().zip(&projected) {
        let path = save_region_figure(hist, proj, &config.image_dir)
            .with_context(|| format!("Failed to render figure for region {}", hist.region))?;
        summary.image_paths.push(path);
    }
    Ok(())
}

/// Run the dashboard once.
pub async fn run(
    config: &DashboardConfig,
    source: &dyn IceChartSource,
    options: RunOptions,
    run_date: NaiveDate,
) -> Result<RunSummary> {
    for dir in [&config.output_dir, &config.image_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let mut summary = RunSummary::default();

    if options.skip_map {
        info!("Skipping map");
    } else {
        info!("Generating map");
        render_map(config, source, run_date, &mut summary).await?;
    }

    if options.skip_plots {
        info!("Skipping region figures");
    } else {
        info!(regions = config.regions.len(), "Generating region figures");
        render_plots(config, &mut summary)?;
    }

    info!(
        map = ?summary.map_path,
        images = summary.image_paths.len(),
        fetch_failed = summary.fetch_failed,
        failed_loads = summary.failed_loads.len(),
        "Dashboard run complete"
    );
    Ok(summary)
}
