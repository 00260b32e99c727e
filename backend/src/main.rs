mod config;
mod frame;
mod plot;
mod viewer;

use anyhow::{Context, Result};
use clap::Parser;
use skyview_common::{read_point_file, Comparison, PointSet};

use config::Config;
use plot::ComparisonPlot;
use viewer::Viewer;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run(Config::parse())
}

fn run(config: Config) -> Result<()> {
    let full = read_point_file(&config.dataset)
        .with_context(|| format!("reading dataset {}", config.dataset.display()))?;
    let skyline = read_point_file(&config.skyline)
        .with_context(|| format!("reading skyline {}", config.skyline.display()))?;

    let comparison = Comparison::new(full, skyline, config.highlight());
    log_layer("dataset", &comparison.full);
    log_layer("skyline", &comparison.skyline);
    log::info!("highlight: {:?} {}", comparison.highlight.change, comparison.highlight.point);

    let plot = ComparisonPlot::new(comparison, config.title());

    if let Some(output) = &config.output {
        plot.save(output, config.width, config.height)?;
        log::info!("chart written to {}", output.display());
        return Ok(());
    }

    let viewer = Viewer::new(&plot, config.width, config.height)?.grace(config.reconnect_grace());
    let state = rocket::execute(viewer::present(viewer, config.figment()))?;
    log::debug!("viewer finished as {state:?}");
    Ok(())
}

fn log_layer(name: &str, points: &PointSet) {
    match frame::summary(points) {
        Ok(summary) => log::info!("{name}: {summary}"),
        Err(e) => log::warn!("{name}: no summary ({e})"),
    }
}
