use std::path::Path;

use plotters::prelude::*;

use crate::error::PipelineError;
use crate::logging::{LogLevel, RunLogger};
use crate::table::TripTable;
use crate::util;

const PLOT_SIZE: (u32, u32) = (640, 480);
const GRID_POINTS: usize = 200;

/// renders a kernel density estimate of the target column to `save_path`,
/// overwriting any previous plot. the plot is a diagnostic artifact: a
/// degenerate input (fewer than two values) or a failed render is logged
/// and skipped rather than aborting dataset preparation.
pub fn plot_target(
    table: &TripTable,
    target_column: &str,
    save_path: &Path,
    logger: &RunLogger,
) -> Result<(), PipelineError> {
    let values: Vec<f64> = table
        .column_values(target_column)?
        .iter()
        .filter_map(|v| v.trim().parse::<f64>().ok())
        .collect();
    if values.len() < 2 {
        logger.log(
            "not enough target values to estimate a density, skipping plot",
            LogLevel::Warning,
        );
        return Ok(());
    }
    if let Some(parent) = save_path.parent() {
        util::fs::create_dirs(parent)?;
    }
    logger.info(&format!(
        "Plot path: {}",
        save_path.to_str().unwrap_or_default()
    ));
    match render_density(&values, target_column, save_path) {
        Ok(()) => logger.info("Distribution plot saved at destination"),
        Err(e) => logger.log(&format!("failed to render distribution plot: {e}"), LogLevel::Error),
    }
    Ok(())
}

fn render_density(values: &[f64], label: &str, save_path: &Path) -> Result<(), PipelineError> {
    let bandwidth = silverman_bandwidth(values);
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let lo = min - 3.0 * bandwidth;
    let hi = max + 3.0 * bandwidth;
    let step = (hi - lo) / (GRID_POINTS - 1) as f64;
    let points: Vec<(f64, f64)> = (0..GRID_POINTS)
        .map(|i| {
            let x = lo + step * i as f64;
            (x, gaussian_kde(values, x, bandwidth))
        })
        .collect();
    let y_max = points.iter().map(|(_, y)| *y).fold(f64::MIN, f64::max);

    let root = BitMapBackend::new(save_path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Distribution of {label}"), ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(lo..hi, 0f64..(y_max * 1.05))
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .x_desc(label)
        .y_desc("density")
        .draw()
        .map_err(plot_err)?;
    chart
        .draw_series(LineSeries::new(points, &BLUE))
        .map_err(plot_err)?;
    root.present().map_err(plot_err)?;
    Ok(())
}

/// Silverman's rule of thumb. identical values give a zero standard
/// deviation; fall back to a unit bandwidth so the kernel stays finite.
fn silverman_bandwidth(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std_dev = variance.sqrt();
    let h = 0.9 * std_dev * n.powf(-0.2);
    if h > 0.0 {
        h
    } else {
        1.0
    }
}

fn gaussian_kde(values: &[f64], x: f64, bandwidth: f64) -> f64 {
    let n = values.len() as f64;
    let norm = n * bandwidth * (2.0 * std::f64::consts::PI).sqrt();
    values
        .iter()
        .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
        .sum::<f64>()
        / norm
}

fn plot_err<E: std::fmt::Display>(e: E) -> PipelineError {
    PipelineError::PlotRenderError(e.to_string())
}
