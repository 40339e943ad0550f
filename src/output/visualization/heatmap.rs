//! Space-time heat map
//!
//! Every node of every drawn time step becomes one colored cell in the
//! position/time plane, from blue (lowest value) to red (highest value).
//! Long runs are downsampled in time to at most
//! [`PlotConfig::max_time_cells`] rows, first and last kept.

use plotters::prelude::*;
use std::error::Error;

use super::config::{PlotConfig, NO_TITLE};
use super::{backend_for, PlotBackend};
use crate::output::export::downsample_rows;
use crate::solver::SimulationResult;

/// Plot the whole history of a run as a heat map
///
/// X is the combined position, Y is time.
///
/// # Example
///
/// ```rust,no_run
/// use grain_rs::output::visualization::plot_heatmap;
/// use grain_rs::solver::{ExplicitSolver, Scenario, Solver, SolverConfiguration};
///
/// let result = ExplicitSolver::new().solve(&Scenario::two_grains(), &SolverConfiguration::two_grains())?;
/// plot_heatmap(&result, "grains_field.svg", None)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn plot_heatmap(
    result: &SimulationResult,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let (rows, columns) = result.shape();
    if rows == 0 || columns == 0 {
        return Err("Empty result".into());
    }

    let default_config = PlotConfig::heatmap(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let kept = downsample_rows(rows, Some(config.max_time_cells.max(2)));
    let all_times = result.time_points();
    let times: Vec<f64> = kept.iter().map(|&n| all_times[n]).collect();

    let (min, max) = kept
        .iter()
        .flat_map(|&n| result.field.row(n).to_vec())
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let grid = HeatmapGrid {
        x_edges: cell_edges(result.coordinates.as_slice()),
        t_edges: cell_edges(&times),
        rows: kept,
        min,
        max,
    };

    match backend_for(output_path, config)? {
        PlotBackend::Svg(backend) => plot_heatmap_impl(backend, result, &grid, config),
        #[cfg(feature = "ttf")]
        PlotBackend::Bitmap(backend) => plot_heatmap_impl(backend, result, &grid, config),
    }
}

/// Cell geometry and color scale of a heat map
struct HeatmapGrid {
    x_edges: Vec<f64>,
    t_edges: Vec<f64>,
    rows: Vec<usize>,
    min: f64,
    max: f64,
}

/// Implementation for heat map plotting with concrete backend
fn plot_heatmap_impl<DB: DrawingBackend>(
    backend: DB,
    result: &SimulationResult,
    grid: &HeatmapGrid,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let x_range = (grid.x_edges[0], grid.x_edges[grid.x_edges.len() - 1]);
    let mut t_range = (grid.t_edges[0], grid.t_edges[grid.t_edges.len() - 1]);
    if t_range.1 <= t_range.0 {
        t_range.1 = t_range.0 + 1.0;
    }

    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let caption = if grid.min <= grid.max {
        format!("{} [{:.2}, {:.2}]", config.title, grid.min, grid.max)
    } else {
        config.title.clone()
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 32).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.0..x_range.1, t_range.0..t_range.1)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&|x| format!("{:.2}", x))
        .y_label_formatter(&|t| format!("{:.1}", t))
        .draw()?;

    for (k, &n) in grid.rows.iter().enumerate() {
        let t0 = grid.t_edges[k];
        let t1 = if grid.t_edges[k + 1] > t0 { grid.t_edges[k + 1] } else { t_range.1 };

        chart.draw_series(result.field.row(n).iter().enumerate().map(|(j, &value)| {
            Rectangle::new(
                [(grid.x_edges[j], t0), (grid.x_edges[j + 1], t1)],
                heat_color(value, grid.min, grid.max).filled(),
            )
        }))?;
    }

    root.present()?;

    Ok(())
}

/// Cell boundaries of sorted sample positions
///
/// `m` positions give `m + 1` edges: the outer edges are the first and
/// last positions, inner edges are midpoints. Repeated positions give an
/// edge exactly at the repeated value.
fn cell_edges(values: &[f64]) -> Vec<f64> {
    let m = values.len();
    if m == 0 {
        return Vec::new();
    }

    let mut edges = Vec::with_capacity(m + 1);
    edges.push(values[0]);
    edges.extend(values.windows(2).map(|w| 0.5 * (w[0] + w[1])));
    edges.push(values[m - 1]);
    edges
}

/// Blue-to-red color of `value` on the scale `[min, max]`
///
/// Non-finite values are drawn gray.
fn heat_color(value: f64, min: f64, max: f64) -> HSLColor {
    if !value.is_finite() {
        return HSLColor(0.0, 0.0, 0.5);
    }

    let fraction = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.5
    };

    HSLColor((1.0 - fraction) * 2.0 / 3.0, 1.0, 0.5)
}

// =================================================================================================
// Tests
// =================================================================================================
