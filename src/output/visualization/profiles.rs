//! Profile plots along the combined domain
//!
//! A profile is the field of both segments at one time step, drawn against
//! the combined coordinates. The junction coordinate is shared by two
//! nodes, so a jump at the junction shows as a vertical segment.

use plotters::prelude::*;
use std::error::Error;

use super::config::{PlotConfig, NO_TITLE};
use super::{backend_for, value_range, PlotBackend};
use crate::solver::SimulationResult;

// =================================================================================================
// Core Plotting Functions
// =================================================================================================

/// Plot several profiles on the same axes
///
/// # Arguments
///
/// * `profiles` - Vec of (label, positions, values)
/// * `output_path` - Path to save the plot (SVG, or PNG with the `ttf` feature)
/// * `config` - Optional plot configuration
///
/// # Example
///
/// ```rust,no_run
/// use grain_rs::output::visualization::plot_profile_comparison;
///
/// let x = [0.0, 0.5, 1.0];
/// let initial = [1.0, 2.0, 1.0];
/// let last = [1.3, 1.4, 1.3];
///
/// plot_profile_comparison(
///     vec![("initial", &x[..], &initial[..]), ("final", &x[..], &last[..])],
///     "comparison.svg",
///     None,
/// )?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn plot_profile_comparison(
    profiles: Vec<(&str, &[f64], &[f64])>,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if profiles.is_empty() {
        return Err("No profiles provided".into());
    }
    if profiles.iter().any(|(_, x, values)| x.len() != values.len() || x.is_empty()) {
        return Err("Each profile needs as many positions as values, at least one".into());
    }

    let default_config = PlotConfig::profiles(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let x_range = value_range(profiles.iter().flat_map(|(_, x, _)| x.iter().copied()));
    let y_range = value_range(profiles.iter().flat_map(|(_, _, values)| values.iter().copied()));

    match backend_for(output_path, config)? {
        PlotBackend::Svg(backend) => plot_profiles_impl(backend, &profiles, config, x_range, y_range),
        #[cfg(feature = "ttf")]
        PlotBackend::Bitmap(backend) => plot_profiles_impl(backend, &profiles, config, x_range, y_range),
    }
}

/// Implementation for profile plotting with concrete backend
fn plot_profiles_impl<DB: DrawingBackend>(
    backend: DB,
    profiles: &[(&str, &[f64], &[f64])],
    config: &PlotConfig,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.2}", x))
            .y_label_formatter(&|y| format!("{:.2}", y))
            .draw()?;
    }

    for (idx, (label, positions, values)) in profiles.iter().enumerate() {
        let color = config.series_color(idx);

        chart
            .draw_series(LineSeries::new(
                positions.iter().zip(values.iter()).map(|(x, v)| (*x, *v)),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

/// Plot the profile evolution of a run
///
/// Draws `n_snapshots` profiles at evenly spaced time steps, first and last
/// included.
///
/// # Example
///
/// ```rust,no_run
/// use grain_rs::output::visualization::plot_profile_evolution;
/// use grain_rs::solver::{ExplicitSolver, Scenario, Solver, SolverConfiguration};
///
/// let result = ExplicitSolver::new().solve(&Scenario::two_grains(), &SolverConfiguration::two_grains())?;
/// plot_profile_evolution(&result, 11, "grains.svg", None)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn plot_profile_evolution(
    result: &SimulationResult,
    n_snapshots: usize,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if n_snapshots == 0 {
        return Err("At least one snapshot is required".into());
    }

    let positions = result.coordinates.as_slice();
    let time_points = result.time_points();

    let mut snapshots = Vec::new();
    for row in result.snapshot_rows(n_snapshots) {
        let values = result
            .row(row)
            .ok_or("Snapshot row out of range")?
            .to_vec();
        snapshots.push((format!("t = {:.1}", time_points[row]), values));
    }

    let profiles: Vec<(&str, &[f64], &[f64])> = snapshots
        .iter()
        .map(|(label, values)| (label.as_str(), positions, values.as_slice()))
        .collect();

    plot_profile_comparison(profiles, output_path, config)
}

/// Plot the profile of the last time step
///
/// The single line is drawn in [`PlotConfig::line_color`].
pub fn plot_final_profile(
    result: &SimulationResult,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let values = result.final_profile().to_vec();
    let label = format!("t = {}", result.duration);

    let mut config = config.cloned().unwrap_or_else(|| PlotConfig::profiles(NO_TITLE));
    config.series_colors = Some(vec![config.line_color]);

    plot_profile_comparison(
        vec![(label.as_str(), result.coordinates.as_slice(), values.as_slice())],
        output_path,
        Some(&config),
    )
}

// =================================================================================================
// Tests
// =================================================================================================
