//! Visualization of two-segment diffusion results
//!
//! This module draws simulation results with the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **profiles**: value against position, one line per time step
//! - **heatmap**: value over the position/time plane
//!
//! # Output formats
//!
//! The format follows the file extension. SVG is always available. PNG
//! rasterizes text and needs the `ttf` feature; without it a `.png` path is
//! rejected with an error.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use grain_rs::output::visualization::{plot_heatmap, plot_profile_evolution, PlotConfig};
//! use grain_rs::solver::{ExplicitSolver, Scenario, Solver, SolverConfiguration};
//!
//! let result = ExplicitSolver::new().solve(&Scenario::two_rods(), &SolverConfiguration::two_rods())?;
//!
//! // Ten profiles, default config
//! plot_profile_evolution(&result, 10, "rods.svg", None)?;
//!
//! // Heat map with a custom title
//! let config = PlotConfig::heatmap("Two rods");
//! plot_heatmap(&result, "rods_field.svg", Some(&config))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # When to Use Which Function
//!
//! | Use Case | Module | Function |
//! |----------|--------|----------|
//! | Snapshots over time | `profiles` | `plot_profile_evolution` |
//! | Last time step | `profiles` | `plot_final_profile` |
//! | Arbitrary profiles | `profiles` | `plot_profile_comparison` |
//! | Whole history | `heatmap` | `plot_heatmap` |

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

pub mod config;
pub mod heatmap;
pub mod profiles;

pub use config::{IntoOptionalTitle, PlotConfig, NO_TITLE};
pub use heatmap::plot_heatmap;
pub use profiles::{plot_final_profile, plot_profile_comparison, plot_profile_evolution};

/// Drawing backend selected from the output path
pub(crate) enum PlotBackend<'a> {
    Svg(SVGBackend<'a>),
    #[cfg(feature = "ttf")]
    Bitmap(BitMapBackend<'a>),
}

/// Backend for `output_path`: SVG for `.svg`, bitmap otherwise
pub(crate) fn backend_for<'a>(
    output_path: &'a str,
    config: &PlotConfig,
) -> Result<PlotBackend<'a>, Box<dyn Error>> {
    let ext = Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");
    let size = (config.width, config.height);

    match ext {
        "svg" => Ok(PlotBackend::Svg(SVGBackend::new(output_path, size))),
        #[cfg(feature = "ttf")]
        _ => Ok(PlotBackend::Bitmap(BitMapBackend::new(output_path, size))),
        #[cfg(not(feature = "ttf"))]
        other => Err(format!(
            "cannot draw text into a '{}' image without the `ttf` feature, use an .svg path",
            other
        )
        .into()),
    }
}

/// Axis range covering the finite values, padded by 5%
///
/// Falls back to `(0, 1)` when no value is finite and widens a degenerate
/// range around its single value.
pub(crate) fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if min > max {
        return (0.0, 1.0);
    }

    let span = max - min;
    if span <= f64::EPSILON * max.abs().max(1.0) {
        let pad = max.abs().max(1.0) * 0.05;
        return (min - pad, max + pad);
    }

    (min - 0.05 * span, max + 0.05 * span)
}
