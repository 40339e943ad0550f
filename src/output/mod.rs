//! Output module for simulation results
//!
//! This module provides tools to output a finished [`SimulationResult`]:
//! - **Export**: CSV files for external analysis
//! - **Visualization**: SVG plots using plotters (PNG with the `ttf` feature)
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── export/             ← Data export
//! │   ├── mod.rs
//! │   └── csv.rs
//! └── visualization/      ← Plots (feature `plotting`)
//!     ├── mod.rs
//!     ├── config.rs
//!     ├── profiles.rs
//!     └── heatmap.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use grain_rs::output::{plot_profile_evolution, CsvExporter, Exporter};
//! use grain_rs::solver::{ExplicitSolver, Scenario, Solver, SolverConfiguration};
//!
//! let result = ExplicitSolver::new().solve(&Scenario::two_rods(), &SolverConfiguration::two_rods())?;
//!
//! CsvExporter::default().export_field(&result, Some(51), "rods.csv")?;
//! plot_profile_evolution(&result, 6, "rods.svg", None)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`SimulationResult`]: crate::solver::SimulationResult

pub mod export;

#[cfg(feature = "plotting")]
pub mod visualization;

pub use export::{CsvConfig, CsvExporter, ExportError, Exporter};

#[cfg(feature = "plotting")]
pub use visualization::{
    plot_final_profile,
    plot_heatmap,
    plot_profile_comparison,
    plot_profile_evolution,
    PlotConfig,
};
