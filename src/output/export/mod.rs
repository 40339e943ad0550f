//! Export module for simulation results.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module.
//!
//! # Available formats
//!
//! | Format  | Module          |
//! |---------|-----------------|
//! | CSV     | [`csv`]         |
//!
//! # Usage example
//!
//! ```rust,no_run
//! use grain_rs::output::export::{CsvExporter, Exporter};
//! use grain_rs::solver::{ExplicitSolver, Scenario, Solver, SolverConfiguration};
//!
//! let result = ExplicitSolver::new().solve(&Scenario::two_grains(), &SolverConfiguration::two_grains())?;
//! let exporter = CsvExporter::default();
//!
//! // Whole field, one line per time step
//! exporter.export_field(&result, None, "grains.csv")?;
//!
//! // 11 evenly spaced time steps, first and last included
//! exporter.export_field(&result, Some(11), "grains_light.csv")?;
//!
//! // Final profile only
//! exporter.export_profile(&result, result.time_steps - 1, "grains_final.csv")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod csv;

pub use csv::{CsvConfig, CsvExporter, CsvMetadata};

use crate::solver::SimulationResult;

/// Errors raised while exporting a result
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The output file could not be written
    #[error("cannot write export file: {0}")]
    Io(#[from] std::io::Error),

    /// The result has no rows or no columns
    #[error("nothing to export: the result is empty")]
    EmptyResult,

    /// A requested row does not exist
    #[error("row {row} out of range, the result has {rows} rows")]
    RowOutOfRange {
        /// Requested row
        row: usize,
        /// Row count of the result
        rows: usize,
    },
}

/// Abstraction trait for all export formats.
///
/// # Parameter `n_points`
///
/// - `None`: exports every time step
/// - `Some(n)`: uniformly downsamples to `n` time steps, always keeping the
///   **first and last** ones
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports the combined field, one record per time step.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or `result` is empty.
    fn export_field(
        &self,
        result: &SimulationResult,
        n_points: Option<usize>,
        path: &str,
    ) -> Result<(), Self::Error>;

    /// Exports the combined profile of one time step, one record per node.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or `row` does not exist.
    fn export_profile(
        &self,
        result: &SimulationResult,
        row: usize,
        path: &str,
    ) -> Result<(), Self::Error>;
}

/// Row indices kept when exporting `rows` rows down to `n_points`
///
/// Evenly spaced, first and last always included, no duplicates.
///
/// ```rust
/// use grain_rs::output::export::downsample_rows;
///
/// assert_eq!(downsample_rows(11, Some(3)), vec![0, 5, 10]);
/// assert_eq!(downsample_rows(4, None), vec![0, 1, 2, 3]);
/// assert_eq!(downsample_rows(4, Some(100)), vec![0, 1, 2, 3]);
/// ```
pub fn downsample_rows(rows: usize, n_points: Option<usize>) -> Vec<usize> {
    match n_points {
        _ if rows <= 1 => (0..rows).collect(),
        Some(n) if n < rows => {
            let n = n.max(2);
            let last = rows - 1;
            let mut kept: Vec<usize> = (0..n).map(|k| k * last / (n - 1)).collect();
            kept.dedup();
            kept
        }
        _ => (0..rows).collect(),
    }
}
