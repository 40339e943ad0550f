//! CSV export of two-segment diffusion results
//!
//! The CSV files open in any spreadsheet, pandas, MATLAB or gnuplot.
//!
//! # Layouts
//!
//! ## Field (wide)
//!
//! One line per exported time step: the time, then one column per node of
//! the combined domain. The junction coordinate appears twice, once per
//! segment.
//!
//! ```csv
//! Time,x=0.000000,x=0.500000,x=1.000000,x=1.000000,x=1.500000,x=2.000000
//! 0.000000,800.000000,1000.000000,800.000000,400.000000,800.000000,400.000000
//! 0.004000,...
//! ```
//!
//! ## Profile (long)
//!
//! One line per node for a single time step.
//!
//! ```csv
//! Position,Value
//! 0.000000,800.000000
//! 0.500000,1000.000000
//! ```
//!
//! # Metadata header
//!
//! With [`CsvConfig::with_metadata`], the file starts with `#` comment lines:
//!
//! ```csv
//! # Two-Segment Diffusion Simulation
//! # Generated: 2026-10-16T09:30:00+00:00
//! # Scenario: two grains
//! # coupling: weighted (gamma = 0.8)
//! # dt: 0.1
//! # ...
//! #
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::output::export::{downsample_rows, ExportError, Exporter};
use crate::solver::SimulationResult;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use grain_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert_eq!(config.decimal_separator, '.');
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header of the time column (default: "Time")
    pub time_header: String,

    /// Header of the position column of a profile (default: "Position")
    pub position_header: String,

    /// Header of the value column of a profile (default: "Value")
    pub value_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            time_header: "Time".to_string(),
            position_header: "Position".to_string(),
            value_header: "Value".to_string(),
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// High precision (12 decimal places)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only non-`None` fields are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Scenario name (e.g. "two grains")
    pub scenario: Option<String>,

    /// Key/value pairs, written in order
    pub entries: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata of a result, keys sorted alphabetically
    ///
    /// ```rust
    /// use grain_rs::output::export::CsvMetadata;
    /// use grain_rs::solver::{ExplicitSolver, Scenario, Solver, SolverConfiguration};
    ///
    /// let config = SolverConfiguration::two_grains().with_duration(1.0);
    /// let result = ExplicitSolver::new().solve(&Scenario::two_grains(), &config)?;
    ///
    /// let metadata = CsvMetadata::from_result("two grains", &result);
    /// assert_eq!(metadata.entries[0].0, "coupling");
    /// # Ok::<(), grain_rs::error::DiffusionError>(())
    /// ```
    pub fn from_result(scenario: &str, result: &SimulationResult) -> Self {
        let mut entries: Vec<(String, String)> = result
            .metadata
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        entries.sort();

        Self {
            scenario: Some(scenario.to_string()),
            entries,
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.entries.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> std::io::Result<()> {
    writeln!(out, "# Two-Segment Diffusion Simulation")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some(scenario) = &metadata.scenario {
        writeln!(out, "# Scenario: {}", scenario)?;
    }

    for (key, value) in &metadata.entries {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

// =============================================================================
// Exporter
// =============================================================================

/// CSV implementation of [`Exporter`]
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    /// Formatting options
    pub config: CsvConfig,
}

impl CsvExporter {
    /// Exporter with the given formatting options
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    fn create(&self, path: &str) -> Result<BufWriter<File>, ExportError> {
        let mut out = BufWriter::new(File::create(path)?);

        if self.config.include_metadata
            && let Some(metadata) = &self.config.metadata
        {
            write_metadata_header(&mut out, metadata)?;
        }

        Ok(out)
    }
}

impl Exporter for CsvExporter {
    type Error = ExportError;

    fn export_field(
        &self,
        result: &SimulationResult,
        n_points: Option<usize>,
        path: &str,
    ) -> Result<(), ExportError> {
        let (rows, columns) = result.shape();
        if rows == 0 || columns == 0 {
            return Err(ExportError::EmptyResult);
        }

        let config = &self.config;
        let mut out = self.create(path)?;

        // ============================= Header =============================

        write!(out, "{}", config.time_header)?;
        for &x in result.coordinates.iter() {
            write!(out, "{}x={}", config.delimiter, format_number(x, config))?;
        }
        writeln!(out)?;

        // ============================= Data ===============================

        let time_points = result.time_points();
        for n in downsample_rows(rows, n_points) {
            write!(out, "{}", format_number(time_points[n], config))?;
            for &value in result.field.row(n).iter() {
                write!(out, "{}{}", config.delimiter, format_number(value, config))?;
            }
            writeln!(out)?;
        }

        out.flush()?;
        Ok(())
    }

    fn export_profile(
        &self,
        result: &SimulationResult,
        row: usize,
        path: &str,
    ) -> Result<(), ExportError> {
        let profile = result.row(row).ok_or(ExportError::RowOutOfRange {
            row,
            rows: result.time_steps,
        })?;
        if profile.is_empty() {
            return Err(ExportError::EmptyResult);
        }

        let config = &self.config;
        let mut out = self.create(path)?;

        writeln!(out, "{}{}{}", config.position_header, config.delimiter, config.value_header)?;
        for (&x, &value) in result.coordinates.iter().zip(profile.iter()) {
            writeln!(
                out,
                "{}{}{}",
                format_number(x, config),
                config.delimiter,
                format_number(value, config)
            )?;
        }

        out.flush()?;
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;
    use ndarray::array;
    use std::fs;
    use tempfile::NamedTempFile;

    fn result() -> SimulationResult {
        let field = array![
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            [1.5, 2.5, 3.5, 4.5, 5.5, 6.5],
            [2.0, 2.0, 2.0, 2.0, 2.0, 2.0],
        ];
        let coordinates = DVector::from_vec(vec![0.0, 0.5, 1.0, 1.0, 1.5, 2.0]);
        let mut result = SimulationResult::new(field, coordinates, 4.0, [3, 3]).unwrap();
        result.add_metadata("solver", "FTCS explicit");
        result.add_metadata("coupling", "hand-off");
        result
    }

    fn path(file: &NamedTempFile) -> &str {
        file.path().to_str().unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.5, &CsvConfig::default()), "1.500000");
        assert_eq!(format_number(1.5, &CsvConfig::european()), "1,500000");
        assert_eq!(format_number(1.0 / 3.0, &CsvConfig::default().precision(2)), "0.33");
    }

    #[test]
    fn test_export_field_wide_layout() {
        let file = NamedTempFile::new().unwrap();
        let exporter = CsvExporter::new(CsvConfig::default().precision(1));

        exporter.export_field(&result(), None, path(&file)).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Time,x=0.0,x=0.5,x=1.0,x=1.0,x=1.5,x=2.0");
        assert_eq!(lines[1], "0.0,1.0,2.0,3.0,4.0,5.0,6.0");
        assert_eq!(lines[3], "4.0,2.0,2.0,2.0,2.0,2.0,2.0");
    }

    #[test]
    fn test_export_field_downsampled() {
        let file = NamedTempFile::new().unwrap();
        let exporter = CsvExporter::new(CsvConfig::default().precision(1));

        exporter.export_field(&result(), Some(2), path(&file)).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let times: Vec<&str> = content
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(times, vec!["0.0", "4.0"]);
    }

    #[test]
    fn test_export_with_metadata() {
        let file = NamedTempFile::new().unwrap();
        let result = result();
        let config = CsvConfig::default().with_metadata(CsvMetadata::from_result("test", &result));

        CsvExporter::new(config).export_field(&result, None, path(&file)).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "# Two-Segment Diffusion Simulation");
        assert!(lines[1].starts_with("# Generated: "));
        assert_eq!(lines[2], "# Scenario: test");
        assert_eq!(lines[3], "# coupling: hand-off");
        assert_eq!(lines[4], "# solver: FTCS explicit");
        assert_eq!(lines[5], "#");
        assert!(lines[6].starts_with("Time,"));
    }

    #[test]
    fn test_export_profile() {
        let file = NamedTempFile::new().unwrap();
        let exporter = CsvExporter::new(CsvConfig::european().precision(2));

        exporter.export_profile(&result(), 1, path(&file)).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Position;Value");
        assert_eq!(lines[1], "0,00;1,50");
        assert_eq!(lines[6], "2,00;6,50");
    }

    #[test]
    fn test_export_profile_out_of_range() {
        let file = NamedTempFile::new().unwrap();
        let error = CsvExporter::default()
            .export_profile(&result(), 3, path(&file))
            .unwrap_err();

        assert!(matches!(error, ExportError::RowOutOfRange { row: 3, rows: 3 }));
    }

    #[test]
    fn test_export_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing").join("field.csv");

        let error = CsvExporter::default()
            .export_field(&result(), None, missing.to_str().unwrap())
            .unwrap_err();

        assert!(matches!(error, ExportError::Io(_)));
    }
}
