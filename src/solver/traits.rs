//! Solver trait and simulation result
//!
//! # Stability Guarantee
//!
//! - `Solver` trait: stable interface, new methods are added as separate types
//! - `SimulationResult`: fields are never removed

use std::collections::HashMap;

use nalgebra::DVector;
use ndarray::{s, Array2, ArrayView1, ArrayView2};

use crate::error::DiffusionError;
use crate::solver::{Scenario, SolverConfiguration};

// =================================================================================================
// Solver trait
// =================================================================================================

/// A numerical method for the two-segment problem
///
/// Implementations are stateless: the same solver can be reused for any
/// number of scenarios.
pub trait Solver {
    /// Run `scenario` with the discretization of `config`
    ///
    /// # Errors
    ///
    /// Any validation error of the scenario or the configuration. A
    /// numerically unstable configuration is not an error.
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, DiffusionError>;

    /// Human-readable method name
    fn name(&self) -> &'static str;
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Outcome of a run
///
/// Holds the combined field (`Nt` rows, `N1 + N2` columns, the first
/// segment's nodes first), the combined coordinates, the duration and `Nt`.
/// These four values are enough to rebuild the time/space mesh for
/// plotting or export.
///
/// # Example
///
/// ```rust
/// use grain_rs::solver::{ExplicitSolver, Scenario, Solver, SolverConfiguration};
///
/// let config = SolverConfiguration::two_grains().with_duration(10.0);
/// let result = ExplicitSolver::new().solve(&Scenario::two_grains(), &config)?;
///
/// assert_eq!(result.time_steps, 101);
/// assert_eq!(result.field.dim(), (101, 202));
/// assert_eq!(result.time_points()[100], 10.0);
/// assert_eq!(result.metadata("coupling"), Some("weighted (gamma = 0.8)"));
/// # Ok::<(), grain_rs::error::DiffusionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Combined field `[Nt × (N1 + N2)]`
    pub field: Array2<f64>,

    /// Combined coordinates, length `N1 + N2`
    ///
    /// The junction coordinate appears twice, once per segment.
    pub coordinates: DVector<f64>,

    /// Simulated duration
    pub duration: f64,

    /// Row count `Nt`
    pub time_steps: usize,

    /// Node counts `[N1, N2]`
    pub segment_nodes: [usize; 2],

    /// Free-form metadata (solver name, parameters, ...)
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Build a result from a combined field
    ///
    /// # Errors
    ///
    /// [`DiffusionError::Shape`] when the columns of `field` do not match
    /// `coordinates` or `segment_nodes`.
    pub fn new(
        field: Array2<f64>,
        coordinates: DVector<f64>,
        duration: f64,
        segment_nodes: [usize; 2],
    ) -> Result<Self, DiffusionError> {
        let columns = field.ncols();
        if columns != coordinates.len() || columns != segment_nodes[0] + segment_nodes[1] {
            return Err(ndarray::ShapeError::from_kind(ndarray::ErrorKind::IncompatibleShape).into());
        }

        Ok(Self {
            time_steps: field.nrows(),
            field,
            coordinates,
            duration,
            segment_nodes,
            metadata: HashMap::new(),
        })
    }

    /// Attach a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Metadata entry, if present
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// `(Nt, N1 + N2)`
    pub fn shape(&self) -> (usize, usize) {
        self.field.dim()
    }

    /// Time of every row, `Nt` values evenly spaced over `[0, duration]`
    ///
    /// When `duration` is not a multiple of `dt` these differ slightly from
    /// `n·dt`; they are the mesh the field is plotted against.
    pub fn time_points(&self) -> Vec<f64> {
        match self.time_steps {
            0 => Vec::new(),
            1 => vec![0.0],
            rows => {
                let last = rows - 1;
                let step = self.duration / last as f64;
                (0..rows)
                    .map(|n| if n == last { self.duration } else { n as f64 * step })
                    .collect()
            }
        }
    }

    /// Combined profile at row `n`
    pub fn row(&self, n: usize) -> Option<ArrayView1<'_, f64>> {
        (n < self.time_steps).then(|| self.field.row(n))
    }

    /// Combined profile at the last row
    pub fn final_profile(&self) -> ArrayView1<'_, f64> {
        self.field.row(self.time_steps - 1)
    }

    /// History of segment `index` (0 or 1)
    pub fn segment(&self, index: usize) -> Option<ArrayView2<'_, f64>> {
        let [first, second] = self.segment_nodes;
        match index {
            0 => Some(self.field.slice(s![.., ..first])),
            1 => Some(self.field.slice(s![.., first..first + second])),
            _ => None,
        }
    }

    /// Coordinates of segment `index` (0 or 1)
    pub fn segment_coordinates(&self, index: usize) -> Option<&[f64]> {
        let [first, second] = self.segment_nodes;
        let all = self.coordinates.as_slice();
        match index {
            0 => Some(&all[..first]),
            1 => Some(&all[first..first + second]),
            _ => None,
        }
    }

    /// Plain sum of row `n`
    pub fn total(&self, n: usize) -> Option<f64> {
        self.row(n).map(|row| row.sum())
    }

    /// Sum of row `n` with the four end nodes weighted by `weight`
    ///
    /// The end nodes are both ends of both segments. With hand-off coupling,
    /// equal diffusivities and `weight` equal to the Fourier number
    /// `α·dt/dx²`, this quantity is invariant from one row to the next.
    pub fn end_weighted_total(&self, n: usize, weight: f64) -> Option<f64> {
        let row = self.row(n)?;
        let [first, second] = self.segment_nodes;
        let ends = [0, first - 1, first, first + second - 1];

        let interior: f64 = row
            .iter()
            .enumerate()
            .filter(|(i, _)| !ends.contains(i))
            .map(|(_, value)| value)
            .sum();
        let boundary: f64 = ends.iter().map(|&i| row[i]).sum();

        Some(interior + weight * boundary)
    }

    /// Mean of segment `index` at row `n`
    pub fn segment_mean(&self, index: usize, n: usize) -> Option<f64> {
        let history = self.segment(index)?;
        (n < self.time_steps).then(|| history.row(n).mean()).flatten()
    }

    /// `count` row indices evenly spread from the first to the last row
    ///
    /// Duplicates are removed when `count` exceeds `Nt`.
    pub fn snapshot_rows(&self, count: usize) -> Vec<usize> {
        let last = self.time_steps.saturating_sub(1);
        match count {
            0 => Vec::new(),
            1 => vec![last],
            _ => {
                let mut rows: Vec<usize> = (0..count).map(|k| k * last / (count - 1)).collect();
                rows.dedup();
                rows
            }
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
