//! Segments and their spatial discretization
//!
//! A segment is one physical grain (or rod) with its own length and
//! diffusivity. One of its ends is insulated, the other one touches the
//! neighbouring segment at the junction.
//!
//! # Discretization
//!
//! For a shared spatial step `dx`, a segment of length `L` carries
//!
//! ```text
//! N = floor(L / dx) + 1
//! ```
//!
//! nodes, linearly spaced from its offset to `offset + L`. The explicit
//! stencil needs at least one interior node, so `N >= 3`.
//!
//! ```text
//!   insulated                                 junction
//!      ▼                                          ▼
//!      o────o────o────o── ... ──o────o────o────o
//!      0    1    2                  N-3  N-2  N-1
//! ```

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, DiffusionError};

/// Upper bound on `L / dx`, far beyond any array that fits in memory
const MAX_NODES: f64 = 1.0e9;

// =================================================================================================
// Side
// =================================================================================================

/// End of a segment
///
/// Used to select which end of a segment is insulated. The junction is
/// always on the opposite end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// First node (lowest coordinate)
    Left,
    /// Last node (highest coordinate)
    Right,
}

impl Side {
    /// The other end
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Index of the end node in a segment of `nodes` nodes
    pub fn end_index(self, nodes: usize) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => nodes - 1,
        }
    }

    /// Index of the interior node adjacent to the end node
    pub fn inner_index(self, nodes: usize) -> usize {
        match self {
            Side::Left => 1,
            Side::Right => nodes - 2,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

// =================================================================================================
// Segment configuration
// =================================================================================================

/// Physical description of a segment, before discretization
///
/// # Example
///
/// ```rust
/// use grain_rs::physics::{SegmentConfig, Side};
///
/// let grain = SegmentConfig::new("grain 1", 100.0, 1.0, Side::Left);
/// assert!(grain.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentConfig {
    /// Display name, used in logs and errors
    pub name: String,

    /// Length (positive)
    pub length: f64,

    /// Diffusivity α (positive)
    pub diffusivity: f64,

    /// Insulated (zero-flux) end
    pub insulated: Side,
}

impl SegmentConfig {
    /// Create a segment description
    pub fn new(name: impl Into<String>, length: f64, diffusivity: f64, insulated: Side) -> Self {
        Self {
            name: name.into(),
            length,
            diffusivity,
            insulated,
        }
    }

    /// Check that length and diffusivity are positive and finite
    pub fn validate(&self) -> Result<(), DiffusionError> {
        ensure_positive("length", self.length)?;
        ensure_positive("diffusivity", self.diffusivity)
    }
}

// =================================================================================================
// Spatial grid (grid builder)
// =================================================================================================

/// Number of nodes of a segment of `length` discretized with step `dx`
///
/// `floor(length / dx) + 1`. Inputs are expected to be validated.
pub fn node_count(length: f64, dx: f64) -> usize {
    (length / dx).floor() as usize + 1
}

/// Node coordinates of one segment
///
/// Ascending, `N` values linearly spaced from `start` to `start + length`
/// inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGrid {
    coordinates: DVector<f64>,
    dx: f64,
}

impl SpatialGrid {
    /// Build the grid of a segment
    ///
    /// # Errors
    ///
    /// - `length`, `dx` not positive and finite, or `start` not finite
    /// - fewer than three nodes (`length < 2 dx`)
    pub fn build(name: &str, length: f64, dx: f64, start: f64) -> Result<Self, DiffusionError> {
        ensure_positive("length", length)?;
        ensure_positive("dx", dx)?;
        if !start.is_finite() {
            return Err(DiffusionError::invalid("offset", start, "must be finite"));
        }
        if length / dx > MAX_NODES {
            return Err(DiffusionError::invalid("dx", dx, "too small for the segment length"));
        }

        let nodes = node_count(length, dx);
        if nodes < 3 {
            return Err(DiffusionError::TooFewNodes {
                segment: name.to_string(),
                nodes,
            });
        }

        let step = length / (nodes - 1) as f64;
        let last = nodes - 1;
        let coordinates = DVector::from_fn(nodes, |i, _| {
            if i == last {
                start + length
            } else {
                start + i as f64 * step
            }
        });

        Ok(Self { coordinates, dx })
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Always false for a built grid
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Node coordinates
    pub fn coordinates(&self) -> &DVector<f64> {
        &self.coordinates
    }

    /// First coordinate
    pub fn start(&self) -> f64 {
        self.coordinates[0]
    }

    /// Last coordinate
    pub fn end(&self) -> f64 {
        self.coordinates[self.coordinates.len() - 1]
    }

    /// Spatial step the grid was built with
    pub fn dx(&self) -> f64 {
        self.dx
    }
}

// =================================================================================================
// Segment
// =================================================================================================

/// A discretized segment
///
/// Immutable once built. Holds the physical parameters, the coordinate
/// offset inside the combined domain and the node coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    name: String,
    length: f64,
    diffusivity: f64,
    offset: f64,
    insulated: Side,
    grid: SpatialGrid,
}

impl Segment {
    /// Discretize a segment description with step `dx`, starting at `offset`
    pub fn discretize(config: &SegmentConfig, dx: f64, offset: f64) -> Result<Self, DiffusionError> {
        config.validate()?;
        let grid = SpatialGrid::build(&config.name, config.length, dx, offset)?;

        log::debug!(
            "segment '{}': {} nodes on [{}, {}], alpha = {}, insulated {}",
            config.name,
            grid.len(),
            grid.start(),
            grid.end(),
            config.diffusivity,
            config.insulated,
        );

        Ok(Self {
            name: config.name.clone(),
            length: config.length,
            diffusivity: config.diffusivity,
            offset,
            insulated: config.insulated,
            grid,
        })
    }

    /// Segment name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Diffusivity α
    pub fn diffusivity(&self) -> f64 {
        self.diffusivity
    }

    /// Coordinate of the first node in the combined domain
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Node count
    pub fn nodes(&self) -> usize {
        self.grid.len()
    }

    /// Node coordinates
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Insulated end
    pub fn insulated_side(&self) -> Side {
        self.insulated
    }

    /// End touching the other segment
    pub fn junction_side(&self) -> Side {
        self.insulated.opposite()
    }

    /// Index of the insulated end node
    pub fn free_index(&self) -> usize {
        self.insulated.end_index(self.nodes())
    }

    /// Index of the interior neighbour of the insulated end node
    pub fn free_neighbor_index(&self) -> usize {
        self.insulated.inner_index(self.nodes())
    }

    /// Index of the junction node
    pub fn junction_index(&self) -> usize {
        self.junction_side().end_index(self.nodes())
    }

    /// Index of the interior node next to the junction node
    pub fn near_junction_index(&self) -> usize {
        self.junction_side().inner_index(self.nodes())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
