//! Forward-time central-space solver
//!
//! # Mathematical Background
//!
//! Each segment obeys the 1-D diffusion equation
//!
//! ```text
//! ∂u/∂t = α ∂²u/∂x²
//! ```
//!
//! discretized with a forward Euler step in time and a central difference
//! in space:
//!
//! ```text
//! u[n+1, i] = u[n, i] + r (u[n, i+1] - 2 u[n, i] + u[n, i-1]),    r = α dt / dx²
//! ```
//!
//! # Characteristics
//!
//! - **Order**: first order in time, second order in space
//! - **Stability**: requires `r <= 0.5` in both segments; not enforced
//! - **Cost**: one stencil evaluation per interior node and step
//! - **Memory**: the whole `[Nt × N]` history of both segments
//!
//! Outside the stability region the run still completes and the field
//! oscillates with growing amplitude.

use log::info;

use crate::error::DiffusionError;
use crate::solver::{Integrator, Scenario, SimulationResult, Solver, SolverConfiguration};

// =================================================================================================
// Explicit solver
// =================================================================================================

/// Explicit forward-time central-space solver
///
/// Drives an [`Integrator`] to completion and returns the combined field.
///
/// # Example
///
/// ```rust
/// use grain_rs::solver::{ExplicitSolver, Scenario, Solver, SolverConfiguration};
///
/// let solver = ExplicitSolver::new();
/// let config = SolverConfiguration::two_rods().with_duration(0.1);
///
/// let result = solver.solve(&Scenario::two_rods(), &config)?;
/// assert_eq!(result.shape(), (101, 202));
/// assert_eq!(result.metadata("solver"), Some("FTCS explicit"));
/// # Ok::<(), grain_rs::error::DiffusionError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitSolver;

impl ExplicitSolver {
    /// Create a new explicit solver
    pub fn new() -> Self {
        Self
    }
}

impl Solver for ExplicitSolver {
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, DiffusionError> {
        let integrator = Integrator::new(scenario, config)?;

        let (first, second) = integrator.segments();
        info!(
            "{}: {} ({} nodes) + {} ({} nodes), {} rows, {}",
            self.name(),
            first.name(),
            first.nodes(),
            second.name(),
            second.nodes(),
            integrator.time_steps(),
            scenario.coupling,
        );

        let mut result = integrator.into_result()?;
        result.add_metadata("solver", self.name());

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "FTCS explicit"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
