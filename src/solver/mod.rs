//! Numerical solvers
//!
//! # The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** ([`Scenario`]) - WHAT to solve
//!    - the two segments (length, diffusivity, insulated end)
//!    - their initial profiles
//!    - the junction rule ([`CouplingMode`])
//!
//! 2. **Configuration** ([`SolverConfiguration`]) - HOW to solve
//!    - spatial step `dx`, time step `dt`, `duration`
//!
//! 3. **Solver** ([`Solver`] trait) - the numerical method
//!    - drives an [`Integrator`] and returns a [`SimulationResult`]
//!
//! # Module Organization
//!
//! - **`config`**: [`SolverConfiguration`], Fourier number
//! - **`scenario`**: [`Scenario`], named presets, [`SimulationSetup`]
//! - **`stencil`**: interior update of one segment
//! - **`boundary`**: insulated free ends
//! - **`junction`**: [`CouplingMode`], junction values
//! - **`integrator`**: [`Integrator`] state machine
//! - **`traits`**: [`Solver`], [`SimulationResult`]
//! - **`methods`**: [`ExplicitSolver`]
//!
//! # Quick Start Example
//!
//! ```rust
//! use grain_rs::solver::{ExplicitSolver, Scenario, Solver, SolverConfiguration};
//!
//! // 1. WHAT
//! let scenario = Scenario::two_grains();
//!
//! // 2. HOW
//! let config = SolverConfiguration::two_grains().with_duration(50.0);
//!
//! // 3. Solve
//! let result = ExplicitSolver::new().solve(&scenario, &config)?;
//!
//! // 4. Access results
//! assert_eq!(result.time_steps, 501);
//! assert_eq!(result.coordinates.len(), 202);
//! # Ok::<(), grain_rs::error::DiffusionError>(())
//! ```
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌─────────────────┐   ┌──────────────────────┐
//! │ Scenario        │   │ SolverConfiguration  │
//! │ (segments,      │   │ (dx, dt, duration)   │
//! │  profiles, γ)   │   └──────────┬───────────┘
//! └────────┬────────┘              │
//!          └───────────┬───────────┘
//!             ┌────────▼────────┐
//!             │   Integrator    │  interior → free ends → junction
//!             └────────┬────────┘
//!             ┌────────▼─────────────┐
//!             │ SimulationResult     │  combined field + coordinates
//!             └──────────────────────┘
//! ```
//!
//! # Error Handling
//!
//! Every fallible operation returns [`DiffusionError`](crate::error::DiffusionError).
//! Errors are configuration errors, raised before any array is allocated:
//! non-positive or non-finite parameters, or a segment shorter than `2·dx`.
//! Instability (`α·dt/dx² > 0.5`) is not an error.

// =================================================================================================
// Module Declarations
// =================================================================================================
mod boundary;
mod config;
mod integrator;
mod junction;
mod methods;
mod scenario;
mod stencil;
mod traits;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Nodes per segment above which the interior stencil hands its rows to
// rayon (feature `parallel`). Stored in an AtomicUsize so benchmarks and
// tests can change it at runtime. Relaxed ordering: the value is a
// performance hint, not a synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default node count above which the interior update runs in parallel
const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// Without the `parallel` feature the value is ignored.
///
/// # Example
///
/// ```rust
/// use grain_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use grain_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Saves the current threshold on construction and restores it on drop.
///
/// Guards are serialized so concurrent tests never observe each other's
/// threshold.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` until the guard is dropped
    pub(crate) fn save(new_value: usize) -> Self {
        let lock = THRESHOLD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous, _lock: lock }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use boundary::apply_insulated;
pub use config::{SolverConfiguration, STABILITY_LIMIT};
pub use integrator::{Integrator, Phase, MAX_FIELD_VALUES};
pub use junction::{weighted_junction, CouplingMode, DEFAULT_GAMMA};
pub use methods::ExplicitSolver;
pub use scenario::{Scenario, SimulationSetup};
pub use stencil::step_interior;
pub use traits::{SimulationResult, Solver};

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_value() {
        assert_eq!(DEFAULT_PARALLEL_THRESHOLD, 4096);
    }

    #[test]
    fn test_get_and_set_threshold() {
        let _guard = ThresholdGuard::save(500);
        assert_eq!(parallel_threshold(), 500);
    }

    #[test]
    #[should_panic(expected = "parallel threshold must be at least 1")]
    fn test_zero_threshold_panics() {
        set_parallel_threshold(0);
    }

    #[test]
    fn test_threshold_guard_restores_previous_value() {
        let outer = ThresholdGuard::save(42);
        let previous = outer.previous;
        assert_eq!(parallel_threshold(), 42);
        drop(outer);

        let inner = ThresholdGuard::save(7);
        assert_eq!(inner.previous, previous);
    }
}
