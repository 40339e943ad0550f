//! Discretization parameters
//!
//! [`SolverConfiguration`] is the HOW of a run: spatial step, time step and
//! total duration. It is independent of the segments being simulated, so
//! the same configuration can be reused across scenarios.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, DiffusionError};

/// Largest Fourier number for which the explicit scheme is stable
pub const STABILITY_LIMIT: f64 = 0.5;

/// Upper bound on `duration / dt`
const MAX_TIME_STEPS: f64 = 1.0e9;

/// Spatial and temporal discretization of a run
///
/// # Example
///
/// ```rust
/// use grain_rs::solver::SolverConfiguration;
///
/// let config = SolverConfiguration::new(1.0, 0.1, 1000.0);
/// assert!(config.validate().is_ok());
///
/// // Nt = floor(duration / dt) + 1
/// assert_eq!(config.time_steps(), 10001);
///
/// // α dt / dx²
/// assert!((config.fourier_number(1.0) - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfiguration {
    /// Spatial step shared by both segments
    pub dx: f64,

    /// Time step
    pub dt: f64,

    /// Total simulated time
    pub duration: f64,
}

impl SolverConfiguration {
    /// Create a configuration
    pub fn new(dx: f64, dt: f64, duration: f64) -> Self {
        Self { dx, dt, duration }
    }

    /// Discretization of the two-rod heat experiment
    ///
    /// `dx = 0.01`, `dt = 0.001`, `duration = 50`.
    pub fn two_rods() -> Self {
        Self::new(0.01, 0.001, 50.0)
    }

    /// Discretization of the two-grain partitioning experiment
    ///
    /// `dx = 1`, `dt = 0.1`, `duration = 1000`.
    pub fn two_grains() -> Self {
        Self::new(1.0, 0.1, 1000.0)
    }

    /// Builder pattern: set the spatial step
    pub fn with_dx(mut self, dx: f64) -> Self {
        self.dx = dx;
        self
    }

    /// Builder pattern: set the time step
    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Builder pattern: set the duration
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Check that every parameter is positive and finite
    pub fn validate(&self) -> Result<(), DiffusionError> {
        ensure_positive("dx", self.dx)?;
        ensure_positive("dt", self.dt)?;
        ensure_positive("duration", self.duration)?;

        if self.duration / self.dt > MAX_TIME_STEPS {
            return Err(DiffusionError::invalid("dt", self.dt, "too small for the duration"));
        }

        Ok(())
    }

    /// Number of stored time rows `Nt = floor(duration / dt) + 1`
    ///
    /// Row 0 is the initial condition, so `Nt - 1` steps are taken.
    pub fn time_steps(&self) -> usize {
        (self.duration / self.dt).floor() as usize + 1
    }

    /// Fourier number `α dt / dx²` of a segment with diffusivity `α`
    pub fn fourier_number(&self, diffusivity: f64) -> f64 {
        diffusivity * self.dt / (self.dx * self.dx)
    }

    /// Whether a segment with diffusivity `α` satisfies `α dt / dx² <= 0.5`
    ///
    /// Informational only: the integrator runs unstable configurations too.
    pub fn is_stable_for(&self, diffusivity: f64) -> bool {
        self.fourier_number(diffusivity) <= STABILITY_LIMIT
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_steps_truncates() {
        assert_eq!(SolverConfiguration::new(0.1, 0.1, 1.0).time_steps(), 11);
        assert_eq!(SolverConfiguration::new(0.1, 0.3, 1.0).time_steps(), 4);
        assert_eq!(SolverConfiguration::new(0.1, 2.0, 1.0).time_steps(), 1);
        assert_eq!(SolverConfiguration::two_rods().time_steps(), 50001);
        assert_eq!(SolverConfiguration::two_grains().time_steps(), 10001);
    }

    #[test]
    fn test_validation() {
        assert!(SolverConfiguration::new(0.1, 0.001, 1.0).validate().is_ok());

        let error = SolverConfiguration::new(0.0, 0.001, 1.0).validate().unwrap_err();
        assert!(error.to_string().contains("dx"));

        let error = SolverConfiguration::new(0.1, -0.001, 1.0).validate().unwrap_err();
        assert!(error.to_string().contains("dt"));

        let error = SolverConfiguration::new(0.1, 0.001, 0.0).validate().unwrap_err();
        assert!(error.to_string().contains("duration"));

        assert!(SolverConfiguration::new(0.1, f64::NAN, 1.0).validate().is_err());
    }

    #[test]
    fn test_fourier_number_and_stability() {
        let config = SolverConfiguration::two_rods();
        // 0.01 * 0.001 / 0.0001
        assert!((config.fourier_number(0.01) - 0.1).abs() < 1e-12);
        assert!(config.is_stable_for(0.01));
        assert!(config.is_stable_for(0.05));
        assert!(!config.is_stable_for(0.06));
    }

    #[test]
    fn test_builder() {
        let config = SolverConfiguration::two_grains()
            .with_dx(0.5)
            .with_dt(0.01)
            .with_duration(2.0);

        assert_eq!(config, SolverConfiguration::new(0.5, 0.01, 2.0));
    }
}
