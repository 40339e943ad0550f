//! Junction coupling
//!
//! The two segments meet at a pair of junction nodes, one per segment, at
//! the same coordinate. Their values are not produced by the interior
//! stencil: after both interiors of the next row are known, the coupler
//! sets both junction nodes from the near-junction interior nodes.
//!
//! # Weighted rule
//!
//! With `a = near_junction_1[n+1]`, `b = near_junction_2[n+1]`, reference
//! diffusivity `α1` and interface factor `γ`:
//!
//! ```text
//! junction_1[n+1] = (α1·a + α1·b) / (α1 + γ·α1)
//! junction_2[n+1] = (α1·a + α1·b) / (α1/γ + α1)
//! ```
//!
//! so that `junction_1 / junction_2 = 1/γ` at every step. `γ = 1` makes the
//! two junction nodes equal.
//!
//! # Hand-off rule
//!
//! Each junction node takes the other segment's near-junction value of the
//! current row:
//!
//! ```text
//! junction_1[n+1] = near_junction_2[n]
//! junction_2[n+1] = near_junction_1[n]
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, DiffusionError};

/// Interface factor used when none is given
pub const DEFAULT_GAMMA: f64 = 0.8;

/// Rule setting the two junction nodes
///
/// # Example
///
/// ```rust
/// use grain_rs::solver::CouplingMode;
///
/// let coupling = CouplingMode::weighted(0.8);
/// let (j1, j2) = coupling.junction_values(1.0, (0.0, 0.0), (500.0, 300.0));
///
/// assert!((j1 - 800.0 / 1.8).abs() < 1e-12);
/// assert!((j2 - 800.0 / 2.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CouplingMode {
    /// Weighted average of the next-row near-junction values
    Weighted {
        /// Interface-resistance factor γ (positive)
        gamma: f64,
    },

    /// Swap of the current-row near-junction values
    HandOff,
}

impl Default for CouplingMode {
    fn default() -> Self {
        CouplingMode::Weighted { gamma: DEFAULT_GAMMA }
    }
}

impl CouplingMode {
    /// Weighted coupling with factor `gamma`
    pub fn weighted(gamma: f64) -> Self {
        CouplingMode::Weighted { gamma }
    }

    /// Check that γ is positive and finite
    pub fn validate(&self) -> Result<(), DiffusionError> {
        match self {
            CouplingMode::Weighted { gamma } => ensure_positive("gamma", *gamma),
            CouplingMode::HandOff => Ok(()),
        }
    }

    /// Junction values `(junction_1, junction_2)` of row `n + 1`
    ///
    /// - `alpha`: reference diffusivity, the first segment's
    /// - `current`: `(near_junction_1[n], near_junction_2[n])`
    /// - `next`: `(near_junction_1[n+1], near_junction_2[n+1])`
    #[inline]
    pub fn junction_values(&self, alpha: f64, current: (f64, f64), next: (f64, f64)) -> (f64, f64) {
        match *self {
            CouplingMode::Weighted { gamma } => weighted_junction(alpha, gamma, next.0, next.1),
            CouplingMode::HandOff => (current.1, current.0),
        }
    }
}

impl fmt::Display for CouplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CouplingMode::Weighted { gamma } => write!(f, "weighted (gamma = {})", gamma),
            CouplingMode::HandOff => write!(f, "hand-off"),
        }
    }
}

/// Weighted junction rule with reference diffusivity `alpha`
///
/// `near_first` and `near_second` are the near-junction interior values of
/// the row being computed.
#[inline]
pub fn weighted_junction(alpha: f64, gamma: f64, near_first: f64, near_second: f64) -> (f64, f64) {
    let flux = alpha * near_first + alpha * near_second;
    (flux / (alpha + gamma * alpha), flux / (alpha / gamma + alpha))
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weighted_literal_values() {
        let (j1, j2) = weighted_junction(1.0, 0.8, 500.0, 300.0);

        assert_relative_eq!(j1, 444.444_444_444_444_4, epsilon = 1e-9);
        assert_relative_eq!(j2, 355.555_555_555_555_6, epsilon = 1e-9);
    }

    #[test]
    fn test_weighted_ratio_is_inverse_gamma() {
        for &gamma in &[0.25, 0.8, 1.0, 3.0] {
            let (j1, j2) = weighted_junction(0.7, gamma, 12.5, 40.0);
            assert_relative_eq!(j1 / j2, 1.0 / gamma, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_weighted_gamma_one_averages() {
        let (j1, j2) = weighted_junction(2.0, 1.0, 10.0, 30.0);
        assert_eq!(j1, 20.0);
        assert_eq!(j2, 20.0);
    }

    #[test]
    fn test_weighted_independent_of_alpha() {
        let (a1, a2) = weighted_junction(1.0, 0.8, 500.0, 300.0);
        let (b1, b2) = weighted_junction(0.01, 0.8, 500.0, 300.0);

        assert_relative_eq!(a1, b1, epsilon = 1e-9);
        assert_relative_eq!(a2, b2, epsilon = 1e-9);
    }

    #[test]
    fn test_hand_off_swaps_current_row() {
        let coupling = CouplingMode::HandOff;
        let (j1, j2) = coupling.junction_values(0.01, (1.0, 2.0), (100.0, 200.0));

        assert_eq!(j1, 2.0);
        assert_eq!(j2, 1.0);
    }

    #[test]
    fn test_weighted_reads_next_row() {
        let coupling = CouplingMode::weighted(1.0);
        let (j1, j2) = coupling.junction_values(1.0, (1.0, 2.0), (100.0, 200.0));

        assert_eq!(j1, 150.0);
        assert_eq!(j2, 150.0);
    }

    #[test]
    fn test_default_and_validation() {
        assert_eq!(CouplingMode::default(), CouplingMode::Weighted { gamma: 0.8 });
        assert!(CouplingMode::default().validate().is_ok());
        assert!(CouplingMode::HandOff.validate().is_ok());
        assert!(CouplingMode::weighted(0.0).validate().is_err());
        assert!(CouplingMode::weighted(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_serde_tags() {
        let coupling: CouplingMode = serde_json::from_str(r#"{ "mode": "hand_off" }"#).unwrap();
        assert_eq!(coupling, CouplingMode::HandOff);

        let coupling: CouplingMode = serde_json::from_str(r#"{ "mode": "weighted", "gamma": 0.5 }"#).unwrap();
        assert_eq!(coupling, CouplingMode::weighted(0.5));
    }
}
