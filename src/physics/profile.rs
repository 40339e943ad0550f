//! Initial profiles
//!
//! An initial profile maps a coordinate of the combined domain to the
//! field value at `t = 0`. The two declarative shapes cover the parabolic
//! caps the grain experiments start from; anything else goes through
//! [`InitialProfile::custom`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Shared profile function
pub type ProfileFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Initial field value as a function of position
///
/// # Example
///
/// ```rust
/// use grain_rs::physics::InitialProfile;
///
/// // C(x, 0) = -0.04 (x - 50)² + 200
/// let cap = InitialProfile::parabolic(-0.04, 50.0, 200.0);
/// assert_eq!(cap.evaluate(50.0), 200.0);
///
/// let ramp = InitialProfile::custom(|x| 2.0 * x);
/// assert_eq!(ramp.evaluate(3.0), 6.0);
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitialProfile {
    /// Same value everywhere
    Uniform {
        /// Field value
        value: f64,
    },

    /// `curvature * (x - center)² + peak`
    Parabolic {
        /// Quadratic coefficient (negative for a cap)
        curvature: f64,
        /// Position of the vertex
        center: f64,
        /// Value at the vertex
        peak: f64,
    },

    /// Arbitrary function (not serializable)
    #[serde(skip)]
    Custom(ProfileFn),
}

impl InitialProfile {
    /// Uniform profile
    pub fn uniform(value: f64) -> Self {
        Self::Uniform { value }
    }

    /// Parabolic profile `curvature * (x - center)² + peak`
    pub fn parabolic(curvature: f64, center: f64, peak: f64) -> Self {
        Self::Parabolic { curvature, center, peak }
    }

    /// Profile from any function of the coordinate
    pub fn custom<F>(function: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(function))
    }

    /// Value at coordinate `x`
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            InitialProfile::Uniform { value } => *value,
            InitialProfile::Parabolic { curvature, center, peak } => {
                curvature * (x - center).powi(2) + peak
            }
            InitialProfile::Custom(function) => function(x),
        }
    }

    /// Whether this profile can be written to a setup file
    pub fn is_serializable(&self) -> bool {
        !matches!(self, InitialProfile::Custom(_))
    }
}

impl fmt::Debug for InitialProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitialProfile::Uniform { value } => f.debug_struct("Uniform").field("value", value).finish(),
            InitialProfile::Parabolic { curvature, center, peak } => f
                .debug_struct("Parabolic")
                .field("curvature", curvature)
                .field("center", center)
                .field("peak", peak)
                .finish(),
            InitialProfile::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}

impl fmt::Display for InitialProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitialProfile::Uniform { value } => write!(f, "uniform {}", value),
            InitialProfile::Parabolic { curvature, center, peak } => {
                write!(f, "{} (x - {})^2 + {}", curvature, center, peak)
            }
            InitialProfile::Custom(_) => write!(f, "custom"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform() {
        let profile = InitialProfile::uniform(42.0);
        assert_eq!(profile.evaluate(-3.0), 42.0);
        assert_eq!(profile.evaluate(1e6), 42.0);
    }

    #[test]
    fn test_parabolic_matches_rod_profile() {
        // T(x, 0) = -800 (x - 0.5)² + 1000
        let profile = InitialProfile::parabolic(-800.0, 0.5, 1000.0);
        assert_eq!(profile.evaluate(0.5), 1000.0);
        assert_eq!(profile.evaluate(0.0), 800.0);
        assert_eq!(profile.evaluate(1.0), 800.0);
    }

    #[test]
    fn test_custom() {
        let profile = InitialProfile::custom(|x| x * x);
        assert_eq!(profile.evaluate(3.0), 9.0);
        assert!(!profile.is_serializable());
        assert_eq!(format!("{:?}", profile), "Custom(<fn>)");
    }

    #[test]
    fn test_deserialize_tagged() {
        let json = r#"{ "kind": "parabolic", "curvature": -0.02, "center": 150.0, "peak": 100.0 }"#;
        let profile: InitialProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.evaluate(150.0), 100.0);

        let json = r#"{ "kind": "uniform", "value": 3.5 }"#;
        let profile: InitialProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.evaluate(0.0), 3.5);
    }
}
