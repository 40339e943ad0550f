//! Error types
//!
//! Every error the core can raise is a configuration error detected before
//! any field array is allocated. Numerical instability of the explicit
//! scheme is deliberately absent from this list: a run with
//! `α·dt/dx² > 0.5` completes and produces diverging values.

use crate::physics::Side;

/// Errors raised while validating or discretizing a simulation
#[derive(Debug, thiserror::Error)]
pub enum DiffusionError {
    /// A scalar parameter is out of its admissible range
    #[error("invalid {parameter}: {value} ({reason})")]
    InvalidParameter {
        /// Parameter name as it appears in the configuration
        parameter: &'static str,
        /// Offending value
        value: f64,
        /// Constraint that was violated
        reason: &'static str,
    },

    /// A segment discretizes to fewer than three nodes
    #[error("segment '{segment}' has {nodes} nodes, at least 3 are required for an interior node")]
    TooFewNodes {
        /// Segment name
        segment: String,
        /// Node count `floor(length/dx) + 1`
        nodes: usize,
    },

    /// A segment's junction end does not face the other segment
    ///
    /// The first segment starts at the origin and meets the second one at
    /// `L1`, so its insulated end is the left one; the second segment is
    /// insulated on its right end.
    #[error("segment '{segment}' is insulated on its {insulated} end, its junction would not face the other segment")]
    MisplacedJunction {
        /// Segment name
        segment: String,
        /// Insulated end as configured
        insulated: Side,
    },

    /// Two arrays that must share a row count do not
    #[error("field shape mismatch: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// A declarative setup could not be parsed
    #[error("cannot parse simulation setup: {0}")]
    Setup(#[from] serde_json::Error),
}

impl DiffusionError {
    /// Shorthand for [`DiffusionError::InvalidParameter`]
    pub(crate) fn invalid(parameter: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter { parameter, value, reason }
    }
}

/// Require `value` to be finite and strictly positive
pub(crate) fn ensure_positive(parameter: &'static str, value: f64) -> Result<(), DiffusionError> {
    if !value.is_finite() {
        return Err(DiffusionError::invalid(parameter, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(DiffusionError::invalid(parameter, value, "must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("dx", 0.1).is_ok());
        assert!(ensure_positive("dx", 0.0).is_err());
        assert!(ensure_positive("dx", -1.0).is_err());
        assert!(ensure_positive("dx", f64::NAN).is_err());
        assert!(ensure_positive("dx", f64::INFINITY).is_err());
    }

    #[test]
    fn test_misplaced_junction_message() {
        let error = DiffusionError::MisplacedJunction {
            segment: "rod 1".to_string(),
            insulated: Side::Right,
        };
        assert_eq!(
            error.to_string(),
            "segment 'rod 1' is insulated on its right end, its junction would not face the other segment"
        );
    }

    #[test]
    fn test_error_display() {
        let error = DiffusionError::invalid("dt", -0.5, "must be positive");
        assert_eq!(error.to_string(), "invalid dt: -0.5 (must be positive)");

        let error = DiffusionError::TooFewNodes { segment: "grain 1".to_string(), nodes: 2 };
        assert!(error.to_string().contains("grain 1"));
        assert!(error.to_string().contains("2 nodes"));
    }
}
