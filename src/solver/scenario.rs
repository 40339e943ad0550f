//! Simulation scenario definition
//!
//! A scenario is the WHAT of a run: the two segments, their initial profiles
//! and the junction coupling. It is solved with a
//! [`SolverConfiguration`] (the HOW).
//!
//! The first segment starts at coordinate 0; the second one starts where
//! the first one ends.

use serde::{Deserialize, Serialize};

use crate::error::DiffusionError;
use crate::physics::{InitialProfile, SegmentConfig, Side};
use crate::solver::{CouplingMode, SolverConfiguration};

/// Two coupled segments and their initial state
///
/// # Example
///
/// ```rust
/// use grain_rs::physics::{InitialProfile, SegmentConfig, Side};
/// use grain_rs::solver::{CouplingMode, Scenario, SolverConfiguration};
///
/// let scenario = Scenario::new(
///     SegmentConfig::new("grain 1", 100.0, 1.0, Side::Left),
///     SegmentConfig::new("grain 2", 100.0, 1.0, Side::Right),
///     InitialProfile::parabolic(-0.04, 50.0, 200.0),
///     InitialProfile::parabolic(-0.02, 150.0, 100.0),
/// )
/// .with_coupling(CouplingMode::weighted(0.8));
///
/// assert!(scenario.validate().is_ok());
/// assert!(scenario.is_stable(&SolverConfiguration::two_grains()));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Segment at the origin
    pub first: SegmentConfig,

    /// Segment following the first one
    pub second: SegmentConfig,

    /// Initial profile of the first segment
    pub first_profile: InitialProfile,

    /// Initial profile of the second segment
    pub second_profile: InitialProfile,

    /// Junction rule
    #[serde(default)]
    pub coupling: CouplingMode,
}

impl Scenario {
    /// Create a scenario with the default coupling
    pub fn new(
        first: SegmentConfig,
        second: SegmentConfig,
        first_profile: InitialProfile,
        second_profile: InitialProfile,
    ) -> Self {
        Self {
            first,
            second,
            first_profile,
            second_profile,
            coupling: CouplingMode::default(),
        }
    }

    /// Two rods of unit length exchanging heat through a hand-off junction
    ///
    /// Solve with [`SolverConfiguration::two_rods`].
    pub fn two_rods() -> Self {
        Self::new(
            SegmentConfig::new("rod 1", 1.0, 0.01, Side::Left),
            SegmentConfig::new("rod 2", 1.0, 0.01, Side::Right),
            InitialProfile::parabolic(-800.0, 0.5, 1000.0),
            InitialProfile::parabolic(-400.0, 1.5, 800.0),
        )
        .with_coupling(CouplingMode::HandOff)
    }

    /// Two grains partitioning an element through a weighted junction, γ = 0.8
    ///
    /// Solve with [`SolverConfiguration::two_grains`].
    pub fn two_grains() -> Self {
        Self::new(
            SegmentConfig::new("grain 1", 100.0, 1.0, Side::Left),
            SegmentConfig::new("grain 2", 100.0, 1.0, Side::Right),
            InitialProfile::parabolic(-0.04, 50.0, 200.0),
            InitialProfile::parabolic(-0.02, 150.0, 100.0),
        )
        .with_coupling(CouplingMode::weighted(0.8))
    }

    /// Builder pattern: set the junction rule
    pub fn with_coupling(mut self, coupling: CouplingMode) -> Self {
        self.coupling = coupling;
        self
    }

    /// Check both segments, their placement and the coupling
    ///
    /// The junction must join the first segment's right end to the second
    /// segment's left end: the first segment is insulated on the left, the
    /// second one on the right.
    pub fn validate(&self) -> Result<(), DiffusionError> {
        self.first.validate()?;
        self.second.validate()?;

        for (segment, insulated) in [(&self.first, Side::Left), (&self.second, Side::Right)] {
            if segment.insulated != insulated {
                return Err(DiffusionError::MisplacedJunction {
                    segment: segment.name.clone(),
                    insulated: segment.insulated,
                });
            }
        }

        self.coupling.validate()
    }

    /// Coordinate of the junction, `L1`
    pub fn junction_position(&self) -> f64 {
        self.first.length
    }

    /// Total length `L1 + L2`
    pub fn total_length(&self) -> f64 {
        self.first.length + self.second.length
    }

    /// Whether both segments satisfy `α·dt/dx² <= 0.5` under `config`
    ///
    /// Informational: unstable scenarios still run.
    pub fn is_stable(&self, config: &SolverConfiguration) -> bool {
        config.is_stable_for(self.first.diffusivity) && config.is_stable_for(self.second.diffusivity)
    }
}

// =================================================================================================
// Declarative setup
// =================================================================================================

/// A scenario together with its discretization
///
/// Loadable from JSON for every profile except
/// [`InitialProfile::Custom`].
///
/// ```json
/// {
///   "scenario": {
///     "first":  { "name": "grain 1", "length": 100.0, "diffusivity": 1.0, "insulated": "left" },
///     "second": { "name": "grain 2", "length": 100.0, "diffusivity": 1.0, "insulated": "right" },
///     "first_profile":  { "kind": "parabolic", "curvature": -0.04, "center": 50.0, "peak": 200.0 },
///     "second_profile": { "kind": "uniform", "value": 50.0 },
///     "coupling": { "mode": "weighted", "gamma": 0.8 }
///   },
///   "solver": { "dx": 1.0, "dt": 0.1, "duration": 1000.0 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSetup {
    /// What to simulate
    pub scenario: Scenario,

    /// How to discretize it
    pub solver: SolverConfiguration,
}

impl SimulationSetup {
    /// Pair a scenario with its configuration
    pub fn new(scenario: Scenario, solver: SolverConfiguration) -> Self {
        Self { scenario, solver }
    }

    /// Parse and validate a JSON setup
    ///
    /// # Errors
    ///
    /// - [`DiffusionError::Setup`] on malformed JSON
    /// - any validation error of the scenario or the configuration
    pub fn from_json(json: &str) -> Result<Self, DiffusionError> {
        let setup: SimulationSetup = serde_json::from_str(json)?;
        setup.validate()?;
        Ok(setup)
    }

    /// Serialize to pretty-printed JSON
    ///
    /// Fails with [`DiffusionError::Setup`] if a profile is
    /// [`InitialProfile::Custom`].
    pub fn to_json(&self) -> Result<String, DiffusionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate both halves
    pub fn validate(&self) -> Result<(), DiffusionError> {
        self.scenario.validate()?;
        self.solver.validate()
    }
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SETUP: &str = r#"{
        "scenario": {
            "first":  { "name": "grain 1", "length": 100.0, "diffusivity": 1.0, "insulated": "left" },
            "second": { "name": "grain 2", "length": 100.0, "diffusivity": 1.0, "insulated": "right" },
            "first_profile":  { "kind": "parabolic", "curvature": -0.04, "center": 50.0, "peak": 200.0 },
            "second_profile": { "kind": "uniform", "value": 50.0 }
        },
        "solver": { "dx": 1.0, "dt": 0.1, "duration": 1000.0 }
    }"#;

    #[test]
    fn test_presets() {
        let rods = Scenario::two_rods();
        assert_eq!(rods.coupling, CouplingMode::HandOff);
        assert_eq!(rods.first.insulated, Side::Left);
        assert_eq!(rods.second.insulated, Side::Right);
        assert_eq!(rods.first_profile.evaluate(0.5), 1000.0);
        assert_eq!(rods.second_profile.evaluate(1.5), 800.0);
        assert!(rods.is_stable(&SolverConfiguration::two_rods()));

        let grains = Scenario::two_grains();
        assert_eq!(grains.coupling, CouplingMode::weighted(0.8));
        assert_eq!(grains.junction_position(), 100.0);
        assert_eq!(grains.total_length(), 200.0);
        assert_eq!(grains.first_profile.evaluate(0.0), 100.0);
    }

    #[test]
    fn test_validation_propagates() {
        let mut scenario = Scenario::two_grains();
        scenario.second.diffusivity = -1.0;
        assert!(scenario.validate().is_err());

        let scenario = Scenario::two_grains().with_coupling(CouplingMode::weighted(-0.8));
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn test_junction_sides_must_face_each_other() {
        let mut scenario = Scenario::two_rods();
        scenario.first.insulated = Side::Right;
        match scenario.validate() {
            Err(DiffusionError::MisplacedJunction { segment, insulated }) => {
                assert_eq!(segment, "rod 1");
                assert_eq!(insulated, Side::Right);
            }
            other => panic!("expected MisplacedJunction, got {:?}", other),
        }

        let mut scenario = Scenario::two_rods();
        scenario.second.insulated = Side::Left;
        assert!(matches!(
            scenario.validate(),
            Err(DiffusionError::MisplacedJunction { segment, .. }) if segment == "rod 2"
        ));
    }

    #[test]
    fn test_is_stable() {
        let scenario = Scenario::two_grains();
        assert!(scenario.is_stable(&SolverConfiguration::new(1.0, 0.5, 10.0)));
        assert!(!scenario.is_stable(&SolverConfiguration::new(1.0, 0.6, 10.0)));
    }

    #[test]
    fn test_setup_from_json() {
        let setup = SimulationSetup::from_json(SETUP).unwrap();

        // coupling omitted falls back to the default
        assert_eq!(setup.scenario.coupling, CouplingMode::weighted(0.8));
        assert_eq!(setup.scenario.second_profile.evaluate(120.0), 50.0);
        assert_eq!(setup.solver.time_steps(), 10001);
    }

    #[test]
    fn test_setup_rejects_invalid() {
        let invalid = SETUP.replace(r#""dt": 0.1"#, r#""dt": 0.0"#);
        assert!(matches!(
            SimulationSetup::from_json(&invalid),
            Err(DiffusionError::InvalidParameter { parameter: "dt", .. })
        ));

        assert!(matches!(
            SimulationSetup::from_json("{ not json"),
            Err(DiffusionError::Setup(_))
        ));
    }

    #[test]
    fn test_setup_round_trip() {
        let setup = SimulationSetup::new(Scenario::two_rods(), SolverConfiguration::two_rods());
        let json = setup.to_json().unwrap();
        let parsed = SimulationSetup::from_json(&json).unwrap();

        assert_eq!(parsed.scenario.coupling, CouplingMode::HandOff);
        assert_eq!(parsed.solver, SolverConfiguration::two_rods());
    }

    #[test]
    fn test_custom_profile_not_serializable() {
        let mut scenario = Scenario::two_rods();
        scenario.first_profile = InitialProfile::custom(|x| x);

        let setup = SimulationSetup::new(scenario, SolverConfiguration::two_rods());
        assert!(matches!(setup.to_json(), Err(DiffusionError::Setup(_))));
    }
}
