//! Helper functions for integration tests

use grain_rs::physics::{InitialProfile, SegmentConfig, Side};
use grain_rs::solver::{CouplingMode, Scenario, SimulationResult, SolverConfiguration};

/// Two unit rods with α = 1 and the two-rods initial caps
///
/// 11 nodes per segment at `dx = 0.1`.
pub fn unit_rods(coupling: CouplingMode) -> Scenario {
    Scenario::new(
        SegmentConfig::new("rod 1", 1.0, 1.0, Side::Left),
        SegmentConfig::new("rod 2", 1.0, 1.0, Side::Right),
        InitialProfile::parabolic(-800.0, 0.5, 1000.0),
        InitialProfile::parabolic(-400.0, 1.5, 800.0),
    )
    .with_coupling(coupling)
}

/// `dx = 0.1`, `dt = 0.004` (Fourier number 0.4) over `duration`
pub fn fast_config(duration: f64) -> SolverConfiguration {
    SolverConfiguration::new(0.1, 0.004, duration)
}

/// `(junction_1, junction_2)` of row `n`
pub fn junction_values(result: &SimulationResult, n: usize) -> (f64, f64) {
    let [first, _] = result.segment_nodes;
    let row = result.row(n).expect("row in range");
    (row[first - 1], row[first])
}

/// Max minus min of a slice of values
pub fn spread<'a>(values: impl IntoIterator<Item = &'a f64>) -> f64 {
    let (min, max) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    max - min
}
