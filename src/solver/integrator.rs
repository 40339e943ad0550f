//! Time-integration driver
//!
//! The [`Integrator`] owns both field histories for the duration of a run
//! and advances them one row at a time. It is a two-state machine:
//!
//! ```text
//!            step()                      step()
//!   ┌──────────────────┐   row = Nt-1   ┌──────┐
//!   │     RUNNING      │ ─────────────▶ │ DONE │ ◀─┐ (no-op)
//!   └──────────────────┘                └──────┘ ──┘
//! ```
//!
//! One step from row `n` to row `n + 1`:
//!
//! 1. interior update of both segments from row `n`
//! 2. insulated free ends of both segments, reading row `n`
//! 3. both junction nodes of row `n + 1`
//!
//! The number of steps, `Nt - 1`, is fixed when the integrator is built.

use log::{debug, info, trace};

use crate::error::DiffusionError;
use crate::physics::{concatenate_coordinates, concatenate_fields, FieldHistory, Segment};
use crate::solver::{
    apply_insulated, step_interior, CouplingMode, Scenario, SimulationResult, SolverConfiguration,
};

/// Upper bound on stored field values, `Nt · (N1 + N2)`, about 4 GB of `f64`
pub const MAX_FIELD_VALUES: usize = 500_000_000;

/// State of the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Rows remain to be computed
    Running,
    /// The last row has been written
    Done,
}

/// Stepwise driver of a two-segment run
///
/// # Example
///
/// ```rust
/// use grain_rs::solver::{Integrator, Phase, Scenario, SolverConfiguration};
///
/// let config = SolverConfiguration::two_grains().with_duration(1.0);
/// let mut integrator = Integrator::new(&Scenario::two_grains(), &config)?;
///
/// assert_eq!(integrator.phase(), Phase::Running);
/// integrator.step();
/// assert_eq!(integrator.row(), 1);
///
/// integrator.run();
/// assert_eq!(integrator.phase(), Phase::Done);
/// assert_eq!(integrator.row(), 10);
///
/// let result = integrator.into_result()?;
/// assert_eq!(result.time_steps, 11);
/// # Ok::<(), grain_rs::error::DiffusionError>(())
/// ```
#[derive(Debug)]
pub struct Integrator {
    first: Segment,
    second: Segment,
    first_field: FieldHistory,
    second_field: FieldHistory,
    coupling: CouplingMode,
    config: SolverConfiguration,
    fourier: [f64; 2],
    time_steps: usize,
    row: usize,
    progress_stride: usize,
}

impl Integrator {
    /// Validate, discretize both segments and fill row 0
    ///
    /// # Errors
    ///
    /// Any validation error of `scenario` or `config`,
    /// [`DiffusionError::TooFewNodes`] if a segment is shorter than `2·dx`,
    /// or [`DiffusionError::InvalidParameter`] on `dt` if the field would
    /// hold more than [`MAX_FIELD_VALUES`] values.
    /// Nothing is allocated when validation fails.
    pub fn new(scenario: &Scenario, config: &SolverConfiguration) -> Result<Self, DiffusionError> {
        config.validate()?;
        scenario.validate()?;

        let first = Segment::discretize(&scenario.first, config.dx, 0.0)?;
        let second = Segment::discretize(&scenario.second, config.dx, scenario.junction_position())?;

        let time_steps = config.time_steps();
        let values = time_steps.checked_mul(first.nodes() + second.nodes());
        if values.is_none_or(|values| values > MAX_FIELD_VALUES) {
            return Err(DiffusionError::invalid(
                "dt",
                config.dt,
                "too small for the grid, the field would not fit in memory",
            ));
        }

        let first_field =
            FieldHistory::initialize(&scenario.first_profile, first.grid().coordinates(), time_steps);
        let second_field =
            FieldHistory::initialize(&scenario.second_profile, second.grid().coordinates(), time_steps);

        let fourier = [
            config.fourier_number(first.diffusivity()),
            config.fourier_number(second.diffusivity()),
        ];
        debug!("Fourier numbers: {} = {}, {} = {}", first.name(), fourier[0], second.name(), fourier[1]);
        if !scenario.is_stable(config) {
            debug!("Fourier number above 0.5, the explicit scheme will not be stable");
        }

        Ok(Self {
            first,
            second,
            first_field,
            second_field,
            coupling: scenario.coupling,
            config: *config,
            fourier,
            time_steps,
            row: 0,
            progress_stride: (time_steps / 10).max(1),
        })
    }

    /// Current state
    pub fn phase(&self) -> Phase {
        if self.row + 1 >= self.time_steps {
            Phase::Done
        } else {
            Phase::Running
        }
    }

    /// Index of the last computed row
    pub fn row(&self) -> usize {
        self.row
    }

    /// Simulated time of the last computed row, `row · dt`
    pub fn time(&self) -> f64 {
        self.row as f64 * self.config.dt
    }

    /// Row count `Nt`
    pub fn time_steps(&self) -> usize {
        self.time_steps
    }

    /// The two discretized segments
    pub fn segments(&self) -> (&Segment, &Segment) {
        (&self.first, &self.second)
    }

    /// The two field histories; rows past [`row()`](Self::row) are still zero
    pub fn fields(&self) -> (&FieldHistory, &FieldHistory) {
        (&self.first_field, &self.second_field)
    }

    /// Compute the next row and return the new state
    ///
    /// Does nothing once [`Phase::Done`] is reached.
    pub fn step(&mut self) -> Phase {
        if self.phase() == Phase::Done {
            return Phase::Done;
        }

        let n = self.row;
        let (current_first, mut next_first) = self.first_field.step_rows(n);
        let (current_second, mut next_second) = self.second_field.step_rows(n);

        step_interior(current_first.view(), next_first.view_mut(), self.fourier[0]);
        step_interior(current_second.view(), next_second.view_mut(), self.fourier[1]);

        apply_insulated(&self.first, current_first.view(), next_first.view_mut());
        apply_insulated(&self.second, current_second.view(), next_second.view_mut());

        let near_first = self.first.near_junction_index();
        let near_second = self.second.near_junction_index();
        let (junction_first, junction_second) = self.coupling.junction_values(
            self.first.diffusivity(),
            (current_first[near_first], current_second[near_second]),
            (next_first[near_first], next_second[near_second]),
        );
        next_first[self.first.junction_index()] = junction_first;
        next_second[self.second.junction_index()] = junction_second;

        self.row += 1;
        if self.row % self.progress_stride == 0 {
            trace!("row {}/{} (t = {})", self.row, self.time_steps - 1, self.time());
        }

        self.phase()
    }

    /// Step until [`Phase::Done`]
    pub fn run(&mut self) {
        while self.step() == Phase::Running {}
    }

    /// Finish the run and concatenate both histories
    ///
    /// Remaining rows are computed first. The result carries the metadata
    /// `dx`, `dt`, `duration`, `time steps` and `coupling`.
    pub fn into_result(mut self) -> Result<SimulationResult, DiffusionError> {
        self.run();

        let field = concatenate_fields(&self.first_field, &self.second_field)?;
        let coordinates =
            concatenate_coordinates(self.first.grid().coordinates(), self.second.grid().coordinates());

        let mut result = SimulationResult::new(
            field,
            coordinates,
            self.config.duration,
            [self.first.nodes(), self.second.nodes()],
        )?;

        result.add_metadata("dx", &self.config.dx.to_string());
        result.add_metadata("dt", &self.config.dt.to_string());
        result.add_metadata("duration", &self.config.duration.to_string());
        result.add_metadata("time steps", &self.time_steps.to_string());
        result.add_metadata("coupling", &self.coupling.to_string());

        info!(
            "run finished: {} rows, {} + {} nodes",
            self.time_steps,
            self.first.nodes(),
            self.second.nodes()
        );

        Ok(result)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{InitialProfile, SegmentConfig, Side};
    use approx::assert_relative_eq;

    fn small_scenario(coupling: CouplingMode) -> Scenario {
        Scenario::new(
            SegmentConfig::new("one", 1.0, 1.0, Side::Left),
            SegmentConfig::new("two", 1.0, 1.0, Side::Right),
            InitialProfile::parabolic(-800.0, 0.5, 1000.0),
            InitialProfile::parabolic(-400.0, 1.5, 800.0),
        )
        .with_coupling(coupling)
    }

    fn small_config() -> SolverConfiguration {
        SolverConfiguration::new(0.1, 0.004, 0.04)
    }

    #[test]
    fn test_state_machine() {
        let mut integrator = Integrator::new(&small_scenario(CouplingMode::default()), &small_config()).unwrap();

        assert_eq!(integrator.time_steps(), 11);
        assert_eq!(integrator.row(), 0);
        assert_eq!(integrator.time(), 0.0);

        for _ in 0..9 {
            assert_eq!(integrator.step(), Phase::Running);
        }
        assert_eq!(integrator.step(), Phase::Done);
        assert_eq!(integrator.row(), 10);
        assert_relative_eq!(integrator.time(), 0.04, epsilon = 1e-15);

        // no-op once done
        assert_eq!(integrator.step(), Phase::Done);
        assert_eq!(integrator.row(), 10);
    }

    #[test]
    fn test_single_row_is_done_immediately() {
        let config = SolverConfiguration::new(0.1, 1.0, 0.5);
        let integrator = Integrator::new(&small_scenario(CouplingMode::HandOff), &config).unwrap();

        assert_eq!(integrator.phase(), Phase::Done);
        let result = integrator.into_result().unwrap();
        assert_eq!(result.shape(), (1, 22));
    }

    #[test]
    fn test_oversized_field_is_rejected() {
        // 1e8 + 1 rows of 22 nodes, each bound alone is met
        let config = SolverConfiguration::new(0.1, 1.0e-8, 1.0);
        assert!(config.validate().is_ok());
        assert!((config.time_steps() as u128) * 22 > MAX_FIELD_VALUES as u128);

        match Integrator::new(&small_scenario(CouplingMode::HandOff), &config) {
            Err(DiffusionError::InvalidParameter { parameter, reason, .. }) => {
                assert_eq!(parameter, "dt");
                assert!(reason.contains("memory"));
            }
            other => panic!("expected InvalidParameter, got {:?}", other.map(|i| i.time_steps())),
        }
    }

    #[test]
    fn test_first_step_by_hand() {
        let mut integrator = Integrator::new(&small_scenario(CouplingMode::weighted(0.8)), &small_config()).unwrap();
        integrator.step();

        let (first, second) = integrator.fields();
        let (row0_first, row1_first) = (first.row(0), first.row(1));
        let (row0_second, row1_second) = (second.row(0), second.row(1));
        let r = small_config().fourier_number(1.0);

        // interior
        for i in 1..10 {
            let expected = row0_first[i] + r * (row0_first[i + 1] - 2.0 * row0_first[i] + row0_first[i - 1]);
            assert_eq!(row1_first[i], expected);
        }

        // insulated ends read row 0
        assert_eq!(row1_first[0], row0_first[1]);
        assert_eq!(row1_second[10], row0_second[9]);

        // junction reads row 1
        let flux = row1_first[9] + row1_second[1];
        assert_relative_eq!(row1_first[10], flux / 1.8, epsilon = 1e-12);
        assert_relative_eq!(row1_second[0], flux / 2.25, epsilon = 1e-12);
    }

    #[test]
    fn test_hand_off_step() {
        let mut integrator = Integrator::new(&small_scenario(CouplingMode::HandOff), &small_config()).unwrap();
        integrator.step();

        let (first, second) = integrator.fields();
        assert_eq!(first.row(1)[10], second.row(0)[1]);
        assert_eq!(second.row(1)[0], first.row(0)[9]);
    }

    #[test]
    fn test_into_result_completes_run() {
        let integrator = Integrator::new(&small_scenario(CouplingMode::HandOff), &small_config()).unwrap();
        let result = integrator.into_result().unwrap();

        assert_eq!(result.shape(), (11, 22));
        assert!(result.final_profile().iter().all(|v| *v != 0.0));
        assert_eq!(result.metadata("time steps"), Some("11"));
        assert_eq!(result.metadata("coupling"), Some("hand-off"));
        assert_eq!(result.coordinates[10], 1.0);
        assert_eq!(result.coordinates[11], 1.0);
    }

    #[test]
    fn test_rejects_invalid_before_allocation() {
        let config = SolverConfiguration::new(0.6, 0.004, 0.04);
        assert!(matches!(
            Integrator::new(&small_scenario(CouplingMode::HandOff), &config),
            Err(DiffusionError::TooFewNodes { .. })
        ));
    }
}
