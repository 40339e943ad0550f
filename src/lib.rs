//! grain-rs: two-segment diffusion simulation
//!
//! Explicit finite-difference simulation of 1-D diffusion across two
//! coupled segments (two grains exchanging an element, two rods exchanging
//! heat). Each segment has its own length and diffusivity, one insulated
//! outer end, and meets the other segment at a junction whose two nodes are
//! set by a coupling rule.
//!
//! # Architecture
//!
//! grain-rs is built on the separation of WHAT and HOW:
//!
//! 1. **Physics** ([`physics`]): segments, grids, initial profiles and the
//!    time-by-space field histories
//! 2. **Solver** ([`solver`]): the scenario (WHAT), the discretization
//!    (HOW), the stepping machinery and the solvers
//! 3. **Output** ([`output`]): CSV export and plots of a finished run
//!
//! # Quick Start
//!
//! ```rust
//! use grain_rs::prelude::*;
//!
//! // 1. Two grains, weighted junction with γ = 0.8
//! let scenario = Scenario::two_grains();
//!
//! // 2. dx = 1, dt = 0.1, shortened run
//! let config = SolverConfiguration::two_grains().with_duration(100.0);
//!
//! // 3. Run
//! let result = ExplicitSolver::new().solve(&scenario, &config)?;
//!
//! // 4. Inspect
//! assert_eq!(result.shape(), (1001, 202));
//! let profile = result.final_profile();
//! assert!(profile.iter().all(|c| c.is_finite()));
//! # Ok::<(), DiffusionError>(())
//! ```
//!
//! # Modules
//!
//! - [`error`]: error taxonomy
//! - [`physics`]: segments, profiles, fields
//! - [`solver`]: scenarios, configuration, integrator, solvers
//! - [`output`]: export and visualization
//!
//! # Features
//!
//! - `plotting` (default): SVG plots through plotters
//! - `ttf`: PNG plots, with system fonts for the labels
//! - `parallel`: rayon-backed interior update for wide segments

pub mod error;
pub mod physics;
pub mod solver;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use grain_rs::prelude::*;
    //! ```
    pub use crate::error::DiffusionError;
    pub use crate::physics::{InitialProfile, SegmentConfig, Side};
    pub use crate::solver::{
        CouplingMode,
        ExplicitSolver,
        Integrator,
        Phase,
        Scenario,
        SimulationResult,
        SimulationSetup,
        Solver,
        SolverConfiguration,
    };
}
