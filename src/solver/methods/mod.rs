//! Numerical methods
//!
//! Concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! # Available Methods
//!
//! - **[`ExplicitSolver`]**: forward-time central-space scheme
//!   - Order: first order in time, second order in space
//!   - Stability: `α·dt/dx² <= 0.5` in both segments
//!
//! All methods share the [`Integrator`](crate::solver::Integrator) step
//! ordering (interior, free ends, junction) and only differ in how the
//! interior is advanced.

mod ftcs;

pub use ftcs::ExplicitSolver;
