//! Common utilities for integration tests

pub mod helpers;

// Re-export commonly used items
pub use helpers::{fast_config, junction_values, spread, unit_rods};
