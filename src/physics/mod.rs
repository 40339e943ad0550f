//! Physical description of the two-grain system
//!
//! This module holds everything that describes WHAT is simulated,
//! independently of the time-stepping scheme:
//!
//! - **Segments** ([`SegmentConfig`], [`Segment`]): length, diffusivity,
//!   insulated end, and the spatial grid derived from the shared step `dx`
//! - **Initial profiles** ([`InitialProfile`]): field value at `t = 0` as a
//!   function of position
//! - **Field histories** ([`FieldHistory`]): the dense time-by-space arrays
//!   the integrator fills row by row
//!
//! # Combined domain
//!
//! The second segment's coordinates continue from the end of the first one.
//! The junction position therefore appears twice, once as the last node of
//! the left segment and once as the first node of the right segment:
//!
//! ```text
//!   segment 1                        segment 2
//!   o──o──o── ... ──o──o             o──o── ... ──o──o──o
//!   0                  L1            L1                L1 + L2
//! ```
//!
//! # Example
//!
//! ```rust
//! use grain_rs::physics::{FieldHistory, InitialProfile, Segment, SegmentConfig, Side};
//!
//! let rod = SegmentConfig::new("rod 1", 1.0, 0.01, Side::Left);
//! let segment = Segment::discretize(&rod, 0.1, 0.0).unwrap();
//!
//! let history = FieldHistory::initialize(
//!     &InitialProfile::parabolic(-800.0, 0.5, 1000.0),
//!     segment.grid().coordinates(),
//!     11,
//! );
//!
//! assert_eq!(history.shape(), (11, 11));
//! ```

pub mod field;
pub mod profile;
pub mod segment;

pub use field::{concatenate_coordinates, concatenate_fields, FieldHistory};
pub use profile::{InitialProfile, ProfileFn};
pub use segment::{node_count, Segment, SegmentConfig, Side, SpatialGrid};
