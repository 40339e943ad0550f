//! Insulated (zero-flux) free ends
//!
//! The end of a segment away from the junction is insulated by mirroring:
//! the end node of the next row takes the value of its interior neighbour in
//! the **current** row.
//!
//! ```text
//! left free end:   next[0]   = current[1]
//! right free end:  next[N-1] = current[N-2]
//! ```
//!
//! Which end is free is a per-segment choice ([`Side`](crate::physics::Side)).

use ndarray::{ArrayView1, ArrayViewMut1};

use crate::physics::Segment;

/// Write the insulated end node of `segment` into `next`
///
/// `current` and `next` are rows `n` and `n + 1` of the segment's history.
#[inline]
pub fn apply_insulated(segment: &Segment, current: ArrayView1<'_, f64>, mut next: ArrayViewMut1<'_, f64>) {
    next[segment.free_index()] = current[segment.free_neighbor_index()];
}
