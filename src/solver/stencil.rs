//! Interior stencil
//!
//! Forward-time central-space update of every interior node `1 ≤ i ≤ N-2`:
//!
//! ```text
//! next[i] = cur[i] + r · (cur[i+1] - 2·cur[i] + cur[i-1]),    r = α·dt/dx²
//! ```
//!
//! The end nodes of `next` are left untouched; they belong to the boundary
//! applicator and the junction coupler.
//!
//! The update of one node reads only the current row, so nodes are
//! independent. With the `parallel` feature, segments wider than
//! [`parallel_threshold()`](crate::solver::parallel_threshold) are updated
//! through rayon. Each node runs the same arithmetic either way, so results
//! are bit-identical.

use ndarray::{s, ArrayView1, ArrayViewMut1, Zip};

/// Apply the interior update with Fourier number `r`
///
/// `current` and `next` must have the same length, at least 3.
///
/// # Example
///
/// ```rust
/// use grain_rs::solver::step_interior;
/// use ndarray::{array, Array1};
///
/// let current = array![0.0, 0.0, 1.0, 0.0, 0.0];
/// let mut next = Array1::zeros(5);
///
/// step_interior(current.view(), next.view_mut(), 0.25);
///
/// assert_eq!(next.to_vec(), vec![0.0, 0.25, 0.5, 0.25, 0.0]);
/// ```
pub fn step_interior(current: ArrayView1<'_, f64>, mut next: ArrayViewMut1<'_, f64>, r: f64) {
    let n = current.len();
    debug_assert_eq!(n, next.len());
    debug_assert!(n >= 3);

    let update = move |next: &mut f64, &left: &f64, &centre: &f64, &right: &f64| {
        *next = centre + r * (right - 2.0 * centre + left);
    };

    let zip = Zip::from(next.slice_mut(s![1..n - 1]))
        .and(current.slice(s![..n - 2]))
        .and(current.slice(s![1..n - 1]))
        .and(current.slice(s![2..]));

    #[cfg(feature = "parallel")]
    if n > crate::solver::parallel_threshold() {
        zip.par_for_each(update);
        return;
    }

    zip.for_each(update);
}
