//! Time-by-space field storage
//!
//! A [`FieldHistory`] is the dense `[Nt × N]` array of one segment: row `n`
//! is the field at time `n·dt`, column `i` is node `i`. It is allocated once,
//! at its final size, with row 0 holding the initial condition and every other
//! row zero until the integrator writes it.
//!
//! After the run the two histories are concatenated along the spatial axis
//! into the combined field consumed by export and plotting.

use nalgebra::DVector;
use ndarray::{concatenate, s, Array2, ArrayView1, ArrayView2, ArrayViewMut1, Axis};

use crate::error::DiffusionError;
use crate::physics::InitialProfile;

/// Field values of one segment over the whole schedule
#[derive(Debug, Clone, PartialEq)]
pub struct FieldHistory {
    values: Array2<f64>,
}

impl FieldHistory {
    /// Allocate `rows` rows and fill row 0 from `profile`
    ///
    /// # Example
    ///
    /// ```rust
    /// use grain_rs::physics::{FieldHistory, InitialProfile};
    /// use nalgebra::DVector;
    ///
    /// let x = DVector::from_vec(vec![0.0, 0.5, 1.0]);
    /// let history = FieldHistory::initialize(&InitialProfile::custom(|x| 10.0 * x), &x, 4);
    ///
    /// assert_eq!(history.shape(), (4, 3));
    /// assert_eq!(history.row(0).to_vec(), vec![0.0, 5.0, 10.0]);
    /// assert_eq!(history.row(3).to_vec(), vec![0.0, 0.0, 0.0]);
    /// ```
    pub fn initialize(profile: &InitialProfile, coordinates: &DVector<f64>, rows: usize) -> Self {
        let mut values = Array2::zeros((rows, coordinates.len()));
        values
            .row_mut(0)
            .iter_mut()
            .zip(coordinates.iter())
            .for_each(|(value, &x)| *value = profile.evaluate(x));

        Self { values }
    }

    /// Number of time rows
    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of nodes
    pub fn columns(&self) -> usize {
        self.values.ncols()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Row `n`
    ///
    /// # Panics
    ///
    /// Panics if `n >= rows()`.
    pub fn row(&self, n: usize) -> ArrayView1<'_, f64> {
        self.values.row(n)
    }

    /// Whole history
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Sum of row `n`
    pub fn total(&self, n: usize) -> f64 {
        self.values.row(n).sum()
    }

    /// Consume into the underlying array
    pub fn into_inner(self) -> Array2<f64> {
        self.values
    }

    /// Rows `n` and `n + 1` of one step, borrowed together
    ///
    /// Row `n` is only read by the integrator; it comes back mutable because
    /// both rows are split out of the same array.
    pub(crate) fn step_rows(&mut self, n: usize) -> (ArrayViewMut1<'_, f64>, ArrayViewMut1<'_, f64>) {
        self.values.multi_slice_mut((s![n, ..], s![n + 1, ..]))
    }
}

// =================================================================================================
// Concatenation
// =================================================================================================

/// Join two histories along the spatial axis
///
/// The result has the common row count and `N1 + N2` columns, the first
/// segment's nodes first.
///
/// # Errors
///
/// [`DiffusionError::Shape`] when the row counts differ.
pub fn concatenate_fields(
    first: &FieldHistory,
    second: &FieldHistory,
) -> Result<Array2<f64>, DiffusionError> {
    Ok(concatenate(Axis(1), &[first.view(), second.view()])?)
}

/// Join two coordinate sequences, first then second
pub fn concatenate_coordinates(first: &DVector<f64>, second: &DVector<f64>) -> DVector<f64> {
    DVector::from_iterator(
        first.len() + second.len(),
        first.iter().chain(second.iter()).copied(),
    )
}

// =================================================================================================
// Tests
// =================================================================================================
