//! Test-only helpers shared by unit, property and behaviour tests.

use std::cell::Cell;

use crate::{Budget, Cost, DistanceMatrix, DistanceMatrixError, DistanceModel, Stop};

/// Build stops from `(latitude, longitude)` pairs.
///
/// # Examples
/// ```rust
/// use greenroute_core::test_support::stops;
///
/// let stops = stops(&[(0.0, 0.0), (0.0, 10.0)]);
/// assert_eq!(stops.len(), 2);
/// assert_eq!(stops[1].longitude, 10.0);
/// ```
#[must_use]
pub fn stops(pairs: &[(f64, f64)]) -> Vec<Stop> {
    pairs
        .iter()
        .map(|&(latitude, longitude)| Stop::new(latitude, longitude))
        .collect()
}

/// Corners of a 10-degree square, visited anticlockwise from the origin.
#[must_use]
pub fn square_stops() -> Vec<Stop> {
    stops(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)])
}

/// A [`DistanceModel`] returning a caller-supplied matrix verbatim.
///
/// Requests whose stop count differs from the matrix dimension fail with
/// [`DistanceMatrixError::DimensionMismatch`].
#[derive(Debug, Clone)]
pub struct FixedMatrixModel {
    matrix: DistanceMatrix,
}

impl FixedMatrixModel {
    /// Wrap a pre-built matrix.
    #[must_use]
    pub const fn new(matrix: DistanceMatrix) -> Self {
        Self { matrix }
    }

    /// Build from explicit rows.
    ///
    /// # Errors
    /// Returns [`DistanceMatrixError`] when the rows are not a valid matrix.
    pub fn from_rows(rows: Vec<Vec<Cost>>) -> Result<Self, DistanceMatrixError> {
        DistanceMatrix::from_rows(rows).map(Self::new)
    }
}

impl DistanceModel for FixedMatrixModel {
    fn distance_matrix(&self, stops: &[Stop]) -> Result<DistanceMatrix, DistanceMatrixError> {
        if stops.len() != self.matrix.len() {
            return Err(DistanceMatrixError::DimensionMismatch {
                stops: stops.len(),
                matrix: self.matrix.len(),
            });
        }
        Ok(self.matrix.clone())
    }
}

/// Deterministic [`Budget`] allowing a fixed number of polls.
///
/// Each call to [`Budget::is_exhausted`] spends one unit, so runs with the
/// same allowance stop at exactly the same candidate regardless of machine
/// speed.
#[derive(Debug, Default)]
pub struct EvaluationBudget {
    allowance: u64,
    spent: Cell<u64>,
}

impl EvaluationBudget {
    /// Allow `allowance` polls before reporting exhaustion.
    #[must_use]
    pub const fn new(allowance: u64) -> Self {
        Self {
            allowance,
            spent: Cell::new(0),
        }
    }

    /// A budget that never runs out.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self::new(u64::MAX)
    }

    /// Polls answered so far.
    #[must_use]
    pub fn spent(&self) -> u64 {
        self.spent.get()
    }
}

impl Budget for EvaluationBudget {
    fn is_exhausted(&self) -> bool {
        let spent = self.spent.get();
        if spent >= self.allowance {
            return true;
        }
        self.spent.set(spent + 1);
        false
    }
}
