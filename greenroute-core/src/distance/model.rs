//! Distance models mapping stops onto a cost matrix.

use geo::{Distance, Haversine};

use super::error::DistanceMatrixError;
use super::matrix::{Cost, DistanceMatrix};
use crate::Stop;

/// Multiplier applied to straight-line distances in degrees.
pub const EUCLIDEAN_SCALE: f64 = 100_000.0;

/// Multiplier applied to great-circle distances in metres (centimetre costs).
pub const HAVERSINE_SCALE: f64 = 100.0;

/// Build a [`DistanceMatrix`] for a set of stops.
///
/// Implementers must return a square `n×n` matrix where `n == stops.len()`,
/// symmetric, with zeros on the diagonal. An empty slice yields an empty
/// matrix rather than an error.
///
/// # Examples
///
/// ```rust
/// use greenroute_core::{DistanceMatrix, DistanceMatrixError, DistanceModel, Stop};
///
/// struct UnitModel;
///
/// impl DistanceModel for UnitModel {
///     fn distance_matrix(&self, stops: &[Stop]) -> Result<DistanceMatrix, DistanceMatrixError> {
///         Ok(DistanceMatrix::from_fn(stops.len(), |_, _| 1))
///     }
/// }
///
/// let matrix = UnitModel.distance_matrix(&[Stop::new(0.0, 0.0), Stop::new(1.0, 1.0)])?;
/// assert_eq!(matrix.get(0, 1), Some(1));
/// # Ok::<(), DistanceMatrixError>(())
/// ```
pub trait DistanceModel {
    /// Return the cost matrix for `stops`.
    ///
    /// # Errors
    /// Returns [`DistanceMatrixError`] when the model cannot produce a valid
    /// matrix for the supplied stops.
    fn distance_matrix(&self, stops: &[Stop]) -> Result<DistanceMatrix, DistanceMatrixError>;
}

/// Built-in straight-line distance models.
///
/// # Examples
/// ```
/// use greenroute_core::{DistanceMetric, Stop};
///
/// let cost = DistanceMetric::Euclidean.cost(&Stop::new(0.0, 0.0), &Stop::new(3.0, 4.0));
/// assert_eq!(cost, 500_000);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum DistanceMetric {
    /// Planar distance on raw latitude/longitude degrees, scaled by
    /// [`EUCLIDEAN_SCALE`].
    #[default]
    Euclidean,
    /// Great-circle distance in metres, scaled by [`HAVERSINE_SCALE`].
    Haversine,
}

impl DistanceMetric {
    /// Factor applied before truncating a distance to a [`Cost`].
    #[must_use]
    pub const fn scale(self) -> f64 {
        match self {
            Self::Euclidean => EUCLIDEAN_SCALE,
            Self::Haversine => HAVERSINE_SCALE,
        }
    }

    /// Unscaled distance between two stops, in degrees or metres.
    #[must_use]
    pub fn distance(self, from: &Stop, to: &Stop) -> f64 {
        match self {
            Self::Euclidean => {
                let delta = from.coord() - to.coord();
                delta.x.hypot(delta.y)
            }
            Self::Haversine => Haversine.distance(from.point(), to.point()),
        }
    }

    /// Scaled and truncated distance between two stops.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "costs are distances scaled then truncated toward zero; non-finite values saturate"
    )]
    pub fn cost(self, from: &Stop, to: &Stop) -> Cost {
        (self.distance(from, to) * self.scale()) as Cost
    }

    /// Convert a cost back into the metric's natural unit.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "reporting helper; precision loss only beyond 2^53 scaled units"
    )]
    pub fn unscale(self, cost: Cost) -> f64 {
        cost as f64 / self.scale()
    }
}

impl DistanceModel for DistanceMetric {
    fn distance_matrix(&self, stops: &[Stop]) -> Result<DistanceMatrix, DistanceMatrixError> {
        let metric = *self;
        Ok(DistanceMatrix::from_fn(stops.len(), |from, to| {
            match (stops.get(from), stops.get(to)) {
                (Some(a), Some(b)) => metric.cost(a, b),
                _ => 0,
            }
        }))
    }
}
