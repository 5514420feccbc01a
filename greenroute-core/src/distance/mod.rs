//! Turn stop coordinates into pairwise travel costs.
//!
//! The [`DistanceModel`] trait abstracts how a slice of [`Stop`](crate::Stop)
//! values becomes a symmetric [`DistanceMatrix`] of integer costs. The default
//! model, [`DistanceMetric::Euclidean`], measures straight lines on raw
//! degree values and scales them by `1e5` before truncating.

mod error;
mod matrix;
mod model;

pub use error::DistanceMatrixError;
pub use matrix::{Cost, DistanceMatrix};
pub use model::{DistanceMetric, DistanceModel, EUCLIDEAN_SCALE, HAVERSINE_SCALE};
