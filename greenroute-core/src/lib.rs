//! Core domain types for the greenroute optimiser.
//!
//! The types here describe a single optimisation call: the [`Stop`]s a crew
//! must visit, the [`DistanceMatrix`] built from them, the [`Tour`] being
//! improved and the [`SearchBudget`] bounding the search. Constructors return
//! `Result` so malformed input surfaces before any search starts.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod budget;
pub mod distance;
mod solver;
mod stop;
mod tour;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use budget::{Budget, SearchBudget};
pub use distance::{Cost, DistanceMatrix, DistanceMatrixError, DistanceMetric, DistanceModel};
pub use solver::{
    DEFAULT_TIME_LIMIT, Diagnostics, InfeasibleTour, SolveError, SolveRequest,
    SolveRequestValidationError, SolveResponse, Solver, Termination,
};
pub use stop::{MAX_LATITUDE, MAX_LONGITUDE, Stop};
pub use tour::{Tour, TourError};
