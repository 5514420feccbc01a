//! Facade crate for the greenroute route optimiser.
//!
//! This crate re-exports the core domain types and exposes the local search
//! solver behind the `solver-local` feature flag.
//!
//! # Examples
//! ```
//! # #[cfg(feature = "solver-local")]
//! # {
//! use std::time::Duration;
//! use greenroute::{Stop, solve};
//!
//! let stops = [Stop::new(0.0, 0.0), Stop::new(0.0, 3.0), Stop::new(0.0, 1.0)];
//! assert_eq!(solve(&stops, Duration::from_millis(100))?, vec![0, 2, 1]);
//! # }
//! # Ok::<(), greenroute::SolveError>(())
//! ```

#![forbid(unsafe_code)]

pub use greenroute_core::{
    Budget, Cost, DEFAULT_TIME_LIMIT, Diagnostics, DistanceMatrix, DistanceMatrixError,
    DistanceMetric, DistanceModel, InfeasibleTour, SearchBudget, SolveError, SolveRequest,
    SolveRequestValidationError, SolveResponse, Solver, Stop, Termination, Tour, TourError,
    MAX_LATITUDE, MAX_LONGITUDE,
};

#[cfg(feature = "solver-local")]
pub use greenroute_solver::{LocalSearchConfig, LocalSearchSolver, solve};
