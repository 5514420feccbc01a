//! Solve requests, responses and the [`Solver`] trait.

use std::time::Duration;

use thiserror::Error;

use crate::{Cost, DistanceMatrixError, Stop, Tour, TourError};

/// Search budget used when a request does not name one.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(2);

/// Parameters for a route optimisation.
///
/// On the wire the stops travel as `coords` and the limit as
/// `time_limit_ms`, which may be omitted.
///
/// # Examples
/// ```rust
/// use std::time::Duration;
/// use greenroute_core::{SolveRequest, Stop};
///
/// let request = SolveRequest::new(vec![Stop::new(0.0, 0.0), Stop::new(0.0, 1.0)]);
/// assert_eq!(request.time_limit, Duration::from_secs(2));
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveRequest {
    /// Stops to visit; index 0 is the depot.
    #[cfg_attr(feature = "serde", serde(rename = "coords"))]
    pub stops: Vec<Stop>,
    /// Wall-clock budget for the search.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "time_limit_ms",
            with = "time_limit_millis",
            default = "default_time_limit"
        )
    )]
    pub time_limit: Duration,
}

impl SolveRequest {
    /// Build a request with the [`DEFAULT_TIME_LIMIT`].
    #[must_use]
    pub const fn new(stops: Vec<Stop>) -> Self {
        Self {
            stops,
            time_limit: DEFAULT_TIME_LIMIT,
        }
    }

    /// Replace the time limit.
    #[must_use]
    pub fn with_time_limit(self, time_limit: Duration) -> Self {
        Self { time_limit, ..self }
    }

    /// Whether the request is small enough to need no search.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.stops.len() < 2
    }

    /// Check the request, collapsing failures into [`SolveError`].
    ///
    /// # Errors
    /// Returns [`SolveError::InvalidInput`] when validation fails.
    pub fn validate(&self) -> Result<(), SolveError> {
        self.validate_detailed().map_err(SolveError::from)
    }

    /// Check the request and report which rule failed.
    ///
    /// # Errors
    /// Returns [`SolveRequestValidationError`] for a zero time limit, a stop
    /// with a non-finite coordinate, or a stop off the globe.
    pub fn validate_detailed(&self) -> Result<(), SolveRequestValidationError> {
        if self.time_limit.is_zero() {
            return Err(SolveRequestValidationError::NonPositiveTimeLimit);
        }
        if let Some(index) = self.stops.iter().position(|stop| !stop.is_finite()) {
            return Err(SolveRequestValidationError::NonFiniteCoordinate { index });
        }
        if let Some(index) = self.stops.iter().position(|stop| !stop.is_in_range()) {
            return Err(SolveRequestValidationError::CoordinateOutOfRange { index });
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
const fn default_time_limit() -> Duration {
    DEFAULT_TIME_LIMIT
}

#[cfg(feature = "serde")]
mod time_limit_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(limit: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Fewer than two stops; no search ran.
    Trivial,
    /// A full pass found no improving move.
    Converged,
    /// The budget ran out first.
    BudgetExhausted,
}

/// Bookkeeping about a solve, for logging and benchmarks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    /// Wall-clock time spent in the solver.
    pub solve_time: Duration,
    /// Cost of the tour before local search.
    pub initial_cost: Cost,
    /// Number of candidate moves evaluated.
    pub candidates_evaluated: u64,
    /// Number of improving moves applied.
    pub moves_applied: u64,
    /// Why the search stopped.
    pub termination: Termination,
}

impl Diagnostics {
    /// Diagnostics for a request that needed no search.
    #[must_use]
    pub const fn trivial(solve_time: Duration) -> Self {
        Self {
            solve_time,
            initial_cost: 0,
            candidates_evaluated: 0,
            moves_applied: 0,
            termination: Termination::Trivial,
        }
    }
}

/// Response from a successful solve.
///
/// Serialises as `{"route": [...], "cost": n}`; diagnostics stay in-process.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SolveResponse {
    /// Stop indices in visiting order.
    pub route: Tour,
    /// Open-tour cost of `route` in matrix units.
    pub cost: Cost,
    /// How the search went.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub diagnostics: Diagnostics,
}

/// Reasons a request was rejected before any search began.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveRequestValidationError {
    /// The time limit was zero.
    #[error("time limit must be positive")]
    NonPositiveTimeLimit,
    /// A stop had a NaN or infinite coordinate.
    #[error("stop {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending stop.
        index: usize,
    },
    /// A stop had a latitude beyond ±90 or a longitude beyond ±180 degrees.
    #[error("stop {index} lies outside latitude [-90, 90] or longitude [-180, 180]")]
    CoordinateOutOfRange {
        /// Index of the offending stop.
        index: usize,
    },
}

/// Internal invariant violations that left no usable tour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InfeasibleTour {
    /// The constructed or improved order was not a valid tour.
    #[error(transparent)]
    Tour(#[from] TourError),
    /// The distance model returned an unusable matrix.
    #[error(transparent)]
    Matrix(#[from] DistanceMatrixError),
}

/// Errors returned by [`Solver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Request parameters were invalid, e.g. a zero time limit.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] SolveRequestValidationError),
    /// No valid tour could be produced.
    #[error("no feasible tour: {0}")]
    NoFeasibleTour(#[from] InfeasibleTour),
}

impl From<TourError> for SolveError {
    fn from(err: TourError) -> Self {
        Self::NoFeasibleTour(err.into())
    }
}

impl From<DistanceMatrixError> for SolveError {
    fn from(err: DistanceMatrixError) -> Self {
        Self::NoFeasibleTour(err.into())
    }
}

/// Order a day's stops for a single crew.
///
/// Implementations should return [`SolveError::InvalidInput`] for invalid
/// parameters rather than panicking, and must hand back a permutation of
/// every stop index starting at 0.
/// Solvers must be `Send + Sync` to operate safely across threads.
pub trait Solver: Send + Sync {
    /// Solve a request, producing a visiting order or an error.
    ///
    /// # Errors
    /// Returns [`SolveError`] when the request is invalid or no tour could be
    /// produced.
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError>;
}
