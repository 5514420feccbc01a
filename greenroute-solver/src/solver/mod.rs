//! `LocalSearchSolver`: nearest-neighbour construction refined by 2-opt and
//! Or-opt under a wall-clock budget.

use std::time::{Duration, Instant};

use greenroute_core::{
    Budget, Diagnostics, DistanceMatrixError, DistanceMetric, DistanceModel, SearchBudget,
    SolveError, SolveRequest, SolveResponse, Solver, Stop, Tour,
};

use crate::{improve, nearest_neighbour};

/// Configuration for [`LocalSearchSolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSearchConfig {
    /// Run Or-opt once 2-opt stalls.
    pub or_opt: bool,
    /// Longest segment Or-opt will relocate.
    pub max_segment_len: usize,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            or_opt: true,
            max_segment_len: 3,
        }
    }
}

/// Single-crew solver built on a [`DistanceModel`].
///
/// The model defaults to [`DistanceMetric::Euclidean`], which matches the
/// planar costs crews have always been routed with.
///
/// # Examples
/// ```
/// use greenroute_core::{SolveRequest, Solver, Stop};
/// use greenroute_solver::LocalSearchSolver;
///
/// let stops = vec![
///     Stop::new(0.0, 0.0),
///     Stop::new(10.0, 10.0),
///     Stop::new(0.0, 10.0),
///     Stop::new(10.0, 0.0),
/// ];
/// let response = LocalSearchSolver::new().solve(&SolveRequest::new(stops))?;
/// assert_eq!(response.route.as_slice().first(), Some(&0));
/// assert_eq!(response.cost, 3_000_000);
/// # Ok::<(), greenroute_core::SolveError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalSearchSolver<D = DistanceMetric> {
    model: D,
    config: LocalSearchConfig,
}

impl LocalSearchSolver {
    /// Solver over Euclidean costs with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: DistanceModel> LocalSearchSolver<D> {
    /// Solver over `model` with the default configuration.
    #[must_use]
    pub fn with_model(model: D) -> Self {
        Self {
            model,
            config: LocalSearchConfig::default(),
        }
    }

    /// Replace the search configuration.
    #[must_use]
    pub fn with_config(self, config: LocalSearchConfig) -> Self {
        Self { config, ..self }
    }

    /// Search configuration in use.
    #[must_use]
    pub const fn config(&self) -> &LocalSearchConfig {
        &self.config
    }

    /// Order `stops` under an arbitrary budget.
    ///
    /// Unlike [`Solver::solve`] this performs no request validation, which
    /// lets tests drive the search with a deterministic [`Budget`].
    ///
    /// # Errors
    /// Returns [`SolveError::NoFeasibleTour`] if the model produces an
    /// unusable matrix.
    pub fn solve_with_budget<B>(&self, stops: &[Stop], budget: &B) -> Result<SolveResponse, SolveError>
    where
        B: Budget + ?Sized,
    {
        let started_at = Instant::now();
        if stops.len() < 2 {
            return Ok(trivial_response(stops.len(), started_at.elapsed()));
        }

        let matrix = self.model.distance_matrix(stops)?;
        if matrix.len() != stops.len() {
            return Err(DistanceMatrixError::DimensionMismatch {
                stops: stops.len(),
                matrix: matrix.len(),
            }
            .into());
        }

        let mut tour = nearest_neighbour(&matrix)?;
        let initial_cost = tour.cost(&matrix);
        let outcome = improve(&mut tour, &matrix, budget, &self.config)?;
        let route = Tour::for_stops(tour.into_inner(), stops.len())?;
        let cost = route.cost(&matrix);

        let diagnostics = Diagnostics {
            solve_time: started_at.elapsed(),
            initial_cost,
            candidates_evaluated: outcome.candidates_evaluated,
            moves_applied: outcome.moves_applied,
            termination: outcome.termination,
        };
        log::debug!(
            "ordered {} stops: cost {initial_cost} -> {cost} after {} moves ({:?}, {} candidates, {:?})",
            stops.len(),
            diagnostics.moves_applied,
            diagnostics.termination,
            diagnostics.candidates_evaluated,
            diagnostics.solve_time,
        );

        Ok(SolveResponse {
            route,
            cost,
            diagnostics,
        })
    }
}

impl<D> Solver for LocalSearchSolver<D>
where
    D: DistanceModel + Send + Sync,
{
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError> {
        let started_at = Instant::now();
        if request.is_trivial() {
            return Ok(trivial_response(request.stops.len(), started_at.elapsed()));
        }
        request.validate()?;
        let budget = SearchBudget::starting_at(started_at, request.time_limit);
        self.solve_with_budget(&request.stops, &budget)
    }
}

fn trivial_response(len: usize, solve_time: Duration) -> SolveResponse {
    SolveResponse {
        route: Tour::identity(len),
        cost: 0,
        diagnostics: Diagnostics::trivial(solve_time),
    }
}

/// Order `stops` for a single crew within `time_limit`.
///
/// Returns a permutation of `0..stops.len()` starting at the depot. Fewer
/// than two stops come back in their original order whatever the limit.
///
/// # Errors
/// Returns [`SolveError::InvalidInput`] for a zero `time_limit` or a
/// coordinate that is non-finite or off the globe, and
/// [`SolveError::NoFeasibleTour`] if no valid order could be built.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use greenroute_core::Stop;
/// use greenroute_solver::solve;
///
/// let stops = [Stop::new(0.0, 0.0), Stop::new(0.0, 2.0), Stop::new(0.0, 1.0)];
/// let route = solve(&stops, Duration::from_millis(100))?;
/// assert_eq!(route, vec![0, 2, 1]);
/// # Ok::<(), greenroute_core::SolveError>(())
/// ```
pub fn solve(stops: &[Stop], time_limit: Duration) -> Result<Vec<usize>, SolveError> {
    let request = SolveRequest::new(stops.to_vec()).with_time_limit(time_limit);
    LocalSearchSolver::new()
        .solve(&request)
        .map(|response| response.route.into_inner())
}
