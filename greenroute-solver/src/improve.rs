//! Budgeted 2-opt and Or-opt local search over open tours.
//!
//! Both neighbourhoods use first improvement: the scan restarts from the
//! beginning of the tour after every applied move. A move is applied only if
//! it strictly lowers the open-tour cost, so the search cannot cycle. The
//! budget is polled before each candidate is evaluated.

use greenroute_core::{Budget, Cost, DistanceMatrix, Termination, Tour, TourError};

use crate::LocalSearchConfig;

/// Summary of one improvement run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImproveOutcome {
    /// Candidate moves evaluated.
    pub candidates_evaluated: u64,
    /// Improving moves applied.
    pub moves_applied: u64,
    /// [`Termination::Converged`] or [`Termination::BudgetExhausted`].
    pub termination: Termination,
}

/// Improve `tour` in place until it is locally optimal or `budget` runs out.
///
/// The result is never worse than the input. The depot stays first.
///
/// # Errors
/// Returns [`TourError`] if a move addresses invalid positions, which
/// indicates a bug rather than bad input.
///
/// # Panics
/// Panics if `tour` references stops outside `matrix`.
///
/// # Examples
/// ```
/// use greenroute_core::{DistanceMatrix, Termination, Tour};
/// use greenroute_core::test_support::EvaluationBudget;
/// use greenroute_solver::{LocalSearchConfig, improve};
///
/// let positions = [0_u64, 1, 3, 2];
/// let matrix = DistanceMatrix::from_fn(4, |a, b| positions[a].abs_diff(positions[b]));
/// let mut tour = Tour::identity(4);
/// let outcome = improve(
///     &mut tour,
///     &matrix,
///     &EvaluationBudget::unlimited(),
///     &LocalSearchConfig::default(),
/// )?;
/// assert_eq!(tour.as_slice(), &[0, 1, 3, 2]);
/// assert_eq!(outcome.termination, Termination::Converged);
/// # Ok::<(), greenroute_core::TourError>(())
/// ```
pub fn improve<B>(
    tour: &mut Tour,
    matrix: &DistanceMatrix,
    budget: &B,
    config: &LocalSearchConfig,
) -> Result<ImproveOutcome, TourError>
where
    B: Budget + ?Sized,
{
    let mut search = Search {
        matrix,
        budget,
        evaluated: 0,
        applied: 0,
    };

    // With the depot fixed, two stops admit a single order.
    if tour.len() < 3 {
        return Ok(search.finish(Termination::Converged));
    }

    loop {
        match search.find_two_opt(tour.as_slice()) {
            Scan::Found(TwoOpt { first, last }) => {
                tour.reverse(first..=last)?;
                search.applied += 1;
                continue;
            }
            Scan::Exhausted => return Ok(search.finish(Termination::BudgetExhausted)),
            Scan::LocalOptimum => {}
        }

        if config.or_opt {
            match search.find_or_opt(tour.as_slice(), config.max_segment_len) {
                Scan::Found(OrOpt { first, last, after }) => {
                    tour.relocate(first..=last, after)?;
                    search.applied += 1;
                    continue;
                }
                Scan::Exhausted => return Ok(search.finish(Termination::BudgetExhausted)),
                Scan::LocalOptimum => {}
            }
        }

        return Ok(search.finish(Termination::Converged));
    }
}

/// Reverse tour positions `first..=last`.
#[derive(Debug, Clone, Copy)]
struct TwoOpt {
    first: usize,
    last: usize,
}

/// Move tour positions `first..=last` behind position `after`.
#[derive(Debug, Clone, Copy)]
struct OrOpt {
    first: usize,
    last: usize,
    after: usize,
}

enum Scan<M> {
    Found(M),
    Exhausted,
    LocalOptimum,
}

struct Search<'a, B: ?Sized> {
    matrix: &'a DistanceMatrix,
    budget: &'a B,
    evaluated: u64,
    applied: u64,
}

impl<B: Budget + ?Sized> Search<'_, B> {
    const fn finish(&self, termination: Termination) -> ImproveOutcome {
        ImproveOutcome {
            candidates_evaluated: self.evaluated,
            moves_applied: self.applied,
            termination,
        }
    }

    fn poll(&mut self) -> bool {
        if self.budget.is_exhausted() {
            return false;
        }
        self.evaluated += 1;
        true
    }

    /// Cost of an edge, or nothing when the tour ends at `from`.
    fn edge(&self, from: usize, to: Option<usize>) -> Cost {
        to.map_or(0, |target| self.matrix.cost(from, target))
    }

    /// Scan edge pairs `(i, i+1)` and `(j, j+1)` for a cheaper reversal of
    /// positions `i+1..=j`. When `j` is the last position there is no second
    /// edge and the reversal only swaps which stop ends the tour.
    #[expect(
        clippy::indexing_slicing,
        reason = "i + 1 <= j < order.len() holds for every probed position"
    )]
    fn find_two_opt(&mut self, order: &[usize]) -> Scan<TwoOpt> {
        let len = order.len();
        for i in 0..len.saturating_sub(2) {
            let a = order[i];
            let b = order[i + 1];
            let ab = self.matrix.cost(a, b);
            for j in (i + 2)..len {
                if !self.poll() {
                    return Scan::Exhausted;
                }
                let c = order[j];
                let d = order.get(j + 1).copied();
                let removed = ab.saturating_add(self.edge(c, d));
                let added = self.matrix.cost(a, c).saturating_add(self.edge(b, d));
                if added < removed {
                    return Scan::Found(TwoOpt {
                        first: i + 1,
                        last: j,
                    });
                }
            }
        }
        Scan::LocalOptimum
    }

    /// Scan relocations of segments of `1..=max_segment_len` stops to every
    /// other gap in the tour. The depot never moves.
    #[expect(
        clippy::indexing_slicing,
        reason = "segment bounds and insertion points are clamped to the tour length"
    )]
    fn find_or_opt(&mut self, order: &[usize], max_segment_len: usize) -> Scan<OrOpt> {
        let len = order.len();
        for segment_len in 1..=max_segment_len.min(len.saturating_sub(2)) {
            for first in 1..=(len - segment_len) {
                let last = first + segment_len - 1;
                let prev = order[first - 1];
                let head = order[first];
                let tail = order[last];
                let next = order.get(last + 1).copied();
                let detached = self.matrix.cost(prev, head).saturating_add(self.edge(tail, next));
                let bridged = next.map_or(0, |after_tail| self.matrix.cost(prev, after_tail));

                for after in (0..len).filter(|&gap| gap + 1 < first || gap > last) {
                    if !self.poll() {
                        return Scan::Exhausted;
                    }
                    let a = order[after];
                    let b = order.get(after + 1).copied();
                    let removed = detached.saturating_add(self.edge(a, b));
                    let added = bridged
                        .saturating_add(self.matrix.cost(a, head))
                        .saturating_add(self.edge(tail, b));
                    if added < removed {
                        return Scan::Found(OrOpt { first, last, after });
                    }
                }
            }
        }
        Scan::LocalOptimum
    }
}
