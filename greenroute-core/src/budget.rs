//! Time budgets bounding the local search.

use std::time::{Duration, Instant};

/// Decides when an anytime search has to stop.
///
/// The improver polls [`Budget::is_exhausted`] before every candidate move it
/// evaluates, so implementations should be cheap.
pub trait Budget {
    /// Whether the search must stop now.
    fn is_exhausted(&self) -> bool;
}

/// Wall-clock deadline fixed when a solve starts.
///
/// The deadline is never moved or reset. A limit too large to represent
/// behaves as an unbounded budget.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use greenroute_core::{Budget, SearchBudget};
///
/// let budget = SearchBudget::starting_now(Duration::from_secs(60));
/// assert!(!budget.is_exhausted());
/// assert!(budget.remaining() <= Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    started_at: Instant,
    deadline: Option<Instant>,
}

impl SearchBudget {
    /// Start a budget of `limit` from the current instant.
    #[must_use]
    pub fn starting_now(limit: Duration) -> Self {
        Self::starting_at(Instant::now(), limit)
    }

    /// Start a budget of `limit` from `started_at`.
    #[must_use]
    pub fn starting_at(started_at: Instant, limit: Duration) -> Self {
        Self {
            started_at,
            deadline: started_at.checked_add(limit),
        }
    }

    /// Instant the budget started.
    #[must_use]
    pub const fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Instant the budget runs out, or `None` if unbounded.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time spent since the budget started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Time left before the deadline; zero once it has passed.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.deadline.map_or(Duration::MAX, |deadline| {
            deadline.saturating_duration_since(Instant::now())
        })
    }
}

impl Budget for SearchBudget {
    fn is_exhausted(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }
}

impl<B: Budget + ?Sized> Budget for &B {
    fn is_exhausted(&self) -> bool {
        (**self).is_exhausted()
    }
}
